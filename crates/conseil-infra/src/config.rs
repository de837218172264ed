//! Configuration loader for Conseil.
//!
//! Reads `config.toml` from `{config_dir}/conseil/` (or an explicit path)
//! and deserializes it into [`ConsultationConfig`]. A missing or malformed
//! file falls back to defaults; values that parse but cannot run a session
//! (bad timings, non-HTTP endpoints) are a hard error.

use std::path::{Path, PathBuf};

use conseil_types::config::ConsultationConfig;
use conseil_types::error::ConfigError;

/// Overrides `endpoints.reply_url`.
pub const REPLY_URL_ENV: &str = "CONSEIL_REPLY_URL";
/// Overrides `endpoints.summary_url`.
pub const SUMMARY_URL_ENV: &str = "CONSEIL_SUMMARY_URL";

/// `{config_dir}/conseil/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("conseil").join("config.toml"))
}

/// Read and parse a config file without validating it.
///
/// - If the file does not exist, returns [`ConsultationConfig::default()`].
/// - If the file cannot be read or parsed, logs a warning and returns the default.
pub async fn read_config_file(path: &Path) -> ConsultationConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", path.display());
            return ConsultationConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ConsultationConfig::default();
        }
    };

    match toml::from_str::<ConsultationConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ConsultationConfig::default()
        }
    }
}

/// Apply endpoint overrides. `lookup` resolves an environment variable name.
///
/// Blank values are ignored.
pub fn apply_overrides<F>(mut config: ConsultationConfig, lookup: F) -> ConsultationConfig
where
    F: Fn(&str) -> Option<String>,
{
    let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = value(REPLY_URL_ENV) {
        tracing::debug!(%url, "Reply URL overridden by {REPLY_URL_ENV}");
        config.endpoints.reply_url = url;
    }
    if let Some(url) = value(SUMMARY_URL_ENV) {
        tracing::debug!(%url, "Summary URL overridden by {SUMMARY_URL_ENV}");
        config.endpoints.summary_url = Some(url);
    }
    config
}

/// Load the effective configuration.
///
/// Priority (highest first):
/// 1. `CONSEIL_REPLY_URL` / `CONSEIL_SUMMARY_URL`
/// 2. the file at `path`, or [`default_config_path`] when `None`
/// 3. built-in defaults
pub async fn load_config(path: Option<&Path>) -> Result<ConsultationConfig, ConfigError> {
    let file_config = match path.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => read_config_file(&path).await,
        None => {
            tracing::debug!("No config directory on this platform, using defaults");
            ConsultationConfig::default()
        }
    };

    let config = apply_overrides(file_config, |name| std::env::var(name).ok());
    config.validate()?;
    Ok(config)
}

/// Render a configuration as TOML.
pub fn render_config(config: &ConsultationConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}
