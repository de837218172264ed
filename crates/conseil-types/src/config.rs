//! Configuration types for Conseil.
//!
//! `ConsultationConfig` represents the `config.toml` that controls session
//! timings, collaborator endpoints, the confirmation destination and
//! conversion tags. All fields have defaults matching the production site.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationConfig {
    /// Where the visitor is sent once a session has ended.
    #[serde(default = "default_confirmation_path")]
    pub confirmation_path: String,

    /// Directory for the file outbox used when no summary endpoint is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outbox_dir: Option<PathBuf>,

    #[serde(default)]
    pub timings: SessionTimings,

    #[serde(default)]
    pub endpoints: Endpoints,

    /// Conversion events recorded when the confirmation view is shown.
    #[serde(default = "default_conversion_tags")]
    pub conversion_tags: Vec<ConversionTag>,
}

fn default_confirmation_path() -> String {
    "/merci".to_string()
}

fn default_conversion_tags() -> Vec<ConversionTag> {
    vec![
        ConversionTag {
            send_to: "AW-1055107787".to_string(),
            value: Some(1.0),
            currency: Some("CAD".to_string()),
        },
        ConversionTag {
            send_to: "AW-1055107787/buvXCMfAyrIbEMvVjvcD".to_string(),
            value: None,
            currency: None,
        },
    ]
}

impl Default for ConsultationConfig {
    fn default() -> Self {
        Self {
            confirmation_path: default_confirmation_path(),
            outbox_dir: None,
            timings: SessionTimings::default(),
            endpoints: Endpoints::default(),
            conversion_tags: default_conversion_tags(),
        }
    }
}

impl ConsultationConfig {
    /// Reject configurations the session controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.timings.validate()?;
        check_url(&self.endpoints.reply_url)?;
        if let Some(url) = &self.endpoints.summary_url {
            check_url(url)?;
        }
        Ok(())
    }
}

fn check_url(url: &str) -> Result<(), ConfigError> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidEndpoint {
            url: url.to_string(),
            reason: "expected an http:// or https:// URL".to_string(),
        })
    }
}

/// Inactivity and navigation timings, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimings {
    /// Quiet period after the last visitor turn before the warning shows.
    #[serde(default = "default_warning_after_secs")]
    pub warning_after_secs: u64,

    /// Quiet period after the last visitor turn before the session ends.
    #[serde(default = "default_end_after_secs")]
    pub end_after_secs: u64,

    /// Delay between termination and the navigation signal.
    #[serde(default = "default_navigation_delay_secs")]
    pub navigation_delay_secs: u64,
}

fn default_warning_after_secs() -> u64 {
    90
}

fn default_end_after_secs() -> u64 {
    120
}

fn default_navigation_delay_secs() -> u64 {
    3
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            warning_after_secs: default_warning_after_secs(),
            end_after_secs: default_end_after_secs(),
            navigation_delay_secs: default_navigation_delay_secs(),
        }
    }
}

impl SessionTimings {
    pub fn warning_after(&self) -> Duration {
        Duration::from_secs(self.warning_after_secs)
    }

    pub fn end_after(&self) -> Duration {
        Duration::from_secs(self.end_after_secs)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_secs(self.navigation_delay_secs)
    }

    /// Length of the window during which the warning is visible.
    pub fn warning_window(&self) -> Duration {
        self.end_after().saturating_sub(self.warning_after())
    }

    /// The warning must show strictly before the session ends.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_after_secs == 0 {
            return Err(ConfigError::InvalidTimings(
                "warning_after_secs must be greater than zero".to_string(),
            ));
        }
        if self.warning_after_secs >= self.end_after_secs {
            return Err(ConfigError::InvalidTimings(format!(
                "warning_after_secs ({}) must be less than end_after_secs ({})",
                self.warning_after_secs, self.end_after_secs
            )));
        }
        Ok(())
    }
}

/// Collaborator endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_reply_url")]
    pub reply_url: String,

    /// When unset, summaries go to the file outbox.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_url: Option<String>,
}

fn default_reply_url() -> String {
    "http://localhost:8888/.netlify/functions/chat".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            reply_url: default_reply_url(),
            summary_url: None,
        }
    }
}

/// One analytics conversion event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionTag {
    pub send_to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = ConsultationConfig::default();
        assert_eq!(config.timings.warning_after(), Duration::from_secs(90));
        assert_eq!(config.timings.end_after(), Duration::from_secs(120));
        assert_eq!(config.timings.navigation_delay(), Duration::from_secs(3));
        assert_eq!(config.timings.warning_window(), Duration::from_secs(30));
        assert_eq!(config.confirmation_path, "/merci");
        assert_eq!(config.conversion_tags.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: ConsultationConfig = toml::from_str("").unwrap();
        assert_eq!(config.timings, SessionTimings::default());
        assert!(config.endpoints.summary_url.is_none());
    }

    #[test]
    fn test_deserialize_with_values() {
        let toml_str = r#"
confirmation_path = "/thanks"
outbox_dir = "/tmp/outbox"

[timings]
warning_after_secs = 30
end_after_secs = 45

[endpoints]
reply_url = "https://example.com/chat"
summary_url = "https://example.com/chat-summary"

[[conversion_tags]]
send_to = "AW-1"
"#;
        let config: ConsultationConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timings.warning_after_secs, 30);
        assert_eq!(config.timings.navigation_delay_secs, 3);
        assert_eq!(config.endpoints.summary_url.as_deref(), Some("https://example.com/chat-summary"));
        assert_eq!(config.conversion_tags.len(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_warning_must_precede_end() {
        let timings = SessionTimings {
            warning_after_secs: 120,
            end_after_secs: 120,
            navigation_delay_secs: 3,
        };
        assert!(matches!(timings.validate(), Err(ConfigError::InvalidTimings(_))));

        let zero = SessionTimings {
            warning_after_secs: 0,
            ..SessionTimings::default()
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = ConsultationConfig::default();
        config.endpoints.reply_url = "ftp://nope".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidEndpoint { .. })
        ));
    }
}
