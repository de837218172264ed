//! Application state wiring the session collaborators together.
//!
//! The session controller is generic over its reply service and summary
//! sink; AppState pins them to the concrete infra implementations.

use std::path::{Path, PathBuf};

use conseil_core::conversion::{OnceConversion, TracingConversionTracker};
use conseil_core::reply::client::ReplyClient;
use conseil_core::session::controller::SessionSettings;
use conseil_core::summary::box_sink::BoxSummarySink;
use conseil_core::summary::dispatcher::SummaryDispatcher;
use conseil_infra::config::{default_config_path, load_config};
use conseil_infra::http::reply::HttpReplyService;
use conseil_infra::sinks::summary_sink_for;
use conseil_types::config::ConsultationConfig;

pub type ConcreteReplyClient = ReplyClient<HttpReplyService>;
pub type ConcreteDispatcher = SummaryDispatcher<BoxSummarySink>;

pub struct AppState {
    pub config: ConsultationConfig,
    /// File the configuration was read from (it may not exist).
    pub config_path: Option<PathBuf>,
    http: reqwest::Client,
}

impl AppState {
    /// Load configuration and build the shared HTTP client.
    pub async fn init(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = load_config(config_path).await?;
        let config_path = config_path.map(Path::to_path_buf).or_else(default_config_path);
        Ok(Self::with_config(config, config_path))
    }

    pub fn with_config(config: ConsultationConfig, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            http: reqwest::Client::new(),
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::from_config(&self.config)
    }

    pub fn reply_client(&self) -> ConcreteReplyClient {
        ReplyClient::new(HttpReplyService::with_client(
            self.http.clone(),
            self.config.endpoints.reply_url.clone(),
        ))
    }

    pub fn dispatcher(&self) -> ConcreteDispatcher {
        SummaryDispatcher::new(summary_sink_for(&self.config, self.http.clone()))
    }

    pub fn conversion_tracker(&self) -> OnceConversion<TracingConversionTracker> {
        OnceConversion::new(TracingConversionTracker::new(
            self.config.conversion_tags.clone(),
        ))
    }
}
