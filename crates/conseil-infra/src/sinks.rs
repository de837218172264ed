//! Summary sink selection.

use std::path::PathBuf;

use conseil_core::summary::box_sink::BoxSummarySink;
use conseil_types::config::ConsultationConfig;

use crate::http::summary::HttpSummarySink;
use crate::outbox::OutboxSummarySink;

/// Default outbox: `{data_dir}/conseil/outbox`, or the temp dir when the
/// platform has no data directory.
pub fn default_outbox_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("conseil")
        .join("outbox")
}

/// The HTTP sink when a summary endpoint is configured, otherwise the outbox.
pub fn summary_sink_for(config: &ConsultationConfig, client: reqwest::Client) -> BoxSummarySink {
    match &config.endpoints.summary_url {
        Some(url) => {
            tracing::debug!(%url, "Summaries go to HTTP endpoint");
            BoxSummarySink::new(HttpSummarySink::with_client(client, url.clone()))
        }
        None => {
            let dir = config.outbox_dir.clone().unwrap_or_else(default_outbox_dir);
            tracing::debug!(dir = %dir.display(), "Summaries go to local outbox");
            BoxSummarySink::new(
                OutboxSummarySink::new(dir).with_end_after(config.timings.end_after()),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use conseil_core::summary::sink::SummarySink;

    use super::*;

    #[test]
    fn test_outbox_when_no_summary_url() {
        let config = ConsultationConfig::default();
        let sink = summary_sink_for(&config, reqwest::Client::new());
        assert_eq!(SummarySink::name(&sink), "outbox");
    }

    #[test]
    fn test_http_when_summary_url_set() {
        let mut config = ConsultationConfig::default();
        config.endpoints.summary_url = Some("https://example.com/summary".to_string());
        let sink = summary_sink_for(&config, reqwest::Client::new());
        assert_eq!(SummarySink::name(&sink), "http");
    }

    #[test]
    fn test_default_outbox_dir_is_namespaced() {
        assert!(default_outbox_dir().ends_with("conseil/outbox"));
    }
}
