//! HttpSummarySink -- [`SummarySink`] posting the [`ChatSummary`] as JSON.
//!
//! The endpoint answers `{ "success": bool, "error"?: string }`. A non-2xx
//! status or `success: false` is a rejection; the server's `error` string is
//! carried through when present.

use conseil_core::summary::sink::SummarySink;
use conseil_types::error::SinkError;
use conseil_types::summary::{ChatSummary, SummaryAck};

use super::truncate_body;

pub struct HttpSummarySink {
    client: reqwest::Client,
    url: String,
}

impl HttpSummarySink {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl SummarySink for HttpSummarySink {
    fn name(&self) -> &str {
        "http"
    }

    async fn deliver(&self, summary: &ChatSummary) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(summary)
            .send()
            .await
            .map_err(|e| SinkError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SinkError::Transport(format!("failed to read response: {e}")))?;

        let ack = serde_json::from_str::<SummaryAck>(&body);
        if !status.is_success() {
            let detail = match ack {
                Ok(SummaryAck {
                    error: Some(error), ..
                }) => error,
                _ => truncate_body(body),
            };
            return Err(SinkError::Rejected(format!("HTTP {status}: {detail}")));
        }

        let ack = ack.map_err(|e| SinkError::Decode(format!("failed to parse response: {e}")))?;
        if ack.success {
            Ok(())
        } else {
            Err(SinkError::Rejected(
                ack.error.unwrap_or_else(|| "summary rejected".to_string()),
            ))
        }
    }
}
