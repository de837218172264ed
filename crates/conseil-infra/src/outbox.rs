//! OutboxSummarySink -- writes each summary as a plain-text file.
//!
//! Used when no summary endpoint is configured. One file per session:
//! `<dir>/chat-<submissionId>.txt`, containing [`ChatSummary::render_text`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use conseil_core::summary::sink::SummarySink;
use conseil_types::config::SessionTimings;
use conseil_types::error::SinkError;
use conseil_types::summary::ChatSummary;

#[derive(Debug, Clone)]
pub struct OutboxSummarySink {
    dir: PathBuf,
    end_after: Duration,
}

impl OutboxSummarySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            end_after: SessionTimings::default().end_after(),
        }
    }

    /// Inactivity delay quoted in the rendered end reason.
    pub fn with_end_after(mut self, end_after: Duration) -> Self {
        self.end_after = end_after;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the summary with `submission_id` is written.
    pub fn path_for(&self, submission_id: &str) -> PathBuf {
        self.dir.join(format!("chat-{submission_id}.txt"))
    }
}

impl SummarySink for OutboxSummarySink {
    fn name(&self) -> &str {
        "outbox"
    }

    async fn deliver(&self, summary: &ChatSummary) -> Result<(), SinkError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            SinkError::Io(format!("failed to create {}: {e}", self.dir.display()))
        })?;

        let path = self.path_for(&summary.submission_id);
        tokio::fs::write(&path, summary.render_text(self.end_after))
            .await
            .map_err(|e| SinkError::Io(format!("failed to write {}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), "Summary written to outbox");
        Ok(())
    }
}
