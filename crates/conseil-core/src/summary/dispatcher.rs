//! Best-effort summary delivery at session end.
//!
//! The dispatcher builds the [`ChatSummary`] (stamping a wall-clock
//! submission id), hands it to the sink once, and reports the outcome.
//! Failures are logged here and never propagate.

use std::sync::Arc;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use conseil_types::chat::Turn;
use conseil_types::contact::ContactMetadata;
use conseil_types::session::EndReason;
use conseil_types::summary::{submission_id_at, ChatSummary};

use super::sink::SummarySink;

/// Result of one dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { submission_id: String },
    Failed { submission_id: String, error: String },
}

impl DispatchOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DispatchOutcome::Delivered { .. })
    }

    pub fn submission_id(&self) -> &str {
        match self {
            DispatchOutcome::Delivered { submission_id }
            | DispatchOutcome::Failed { submission_id, .. } => submission_id,
        }
    }
}

/// Sends one summary per call to a [`SummarySink`].
pub struct SummaryDispatcher<K> {
    sink: Arc<K>,
}

impl<K> Clone for SummaryDispatcher<K> {
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
        }
    }
}

impl<K: SummarySink> SummaryDispatcher<K> {
    pub fn new(sink: K) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    pub fn from_arc(sink: Arc<K>) -> Self {
        Self { sink }
    }

    /// Build and deliver the summary, stamped with the current local time.
    pub async fn dispatch(
        &self,
        metadata: ContactMetadata,
        transcript: Vec<Turn>,
        end_reason: EndReason,
    ) -> DispatchOutcome {
        self.dispatch_at(Local::now(), metadata, transcript, end_reason)
            .await
    }

    /// Same as [`dispatch`](Self::dispatch) with an explicit timestamp.
    pub async fn dispatch_at(
        &self,
        at: DateTime<Local>,
        metadata: ContactMetadata,
        transcript: Vec<Turn>,
        end_reason: EndReason,
    ) -> DispatchOutcome {
        let summary = ChatSummary {
            submission_id: submission_id_at(&at),
            metadata,
            transcript,
            end_reason,
        };
        let submission_id = summary.submission_id.clone();

        match self.sink.deliver(&summary).await {
            Ok(()) => {
                info!(
                    sink = self.sink.name(),
                    submission_id = %submission_id,
                    reason = %end_reason,
                    turns = summary.transcript.len(),
                    "Summary delivered"
                );
                DispatchOutcome::Delivered { submission_id }
            }
            Err(e) => {
                warn!(
                    sink = self.sink.name(),
                    submission_id = %submission_id,
                    error = %e,
                    "Summary delivery failed"
                );
                DispatchOutcome::Failed {
                    submission_id,
                    error: e.to_string(),
                }
            }
        }
    }
}
