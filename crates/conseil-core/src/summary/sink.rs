//! SummarySink trait definition.

use conseil_types::error::SinkError;
use conseil_types::summary::ChatSummary;

/// Port for the fire-and-forget email collaborator.
///
/// Implementations live in conseil-infra (`HttpSummarySink`,
/// `OutboxSummarySink`).
pub trait SummarySink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Attempt one delivery. No retries.
    fn deliver(
        &self,
        summary: &ChatSummary,
    ) -> impl std::future::Future<Output = Result<(), SinkError>> + Send;
}
