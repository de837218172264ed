//! ReplyService trait definition.
//!
//! The remote reply-generation service is an opaque request/response
//! collaborator. Implementations live in conseil-infra (e.g.
//! `HttpReplyService`).

use conseil_types::error::ReplyError;
use conseil_types::reply::{ReplyRequest, ReplyResponse};

/// Port for the remote service that proposes advisor utterances.
///
/// Uses native async fn in traits (RPITIT). Implementations must not retry
/// and must not impose their own timeout: latency is unbounded from the
/// controller's point of view.
pub trait ReplyService: Send + Sync {
    /// Short name used in logs (e.g. "http").
    fn name(&self) -> &str;

    /// Issue exactly one request for the next advisor turn.
    fn generate(
        &self,
        request: &ReplyRequest,
    ) -> impl std::future::Future<Output = Result<ReplyResponse, ReplyError>> + Send;
}
