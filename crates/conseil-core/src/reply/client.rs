//! ReplyClient -- formats the running transcript for the reply service and
//! maps every failure to a sentinel.
//!
//! Callers never handle errors from here: a degraded service yields
//! [`Reply::Unavailable`] and the controller substitutes fixed text.

use std::sync::Arc;

use tracing::{debug, warn};

use conseil_types::chat::Turn;
use conseil_types::contact::ContactMetadata;
use conseil_types::error::ReplyError;
use conseil_types::reply::ReplyRequest;

use super::service::ReplyService;

/// Greeting used when the opening request fails.
pub const FALLBACK_GREETING: &str =
    "Bienvenue! Je suis votre conseiller en crédit. Comment puis-je vous aider aujourd'hui?";

/// Advisor turn appended when a reply request fails.
pub const APOLOGY_REPLY: &str =
    "Désolé, une erreur est survenue. Pouvez-vous reformuler votre question?";

/// Outcome of one reply request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The service proposed this (non-blank) advisor text.
    Generated(String),
    /// Transport, status, decode failure or a blank reply.
    Unavailable,
}

impl Reply {
    /// The generated text, or `fallback` when unavailable.
    pub fn text_or(self, fallback: &str) -> String {
        match self {
            Reply::Generated(text) => text,
            Reply::Unavailable => fallback.to_string(),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Reply::Generated(_))
    }
}

/// Single-shot client over a [`ReplyService`].
///
/// Cheap to clone; clones share the underlying service.
pub struct ReplyClient<S> {
    service: Arc<S>,
}

impl<S> Clone for ReplyClient<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

impl<S: ReplyService> ReplyClient<S> {
    pub fn new(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Wrap a service that the caller also keeps a handle to.
    pub fn from_arc(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Request the next advisor turn for `transcript`.
    ///
    /// An empty transcript requests the opening greeting. Never retries.
    pub async fn request(&self, transcript: &[Turn], metadata: &ContactMetadata) -> Reply {
        let request = ReplyRequest {
            transcript: transcript.to_vec(),
            metadata: metadata.clone(),
        };

        let result = self
            .service
            .generate(&request)
            .await
            .and_then(|response| {
                let text = response.reply.trim();
                if text.is_empty() {
                    Err(ReplyError::EmptyReply)
                } else {
                    Ok(text.to_string())
                }
            });

        match result {
            Ok(text) => {
                debug!(
                    service = self.service.name(),
                    greeting = request.is_greeting(),
                    chars = text.chars().count(),
                    "Reply generated"
                );
                Reply::Generated(text)
            }
            Err(e) => {
                warn!(
                    service = self.service.name(),
                    greeting = request.is_greeting(),
                    error = %e,
                    "Reply service failed, using fallback"
                );
                Reply::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Scripted, ScriptedReplies};

    fn eve() -> ContactMetadata {
        ContactMetadata::new("Eve", "e@x.com")
    }

    #[tokio::test]
    async fn generated_reply_is_trimmed() {
        let replies = Arc::new(ScriptedReplies::new([Scripted::reply("  Bonjour Eve \n")]));
        let client = ReplyClient::from_arc(Arc::clone(&replies));

        let reply = client.request(&[], &eve()).await;
        assert_eq!(reply, Reply::Generated("Bonjour Eve".to_string()));

        let calls = replies.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].is_greeting());
        assert_eq!(calls[0].metadata.name, "Eve");
    }

    #[tokio::test]
    async fn failure_maps_to_unavailable_without_retry() {
        let replies = Arc::new(ScriptedReplies::new([Scripted::Fail, Scripted::reply("late")]));
        let client = ReplyClient::from_arc(Arc::clone(&replies));

        let reply = client.request(&[Turn::visitor("Aidez-moi")], &eve()).await;
        assert_eq!(reply, Reply::Unavailable);
        assert_eq!(replies.calls().len(), 1);
    }

    #[tokio::test]
    async fn blank_reply_is_unavailable() {
        let client = ReplyClient::new(ScriptedReplies::new([Scripted::reply("   ")]));
        assert_eq!(client.request(&[], &eve()).await, Reply::Unavailable);
    }

    #[tokio::test]
    async fn request_carries_full_transcript() {
        let replies = Arc::new(ScriptedReplies::new([Scripted::reply("ok")]));
        let client = ReplyClient::from_arc(Arc::clone(&replies));
        let transcript = vec![Turn::advisor("Bonjour"), Turn::visitor("Salut")];

        client.request(&transcript, &eve()).await;
        assert_eq!(replies.calls()[0].transcript, transcript);
    }

    #[test]
    fn text_or_uses_fallback() {
        assert_eq!(Reply::Unavailable.text_or(APOLOGY_REPLY), APOLOGY_REPLY);
        assert_eq!(Reply::Generated("x".to_string()).text_or(APOLOGY_REPLY), "x");
        assert!(!Reply::Unavailable.is_generated());
    }
}
