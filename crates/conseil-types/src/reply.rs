//! Wire payloads exchanged with the reply-generation service.

use serde::{Deserialize, Serialize};

use crate::chat::Turn;
use crate::contact::ContactMetadata;

/// Request body sent to the reply service.
///
/// An empty `transcript` asks for the opening greeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub transcript: Vec<Turn>,
    pub metadata: ContactMetadata,
}

impl ReplyRequest {
    pub fn is_greeting(&self) -> bool {
        self.transcript.is_empty()
    }
}

/// Successful response body from the reply service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
}
