use thiserror::Error;

/// Errors from a reply service call.
///
/// Never surfaced to the visitor: the reply client maps every variant to
/// the fallback sentinel.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply service unreachable: {0}")]
    Transport(String),

    #[error("reply service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode reply: {0}")]
    Decode(String),

    #[error("reply service returned an empty reply")]
    EmptyReply,
}

/// Errors from a summary sink delivery.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("summary sink unreachable: {0}")]
    Transport(String),

    #[error("summary sink rejected the summary: {0}")]
    Rejected(String),

    #[error("failed to decode summary sink response: {0}")]
    Decode(String),

    #[error("summary outbox error: {0}")]
    Io(String),
}

/// Errors returned to the presentation layer by a session handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("contact metadata has no {0}")]
    MissingContact(&'static str),

    #[error("message is empty")]
    EmptyMessage,

    #[error("a reply is still pending")]
    Busy,

    #[error("session has ended")]
    Ended,
}

/// Errors from configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid timings: {0}")]
    InvalidTimings(String),

    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_error_display() {
        let err = ReplyError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "reply service returned HTTP 502: bad gateway");
    }

    #[test]
    fn test_session_error_display() {
        assert_eq!(
            SessionError::MissingContact("email").to_string(),
            "contact metadata has no email"
        );
        assert_eq!(SessionError::Busy.to_string(), "a reply is still pending");
    }

    #[test]
    fn test_sink_error_display() {
        let err = SinkError::Rejected("Failed to send summary email".to_string());
        assert!(err.to_string().contains("Failed to send summary email"));
    }
}
