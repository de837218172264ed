//! Scripted in-memory collaborators shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;

use conseil_types::error::{ReplyError, SinkError};
use conseil_types::reply::{ReplyRequest, ReplyResponse};
use conseil_types::summary::ChatSummary;

use crate::reply::service::ReplyService;
use crate::summary::sink::SummarySink;

/// One scripted reply-service response, consumed in call order.
pub enum Scripted {
    Reply(String),
    Fail,
    /// Stays pending until the sender side resolves (or is dropped).
    Gate(oneshot::Receiver<String>),
}

impl Scripted {
    pub fn reply(text: &str) -> Self {
        Scripted::Reply(text.to_string())
    }

    pub fn gate() -> (oneshot::Sender<String>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Scripted::Gate(rx))
    }
}

/// Reply service that plays back a script and records every request.
///
/// Calls beyond the end of the script fail with HTTP 500.
pub struct ScriptedReplies {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<ReplyRequest>>,
}

impl ScriptedReplies {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ReplyRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl ReplyService for ScriptedReplies {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: &ReplyRequest) -> Result<ReplyResponse, ReplyError> {
        self.calls.lock().unwrap().push(request.clone());
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(Scripted::Reply(reply)) => Ok(ReplyResponse { reply }),
            Some(Scripted::Gate(rx)) => rx
                .await
                .map(|reply| ReplyResponse { reply })
                .map_err(|_| ReplyError::Transport("connection reset".to_string())),
            Some(Scripted::Fail) | None => Err(ReplyError::Status {
                status: 500,
                body: "internal error".to_string(),
            }),
        }
    }
}

/// Summary sink that records deliveries, optionally failing or stalling.
pub struct RecordingSink {
    fail: bool,
    latency: Option<Duration>,
    attempts: AtomicUsize,
    summaries: Mutex<Vec<ChatSummary>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            fail: false,
            latency: None,
            attempts: AtomicUsize::new(0),
            summaries: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Records each delivery only after `latency` has elapsed.
    pub fn slow(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::new()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn summaries(&self) -> Vec<ChatSummary> {
        self.summaries.lock().unwrap().clone()
    }
}

impl SummarySink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    async fn deliver(&self, summary: &ChatSummary) -> Result<(), SinkError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.fail {
            return Err(SinkError::Rejected("Failed to send summary email".to_string()));
        }
        self.summaries.lock().unwrap().push(summary.clone());
        Ok(())
    }
}
