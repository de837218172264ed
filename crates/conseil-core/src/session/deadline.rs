//! Cancellable deferred wake-up.
//!
//! A `Deadline` is either idle or armed with a single pending `Sleep`.
//! Re-arming replaces the pending sleep, cancelling drops it, so two
//! wake-ups for the same deadline can never overlap.

use std::pin::Pin;
use std::time::Duration;

use tokio::time::{Instant, Sleep};

#[derive(Debug, Default)]
pub struct Deadline {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl Deadline {
    /// An idle deadline that never elapses until armed.
    pub fn idle() -> Self {
        Self { sleep: None }
    }

    /// Arm to elapse `after` from now, replacing any pending wake-up.
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, after: Duration) {
        self.sleep = Some(Box::pin(tokio::time::sleep(after)));
    }

    pub fn cancel(&mut self) {
        self.sleep = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    /// When the pending wake-up is due, if armed.
    pub fn expires_at(&self) -> Option<Instant> {
        self.sleep.as_ref().map(|sleep| sleep.deadline())
    }

    /// Resolve once the armed deadline passes, then return to idle.
    ///
    /// Pends forever while idle, which makes it safe to use as a
    /// `tokio::select!` branch. Cancel-safe: dropping the future before it
    /// resolves leaves the deadline armed.
    pub async fn elapsed(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
