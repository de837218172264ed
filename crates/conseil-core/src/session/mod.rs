//! Consultation session lifecycle.
//!
//! - `SessionState`: the explicit phase machine over an append-only transcript
//! - `Deadline`: cancellable deferred wake-ups backing the inactivity timers
//! - `SessionController` / `SessionHandle`: the single task that serializes
//!   visitor input, reply results and timer expiry, and terminates exactly once
//! - `Navigator`: the "go to confirmation" signal produced after termination

pub mod controller;
pub mod deadline;
pub mod navigation;
pub mod state;
pub mod transcript;
