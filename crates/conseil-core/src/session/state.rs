//! Phase machine for one consultation session.
//!
//! `SessionState` holds the only mutable session data (phase, warning flag,
//! transcript, end reason) and exposes one method per transition. Every
//! method checks the phase first, which is what serializes the racing
//! sources of control in the controller:
//!
//! ```text
//! Initializing --greeting--> AwaitingReply --reply--> Active
//! Active --visitor turn--> AwaitingReply --reply--> Active
//! any --end--> Ended (absorbing)
//! ```

use conseil_types::chat::Turn;
use conseil_types::error::SessionError;
use conseil_types::session::{EndReason, Phase, SessionSnapshot};
use uuid::Uuid;

use super::transcript::Transcript;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: Phase,
    warning_shown: bool,
    transcript: Transcript,
    end_reason: Option<EndReason>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn warning_shown(&self) -> bool {
        self.warning_shown
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// `Initializing -> AwaitingReply` while the opening greeting is fetched.
    pub fn begin_greeting(&mut self) {
        if self.phase == Phase::Initializing {
            self.phase = Phase::AwaitingReply;
        }
    }

    /// Append a visitor turn and move to `AwaitingReply`.
    ///
    /// Blank input, a pending reply, or an ended session reject the turn
    /// before anything is mutated. On success returns the transcript to send
    /// to the reply service.
    pub fn accept_visitor(&mut self, text: &str) -> Result<Vec<Turn>, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        match self.phase {
            Phase::Active => {}
            Phase::Ended => return Err(SessionError::Ended),
            Phase::Initializing | Phase::AwaitingReply => return Err(SessionError::Busy),
        }

        self.transcript.push(Turn::visitor(text));
        self.warning_shown = false;
        self.phase = Phase::AwaitingReply;
        Ok(self.transcript.to_vec())
    }

    /// Append an advisor turn and return to `Active`.
    ///
    /// Returns `false` (and appends nothing) once the session has ended: a
    /// reply resolving after termination is stale.
    pub fn apply_reply(&mut self, turn: Turn) -> bool {
        if self.is_ended() {
            return false;
        }
        self.transcript.push(turn);
        self.phase = Phase::Active;
        true
    }

    /// Raise the inactivity warning. No-op unless the session is live.
    pub fn show_warning(&mut self) -> bool {
        if !self.phase.is_live() {
            return false;
        }
        self.warning_shown = true;
        true
    }

    /// Enter `Ended`. Only the first call has effect; later calls return
    /// `false`.
    pub fn end(&mut self, reason: EndReason) -> bool {
        if self.is_ended() {
            return false;
        }
        self.phase = Phase::Ended;
        self.end_reason = Some(reason);
        self.warning_shown = false;
        true
    }

    pub fn snapshot(&self, session_id: Uuid) -> SessionSnapshot {
        SessionSnapshot {
            session_id,
            phase: self.phase,
            warning_shown: self.warning_shown,
            transcript: self.transcript.to_vec(),
            end_reason: self.end_reason,
        }
    }
}
