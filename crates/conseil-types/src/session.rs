//! Session lifecycle types: phase, end reason, and the observable snapshot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::chat::Turn;

/// Lifecycle phase of a consultation session.
///
/// The inactivity warning is not a phase: it is carried as a separate flag
/// on [`SessionSnapshot`] because it overlays `Active` and `AwaitingReply`
/// without changing what the visitor can do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Initializing,
    Active,
    AwaitingReply,
    Ended,
}

impl Phase {
    /// Whether inactivity timers may exist in this phase.
    pub fn is_live(&self) -> bool {
        matches!(self, Phase::Active | Phase::AwaitingReply)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initializing => write!(f, "initializing"),
            Phase::Active => write!(f, "active"),
            Phase::AwaitingReply => write!(f, "awaiting_reply"),
            Phase::Ended => write!(f, "ended"),
        }
    }
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    Inactivity,
    Manual,
}

impl EndReason {
    /// Human-readable label used in rendered summaries.
    pub fn label(&self) -> &'static str {
        match self {
            EndReason::Inactivity => "Inactivité",
            EndReason::Manual => "Terminée par le client",
        }
    }

    /// Label for rendered summaries, with the inactivity delay spelled out.
    pub fn summary_label(&self, end_after: Duration) -> String {
        match self {
            EndReason::Inactivity => {
                let secs = end_after.as_secs();
                if secs >= 60 && secs % 60 == 0 {
                    format!("{} ({} min)", self.label(), secs / 60)
                } else {
                    format!("{} ({secs} s)", self.label())
                }
            }
            EndReason::Manual => self.label().to_string(),
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Inactivity => write!(f, "inactivity"),
            EndReason::Manual => write!(f, "manual"),
        }
    }
}

impl FromStr for EndReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inactivity" => Ok(EndReason::Inactivity),
            "manual" => Ok(EndReason::Manual),
            other => Err(format!("invalid end reason: '{other}'")),
        }
    }
}

/// Point-in-time view of a session, published after every state change.
///
/// This is what a presentation layer renders: the transcript, whether a reply
/// is pending, whether the inactivity warning is showing, and how the session
/// ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub phase: Phase,
    pub warning_shown: bool,
    pub transcript: Vec<Turn>,
    pub end_reason: Option<EndReason>,
}

impl SessionSnapshot {
    pub fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            phase: Phase::Initializing,
            warning_shown: false,
            transcript: Vec::new(),
            end_reason: None,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Whether a typing indicator should be displayed.
    pub fn is_awaiting_reply(&self) -> bool {
        matches!(self.phase, Phase::Initializing | Phase::AwaitingReply)
    }
}
