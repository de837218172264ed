//! Append-only conversation transcript.

use conseil_types::chat::{Role, Turn};

/// Ordered turns in conversation order.
///
/// The only mutation is [`push`](Self::push); turns are never edited or
/// removed.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    pub fn push(&mut self, turn: Turn) {
        debug_assert!(!turn.text.trim().is_empty(), "turn text must not be blank");
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns authored by `role`.
    pub fn count(&self, role: Role) -> usize {
        self.turns.iter().filter(|t| t.role == role).count()
    }

    pub fn to_vec(&self) -> Vec<Turn> {
        self.turns.clone()
    }
}
