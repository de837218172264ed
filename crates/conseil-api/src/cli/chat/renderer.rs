//! Renders session snapshots as terminal output.
//!
//! `ChatView` remembers what it has already printed, so each published
//! snapshot only produces the new advisor turns and state notices. Visitor
//! turns are not echoed; readline already shows them.

use std::io::{self, Write};
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use conseil_types::chat::{Role, Turn};
use conseil_types::error::SessionError;
use conseil_types::session::{EndReason, SessionSnapshot};

pub const WARNING_NOTICE: &str =
    "Êtes-vous toujours là? La consultation se terminera bientôt par inactivité.";
pub const ENDED_NOTICE: &str = "La consultation est terminée. Redirection en cours...";

pub struct ChatView {
    printed: usize,
    warning_visible: bool,
    ended: bool,
    animate: bool,
    spinner: Option<ProgressBar>,
}

impl ChatView {
    /// A view that shows a spinner while the advisor is answering.
    pub fn new() -> Self {
        Self {
            animate: true,
            ..Self::plain()
        }
    }

    /// A view without spinner, for non-interactive output.
    pub fn plain() -> Self {
        Self {
            printed: 0,
            warning_visible: false,
            ended: false,
            animate: false,
            spinner: None,
        }
    }

    pub fn render(&mut self, snapshot: &SessionSnapshot, out: &mut impl Write) -> io::Result<()> {
        let fresh = snapshot.transcript.iter().skip(self.printed);
        let has_fresh = snapshot.transcript.len() > self.printed;
        if has_fresh {
            self.stop_spinner();
        }
        for turn in fresh.filter(|turn| turn.role == Role::Advisor) {
            writeln!(out, "\n  {}\n", format_advisor_turn(turn))?;
        }
        self.printed = snapshot.transcript.len();

        if snapshot.warning_shown && !self.warning_visible {
            writeln!(out, "  {} {}", style("!").yellow().bold(), style(WARNING_NOTICE).yellow())?;
        }
        self.warning_visible = snapshot.warning_shown;

        if snapshot.is_ended() {
            self.stop_spinner();
            if !self.ended {
                self.ended = true;
                writeln!(out, "\n  {}", style(ended_notice(snapshot.end_reason)).dim())?;
            }
        } else if snapshot.is_awaiting_reply() {
            self.start_spinner();
        }
        Ok(())
    }

    /// Explain why a message was not sent.
    pub fn rejected(&self, error: &SessionError, out: &mut impl Write) -> io::Result<()> {
        let text = match error {
            SessionError::Busy => "Le conseiller répond, un instant...",
            SessionError::Ended => "La consultation est terminée.",
            SessionError::EmptyMessage => return Ok(()),
            SessionError::MissingContact(_) => "Coordonnées incomplètes.",
        };
        writeln!(out, "  {}", style(text).dim())
    }

    pub fn finish(&mut self) {
        self.stop_spinner();
    }

    fn start_spinner(&mut self) {
        if !self.animate || self.spinner.is_some() {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("  {spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Le conseiller écrit...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

pub fn format_advisor_turn(turn: &Turn) -> String {
    format!(
        "{} {}",
        style(format!("{}:", turn.role.label())).cyan().bold(),
        turn.text
    )
}

pub fn ended_notice(reason: Option<EndReason>) -> String {
    match reason {
        Some(reason) => format!("{ENDED_NOTICE} ({})", reason.label()),
        None => ENDED_NOTICE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use conseil_types::session::Phase;

    use super::*;

    fn snapshot(phase: Phase, transcript: Vec<Turn>) -> SessionSnapshot {
        // Nil session id
        let mut snap = SessionSnapshot::new(Default::default());
        snap.phase = phase;
        snap.transcript = transcript;
        snap
    }

    fn render(view: &mut ChatView, snap: &SessionSnapshot) -> String {
        let mut out = Vec::new();
        view.render(snap, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_prints_only_new_advisor_turns() {
        let mut view = ChatView::plain();
        let greeting = vec![Turn::advisor("Bonjour Eve")];

        let first = render(&mut view, &snapshot(Phase::Active, greeting.clone()));
        assert!(first.contains("Bonjour Eve"));

        let mut asked = greeting.clone();
        asked.push(Turn::visitor("Aidez-moi"));
        let second = render(&mut view, &snapshot(Phase::AwaitingReply, asked.clone()));
        assert!(!second.contains("Aidez-moi"));
        assert!(!second.contains("Bonjour Eve"));

        asked.push(Turn::advisor("Bien sûr"));
        let third = render(&mut view, &snapshot(Phase::Active, asked));
        assert!(third.contains("Bien sûr"));
    }

    #[test]
    fn test_warning_printed_once() {
        let mut view = ChatView::plain();
        let mut snap = snapshot(Phase::Active, vec![Turn::advisor("Bonjour Eve")]);
        render(&mut view, &snap);

        snap.warning_shown = true;
        assert!(render(&mut view, &snap).contains(WARNING_NOTICE));
        assert!(!render(&mut view, &snap).contains(WARNING_NOTICE));
    }

    #[test]
    fn test_end_notice_carries_reason() {
        let mut view = ChatView::plain();
        let mut snap = snapshot(Phase::Ended, vec![Turn::advisor("Bonjour Eve")]);
        snap.end_reason = Some(EndReason::Inactivity);

        let text = render(&mut view, &snap);
        assert!(text.contains(ENDED_NOTICE));
        assert!(text.contains("Inactivité"));
        assert!(!render(&mut view, &snap).contains(ENDED_NOTICE));
    }

    #[test]
    fn test_busy_rejection_is_explained() {
        let view = ChatView::plain();
        let mut out = Vec::new();
        view.rejected(&SessionError::Busy, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("un instant"));

        let mut out = Vec::new();
        view.rejected(&SessionError::EmptyMessage, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
