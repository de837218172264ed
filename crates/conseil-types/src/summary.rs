//! End-of-session summary payload and its plain-text rendering.

use std::time::Duration;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::chat::Turn;
use crate::contact::ContactMetadata;
use crate::session::EndReason;

/// Summary handed to the email sink when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// Wall-clock transaction id, `YYYYMMDDHHMMSS`.
    pub submission_id: String,
    pub metadata: ContactMetadata,
    pub transcript: Vec<Turn>,
    pub end_reason: EndReason,
}

/// Response body from the summary sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryAck {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Build a submission id from a timestamp.
///
/// Second resolution only; two sessions ending in the same second share an
/// id. Each session dispatches at most one summary, so this is accepted.
pub fn submission_id_at<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%Y%m%d%H%M%S").to_string()
}

impl ChatSummary {
    /// Email subject line for this summary.
    pub fn subject(&self) -> String {
        let name = if self.metadata.name.is_empty() {
            "Client"
        } else {
            self.metadata.name.as_str()
        };
        format!("Crédit-Action CHAT {name} #{}", self.submission_id)
    }

    /// Plain-text body: client fields, end reason, then the transcript.
    ///
    /// `end_after` is the inactivity delay named in the end-reason line.
    pub fn render_text(&self, end_after: Duration) -> String {
        let meta = &self.metadata;
        let or = |field: &Option<String>, absent: &str| -> String {
            field.clone().unwrap_or_else(|| absent.to_string())
        };

        let mut out = String::new();
        out.push_str(&self.subject());
        out.push_str("\n\nRésumé de consultation chat\n\n");
        out.push_str(&format!("Client: {}\n", meta.name));
        out.push_str(&format!("Courriel: {}\n", meta.email));
        out.push_str(&format!("Téléphone: {}\n", or(&meta.phone, "Non fourni")));
        out.push_str(&format!("Défi: {}\n", or(&meta.credit_challenge, "Non spécifié")));
        out.push_str(&format!("Cote: {}\n", or(&meta.credit_score, "Non spécifié")));
        out.push_str(&format!("Source: {}\n", or(&meta.source, "N/A")));
        out.push_str(&format!("Fin: {}\n", self.end_reason.summary_label(end_after)));
        out.push_str(&format!("Messages échangés: {}\n", self.transcript.len()));
        out.push_str("\nTranscription:\n");

        let lines: Vec<String> = self
            .transcript
            .iter()
            .map(|turn| format!("{}: {}", turn.role.label(), turn.text))
            .collect();
        out.push_str(&lines.join("\n\n"));
        out.push('\n');
        out
    }
}
