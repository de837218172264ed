//! Transcript turn types for Conseil.
//!
//! A consultation transcript is an ordered list of [`Turn`]s exchanged between
//! the advisor (reply service) and the visitor.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Advisor,
    Visitor,
}

impl Role {
    /// Label used in rendered summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Advisor => "Conseiller",
            Role::Visitor => "Client",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Advisor => write!(f, "advisor"),
            Role::Visitor => write!(f, "visitor"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "advisor" => Ok(Role::Advisor),
            "visitor" => Ok(Role::Visitor),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message in the transcript.
///
/// `text` is never empty: visitor input is trimmed and rejected when blank,
/// and blank advisor replies are replaced by fallback text before a turn is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn advisor(text: impl Into<String>) -> Self {
        Self {
            role: Role::Advisor,
            text: text.into(),
        }
    }

    pub fn visitor(text: impl Into<String>) -> Self {
        Self {
            role: Role::Visitor,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        for role in [Role::Advisor, Role::Visitor] {
            let parsed: Role = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
        assert!("assistant".parse::<Role>().is_err());
    }

    #[test]
    fn test_turn_wire_shape() {
        let json = serde_json::to_value(Turn::visitor("Aidez-moi")).unwrap();
        assert_eq!(json["role"], "visitor");
        assert_eq!(json["text"], "Aidez-moi");
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Advisor.label(), "Conseiller");
        assert_eq!(Role::Visitor.label(), "Client");
    }
}
