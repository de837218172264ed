//! Contact metadata captured by the lead form before a consultation starts.

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Lead fields handed to the session controller at mount time.
///
/// Immutable for the lifetime of a session. Serialized in camelCase because
/// both HTTP collaborators read it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMetadata {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_challenge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ContactMetadata {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_credit_challenge(mut self, challenge: impl Into<String>) -> Self {
        self.credit_challenge = Some(challenge.into());
        self
    }

    pub fn with_credit_score(mut self, score: impl Into<String>) -> Self {
        self.credit_score = Some(score.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Check the mount precondition and normalize optional fields.
    ///
    /// Name and email are required; blank optional fields become `None` and
    /// every field is trimmed.
    pub fn validated(self) -> Result<Self, SessionError> {
        let name = self.name.trim().to_string();
        let email = self.email.trim().to_string();
        if name.is_empty() {
            return Err(SessionError::MissingContact("name"));
        }
        if email.is_empty() {
            return Err(SessionError::MissingContact("email"));
        }

        Ok(Self {
            name,
            email,
            phone: normalize(self.phone),
            credit_challenge: normalize(self.credit_challenge),
            credit_score: normalize(self.credit_score),
            message: normalize(self.message),
            source: normalize(self.source),
        })
    }

    /// First word of the visitor's name, used to personalize greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("Client")
    }
}

fn normalize(field: Option<String>) -> Option<String> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_requires_name_and_email() {
        let err = ContactMetadata::new("  ", "e@x.com").validated().unwrap_err();
        assert!(matches!(err, SessionError::MissingContact("name")));

        let err = ContactMetadata::new("Eve", "").validated().unwrap_err();
        assert!(matches!(err, SessionError::MissingContact("email")));
    }

    #[test]
    fn test_validated_normalizes_optional_fields() {
        let meta = ContactMetadata::new(" Eve Tremblay ", "e@x.com")
            .with_phone("   ")
            .with_source(" hero3 ")
            .validated()
            .unwrap();
        assert_eq!(meta.name, "Eve Tremblay");
        assert_eq!(meta.phone, None);
        assert_eq!(meta.source.as_deref(), Some("hero3"));
        assert_eq!(meta.first_name(), "Eve");
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let meta = ContactMetadata::new("Eve", "e@x.com").with_credit_challenge("Dettes");
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["creditChallenge"], "Dettes");
        assert!(json.get("phone").is_none());
    }
}
