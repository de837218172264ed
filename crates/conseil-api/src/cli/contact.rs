//! Contact details for `conseil chat`: flags first, prompts for the rest.

use dialoguer::Input;

use conseil_types::contact::ContactMetadata;

use super::ChatArgs;

/// Build metadata from the flags alone. Missing required fields stay empty.
pub fn contact_from_args(args: ChatArgs) -> ContactMetadata {
    ContactMetadata {
        name: args.name.unwrap_or_default(),
        email: args.email.unwrap_or_default(),
        phone: args.phone,
        credit_challenge: args.credit_challenge,
        credit_score: args.credit_score,
        message: args.message,
        source: args.source,
    }
}

/// Resolve the contact details, prompting for a blank name or email when
/// someone is at the terminal.
pub fn resolve_contact(args: ChatArgs) -> anyhow::Result<ContactMetadata> {
    let mut metadata = contact_from_args(args);

    if console::user_attended() {
        if metadata.name.trim().is_empty() {
            metadata.name = Input::<String>::new()
                .with_prompt("Nom complet")
                .interact_text()?;
        }
        if metadata.email.trim().is_empty() {
            metadata.email = Input::<String>::new()
                .with_prompt("Courriel")
                .validate_with(|input: &String| {
                    if input.contains('@') {
                        Ok(())
                    } else {
                        Err("Adresse courriel invalide")
                    }
                })
                .interact_text()?;
        }
    }

    Ok(metadata.validated()?)
}

#[cfg(test)]
mod tests {
    use conseil_types::error::SessionError;

    use super::*;

    #[test]
    fn test_contact_from_args_keeps_optional_fields() {
        let metadata = contact_from_args(ChatArgs {
            name: Some("Eve Tremblay".to_string()),
            email: Some("e@x.com".to_string()),
            source: Some("google".to_string()),
            ..ChatArgs::default()
        });
        assert_eq!(metadata.first_name(), "Eve");
        assert_eq!(metadata.source.as_deref(), Some("google"));
        assert!(metadata.phone.is_none());
    }

    #[test]
    fn test_missing_email_fails_validation() {
        let metadata = contact_from_args(ChatArgs {
            name: Some("Eve".to_string()),
            ..ChatArgs::default()
        });
        assert_eq!(
            metadata.validated().unwrap_err(),
            SessionError::MissingContact("email")
        );
    }
}
