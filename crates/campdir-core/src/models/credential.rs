//! Stored logins the admin keeps on file, such as a camp director's
//! account on a booking system.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationErrors};

/// A stored login. The secret is never part of this type; it is read
/// separately through `reveal_credential`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub id: u64,
    pub camp_id: Option<u64>,
    pub label: String,
    pub username: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Credential as submitted; `id` is `None` for a new record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialInput {
    pub id: Option<u64>,
    pub camp_id: Option<u64>,
    pub label: String,
    pub username: String,
    pub secret: String,
    pub notes: Option<String>,
}

impl CredentialInput {
    /// Trims the text fields and reports every missing one together.
    pub fn validate(&mut self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        self.label = self.label.trim().to_string();
        self.username = self.username.trim().to_string();
        self.notes = self
            .notes
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        if self.label.is_empty() {
            errors.add("label", "Label is required");
        }
        if self.username.is_empty() {
            errors.add("username", "Username is required");
        }
        if self.secret.is_empty() {
            errors.add("secret", "Secret is required");
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirectoryError;

    #[test]
    fn test_credential_input_reports_all_missing_fields() {
        let mut input = CredentialInput {
            label: "  ".to_string(),
            notes: Some("   ".to_string()),
            ..Default::default()
        };
        match input.validate() {
            Err(DirectoryError::Validation { errors }) => assert_eq!(errors.len(), 3),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(input.notes, None);
    }
}
