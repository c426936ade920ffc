//! Parents, their messages to camps, and public contact submissions.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::camp::is_state_code;
use crate::error::{Result, ValidationErrors};

/// Delivery outcome recorded on the record that triggered an email.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    #[default]
    Pending,
    Sent,
    Failed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmailStatus::Pending => "pending",
            EmailStatus::Sent => "sent",
            EmailStatus::Failed => "failed",
        }
    }
}

impl FromStr for EmailStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EmailStatus::Pending),
            "sent" => Ok(EmailStatus::Sent),
            "failed" => Ok(EmailStatus::Failed),
            _ => Err(format!("Invalid email status: {s}")),
        }
    }
}

/// A registered parent account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Parent {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub children_count: Option<u32>,
    pub welcome_email_status: EmailStatus,
    pub created_at: Timestamp,
}

impl Parent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Submitted parent registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub children_count: Option<u32>,
}

impl ParentRegistration {
    /// Checks every field and normalizes email and state in place,
    /// reporting all problems together.
    pub fn validate(&mut self) -> Result<()> {
        let mut errors = ValidationErrors::new();

        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_lowercase();

        if self.first_name.is_empty() {
            errors.add("first_name", "First name is required");
        }
        if self.last_name.is_empty() {
            errors.add("last_name", "Last name is required");
        }
        if self.email.is_empty() {
            errors.add("email", "Email is required");
        } else if !is_plausible_email(&self.email) {
            errors.add("email", "Email address is not valid");
        }
        if let Some(state) = self.state.take() {
            let state = state.trim().to_ascii_uppercase();
            if !state.is_empty() {
                if !is_state_code(&state) {
                    errors.add("state", "State must be a two-letter code");
                }
                self.state = Some(state);
            }
        }

        errors.into_result()
    }
}

/// A message a parent sent to a camp's director.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub parent_id: u64,
    pub camp_id: u64,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub created_at: Timestamp,
}

/// Message composed by a parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewMessage {
    pub parent_id: u64,
    pub camp_id: u64,
    pub subject: String,
    pub body: String,
}

impl NewMessage {
    pub fn validate(&mut self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        self.subject = self.subject.trim().to_string();
        if self.subject.is_empty() {
            errors.add("subject", "Subject is required");
        }
        if self.body.trim().is_empty() {
            errors.add("body", "Message body is required");
        }
        errors.into_result()
    }
}

/// Public contact form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl ContactForm {
    pub fn validate(&mut self) -> Result<()> {
        let mut errors = ValidationErrors::new();
        self.name = self.name.trim().to_string();
        self.email = self.email.trim().to_lowercase();

        if self.name.is_empty() {
            errors.add("name", "Name is required");
        }
        if !is_plausible_email(&self.email) {
            errors.add("email", "A valid email address is required");
        }
        if self.message.trim().is_empty() {
            errors.add("message", "Message is required");
        }
        errors.into_result()
    }
}

/// A stored contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactSubmission {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub email_status: EmailStatus,
    pub created_at: Timestamp,
}

/// A single-use password reset token issued to a parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordReset {
    pub parent_id: u64,
    pub token: String,
    pub expires_at: Timestamp,
    pub email_status: EmailStatus,
}

/// Cheap structural check: `local@domain.tld` with no whitespace.
pub fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirectoryError;

    #[test]
    fn test_is_plausible_email() {
        assert!(is_plausible_email("parent@example.com"));
        assert!(is_plausible_email("a.b@mail.example.org"));
        assert!(!is_plausible_email("parent@example"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("parent example@x.com"));
        assert!(!is_plausible_email("a@b@c.com"));
    }

    #[test]
    fn test_registration_collects_all_errors() {
        let mut form = ParentRegistration {
            email: "not-an-email".to_string(),
            state: Some("Texas".to_string()),
            ..Default::default()
        };

        match form.validate() {
            Err(DirectoryError::Validation { errors }) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["first_name", "last_name", "email", "state"]);
            }
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn test_registration_normalizes() {
        let mut form = ParentRegistration {
            first_name: " Ana ".to_string(),
            last_name: "Lopez".to_string(),
            email: " Ana@Example.COM ".to_string(),
            state: Some("ca".to_string()),
            ..Default::default()
        };
        form.validate().expect("valid form");
        assert_eq!(form.first_name, "Ana");
        assert_eq!(form.email, "ana@example.com");
        assert_eq!(form.state.as_deref(), Some("CA"));
    }

    #[test]
    fn test_contact_form_requires_message() {
        let mut form = ContactForm {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            subject: None,
            message: "   ".to_string(),
        };
        assert!(matches!(
            form.validate(),
            Err(DirectoryError::Validation { ref errors }) if errors.len() == 1
        ));
    }
}
