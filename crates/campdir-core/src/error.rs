//! Error types for the camp directory library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Comprehensive error type for all directory operations.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Camp not found for the given ID
    #[error("Camp with ID {id} not found")]
    CampNotFound { id: u64 },
    /// Taxonomy term not found in the given taxonomy
    #[error("{taxonomy} term with ID {id} not found")]
    TermNotFound { taxonomy: String, id: u64 },
    /// Any other record (parent, message, FAQ, ...) not found
    #[error("{kind} with ID {id} not found")]
    RecordNotFound { kind: &'static str, id: u64 },
    /// The acting user lacks the capability for the action
    #[error("Not authorized to {action}")]
    Unauthorized { action: String },
    /// Invalid input that halts the operation immediately
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Every problem found while validating a submitted form
    #[error("Validation failed: {}", format_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No XDG data directory available
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Outbound mail delivery errors
    #[error("Mail delivery to {recipient} failed: {reason}")]
    Mail { recipient: String, reason: String },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> DirectoryError {
        DirectoryError::Database {
            message: self.message,
            source,
        }
    }
}

impl DirectoryError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a halting input error for a single field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an authorization error for the named action.
    pub fn unauthorized(action: impl Into<String>) -> Self {
        Self::Unauthorized {
            action: action.into(),
        }
    }

    /// True for errors caused by the caller's input or permissions rather
    /// than by storage or delivery.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized { .. }
                | Self::InvalidInput { .. }
                | Self::Validation { .. }
                | Self::CampNotFound { .. }
                | Self::TermNotFound { .. }
                | Self::RecordNotFound { .. }
        )
    }
}

/// Collects field errors for forms that report every problem at once.
#[derive(Debug, Default)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
        self.0.push(FieldError::new(field, reason));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ok when nothing was collected, otherwise a `Validation` error.
    pub fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DirectoryError::Validation { errors: self.0 })
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| DirectoryError::database(message).with_source(e))
    }
}

/// Result type alias for directory operations
pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "is required");
        errors.add("state", "must be a two-letter code");

        let err = errors.into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("email: is required"));
        assert!(message.contains("state: must be a two-letter code"));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_empty_validation_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_database_error_is_not_client_error() {
        let err = DirectoryError::database("Failed to query camps")
            .with_source(rusqlite::Error::QueryReturnedNoRows);
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("Failed to query camps"));
    }
}
