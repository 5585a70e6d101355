//! Error types for paydesk-core
//!
//! Every failure a resource service can report maps to one `CoreError`
//! variant. Each variant carries a stable code and a severity so the
//! HTTP layer can pick a status and a log level without matching on
//! messages.

use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Account not found
    AccountNotFound,
    /// Payment not found
    PaymentNotFound,
    /// Validation error
    ValidationError,
    /// Persistence failure
    DatabaseError,
    /// No such route or resource
    NotFound,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::PaymentNotFound => write!(f, "PAYMENT_NOT_FOUND"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::DatabaseError => write!(f, "DATABASE_ERROR"),
            ErrorCode::NotFound => write!(f, "NOT_FOUND"),
        }
    }
}

/// How loudly a failure should be logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The caller addressed a record that does not exist
    Info,
    /// The caller sent unusable input
    Warning,
    /// The store failed
    Error,
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            suggestions: vec![],
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

/// Main error type for paydesk-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Account not found: {id}")]
    AccountNotFound { id: i32 },

    #[error("Payment not found: {id}")]
    PaymentNotFound { id: i32 },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl CoreError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::ValidationError {
            message: message.into(),
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            CoreError::PaymentNotFound { .. } => ErrorCode::PaymentNotFound,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::Database { .. } => ErrorCode::DatabaseError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::AccountNotFound { .. } => ErrorSeverity::Info,
            CoreError::PaymentNotFound { .. } => ErrorSeverity::Info,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::Database { .. } => ErrorSeverity::Error,
        }
    }

    /// Check if the error means the addressed record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::AccountNotFound { .. } | CoreError::PaymentNotFound { .. }
        )
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::AccountNotFound { .. } => details.with_suggestion(
                "Use the /accounts endpoint to list existing accounts.".to_string(),
            ),
            CoreError::PaymentNotFound { .. } => details.with_suggestion(
                "Use the /payments endpoint to list existing payments.".to_string(),
            ),
            _ => details,
        }
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<DbErr> for CoreError {
    fn from(error: DbErr) -> Self {
        CoreError::Database {
            message: error.to_string(),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::AccountNotFound.to_string(), "ACCOUNT_NOT_FOUND");
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(
            serde_json::to_value(ErrorCode::PaymentNotFound).unwrap(),
            serde_json::json!("PAYMENT_NOT_FOUND")
        );
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(CoreError::AccountNotFound { id: 1 }.severity(), ErrorSeverity::Info);
        assert_eq!(CoreError::validation("bad").severity(), ErrorSeverity::Warning);
        let error: CoreError = DbErr::Custom("disk full".to_string()).into();
        assert_eq!(error.severity(), ErrorSeverity::Error);
        assert_eq!(error.code(), ErrorCode::DatabaseError);
    }

    #[test]
    fn test_error_details_not_found() {
        let details = CoreError::PaymentNotFound { id: 42 }.to_details();
        assert_eq!(details.code, ErrorCode::PaymentNotFound);
        assert!(details.message.contains("42"));
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_validation_details_have_no_suggestions() {
        let details = CoreError::validation("name is required").to_details();
        assert_eq!(details.message, "Validation error: name is required");
        let json = serde_json::to_value(&details).unwrap();
        assert!(json.get("suggestions").is_none());
    }
}
