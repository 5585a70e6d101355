//! Error types for paydesk-api

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use paydesk_core::{CoreError, ErrorCode, ErrorDetails, ErrorSeverity};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error {
                CoreError::AccountNotFound { .. } | CoreError::PaymentNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                CoreError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                CoreError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ApiError::NotFound { .. } => ErrorSeverity::Info,
            ApiError::BadRequest { .. } => ErrorSeverity::Warning,
            ApiError::Core(error) => error.severity(),
        }
    }

    /// Body sent to the client. Server faults never leak their message.
    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::NotFound { .. } => ErrorDetails::new(ErrorCode::NotFound, self.to_string()),
            ApiError::BadRequest { .. } => {
                ErrorDetails::new(ErrorCode::ValidationError, self.to_string())
            }
            ApiError::Core(CoreError::Database { .. }) => ErrorDetails::new(
                ErrorCode::DatabaseError,
                "Internal server error".to_string(),
            ),
            ApiError::Core(error) => error.to_details(),
        }
    }

    /// Short message for notifications in the admin pages
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Core(CoreError::ValidationError { message }) => message.clone(),
            ApiError::Core(CoreError::Database { .. }) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// Log at the level matching the severity
    pub fn log(&self) {
        match self.severity() {
            ErrorSeverity::Error => log::error!("{}", self),
            ErrorSeverity::Warning => log::warn!("{}", self),
            ErrorSeverity::Info => log::info!("{}", self),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), Json(self.to_details())).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
