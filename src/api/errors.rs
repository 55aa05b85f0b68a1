//! API error model
//!
//! Every failure a handler can produce is an `ApiError`, classified as
//! either user-caused or internal. Errors are returned upward with `?` and
//! rendered exactly once, by the `IntoResponse` impl at the bottom of this
//! file. Internal messages are logged there and never sent to the client.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::response::ErrorResponse;
use crate::auth::AuthError;
use crate::schema::Violation;
use crate::store::StoreError;

/// Who caused an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The client sent something it can fix (4xx)
    User,
    /// A server-side fault (5xx)
    Internal,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorClass::User => write!(f, "USER"),
            ErrorClass::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// API error codes, rendered as `errorCode`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationFailed,
    MalformedBody,
    WeakPassword,
    InvalidCredentials,
    AuthenticationRequired,
    InvalidToken,
    Forbidden,
    AccountSuspended,
    NotFound,
    MethodNotAllowed,
    UsernameTaken,
    EmailTaken,
    ConfigurationError,
    InternalError,
}

impl ErrorCode {
    /// Returns the wire code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MalformedBody => "MALFORMED_BODY",
            ErrorCode::WeakPassword => "WEAK_PASSWORD",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            ErrorCode::InvalidToken => "INVALID_TOKEN",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::AccountSuspended => "ACCOUNT_SUSPENDED",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ErrorCode::UsernameTaken => "USERNAME_TAKEN",
            ErrorCode::EmailTaken => "EMAIL_TAKEN",
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Returns the classification of this code
    pub fn class(&self) -> ErrorClass {
        match self {
            ErrorCode::ConfigurationError | ErrorCode::InternalError => ErrorClass::Internal,
            _ => ErrorClass::User,
        }
    }

    /// Returns the status used when none is given explicitly
    pub fn default_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed | ErrorCode::MalformedBody | ErrorCode::WeakPassword => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::InvalidCredentials | ErrorCode::AuthenticationRequired => {
                StatusCode::UNAUTHORIZED
            }
            ErrorCode::InvalidToken | ErrorCode::Forbidden | ErrorCode::AccountSuspended => {
                StatusCode::FORBIDDEN
            }
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::UsernameTaken | ErrorCode::EmailTaken => StatusCode::CONFLICT,
            ErrorCode::ConfigurationError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Classified API error
#[derive(Debug, Clone)]
pub struct ApiError {
    class: ErrorClass,
    code: ErrorCode,
    message: String,
    status: StatusCode,
    details: Option<Vec<String>>,
}

impl ApiError {
    /// A client-input problem; the message is shown to the caller verbatim
    pub fn user(code: ErrorCode, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            class: ErrorClass::User,
            code,
            message: message.into(),
            status,
            details: None,
        }
    }

    /// A server-side fault; the message is only logged
    pub fn internal(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            class: ErrorClass::Internal,
            code,
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            details: None,
        }
    }

    /// Attach an ordered list of detail strings
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }

    /// Every schema violation of a request body
    pub fn validation_failed(violations: Vec<Violation>) -> Self {
        let details = violations.into_iter().map(|v| v.message).collect();
        Self::user(
            ErrorCode::ValidationFailed,
            StatusCode::BAD_REQUEST,
            "Request validation failed",
        )
        .with_details(details)
    }

    /// Body is not parseable JSON, not an object, or has the wrong content type
    pub fn malformed_body(reason: impl Into<String>) -> Self {
        Self::user(
            ErrorCode::MalformedBody,
            StatusCode::BAD_REQUEST,
            "Malformed request body",
        )
        .with_details(vec![reason.into()])
    }

    pub fn not_found(resource: &str) -> Self {
        Self::user(
            ErrorCode::NotFound,
            StatusCode::NOT_FOUND,
            format!("{} not found", resource),
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::user(
            ErrorCode::MethodNotAllowed,
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
        )
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::user(ErrorCode::Forbidden, StatusCode::FORBIDDEN, message)
    }

    pub fn authentication_required() -> Self {
        Self::from(AuthError::AuthenticationRequired)
    }

    pub fn class(&self) -> ErrorClass {
        self.class
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn details(&self) -> Option<&[String]> {
        self.details.as_deref()
    }

    pub fn is_internal(&self) -> bool {
        self.class == ErrorClass::Internal
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.class, self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = match &err {
            AuthError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AuthError::UsernameTaken => ErrorCode::UsernameTaken,
            AuthError::EmailTaken => ErrorCode::EmailTaken,
            AuthError::WeakPassword(_) => ErrorCode::WeakPassword,
            AuthError::AccountSuspended => ErrorCode::AccountSuspended,
            AuthError::AuthenticationRequired => ErrorCode::AuthenticationRequired,
            AuthError::InvalidToken | AuthError::TokenExpired => ErrorCode::InvalidToken,
            AuthError::Forbidden => ErrorCode::Forbidden,
            AuthError::SigningKeyMissing => ErrorCode::ConfigurationError,
            AuthError::HashingFailed
            | AuthError::TokenGenerationFailed
            | AuthError::Storage(_) => ErrorCode::InternalError,
        };

        if err.is_client_error() {
            let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
            Self::user(code, status, err.to_string())
        } else {
            Self::internal(code, err.to_string())
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::internal(ErrorCode::InternalError, err.to_string())
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// The single error-rendering boundary
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.class {
            ErrorClass::Internal => tracing::error!(
                code = self.code.code(),
                status = self.status.as_u16(),
                details = ?self.details,
                "{}",
                self.message
            ),
            ErrorClass::User => tracing::debug!(
                code = self.code.code(),
                status = self.status.as_u16(),
                "{}",
                self.message
            ),
        }

        let status = self.status;
        (status, Json(ErrorResponse::from_error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_carries_all_violations() {
        let err = ApiError::validation_failed(vec![
            Violation::missing_field("title"),
            Violation::not_in_enum("category", &["science"]),
        ]);

        assert_eq!(err.class(), ErrorClass::User);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code().code(), "VALIDATION_FAILED");
        assert_eq!(
            err.details().unwrap(),
            ["title is required", "category must be one of: science"]
        );
    }

    #[test]
    fn test_malformed_body_is_distinct_from_validation() {
        let err = ApiError::malformed_body("expected value at line 1 column 1");
        assert_eq!(err.code(), ErrorCode::MalformedBody);
        assert_ne!(err.code(), ErrorCode::ValidationFailed);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_auth_error_classification() {
        let err = ApiError::from(AuthError::InvalidToken);
        assert_eq!(err.class(), ErrorClass::User);
        assert_eq!(err.status(), StatusCode::FORBIDDEN);

        let err = ApiError::from(AuthError::UsernameTaken);
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.code(), ErrorCode::UsernameTaken);

        let err = ApiError::from(AuthError::SigningKeyMissing);
        assert!(err.is_internal());
        assert_eq!(err.code(), ErrorCode::ConfigurationError);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_store_error_is_internal() {
        let err = ApiError::from(StoreError::LockPoisoned);
        assert!(err.is_internal());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_code_classes_agree_with_default_status() {
        let codes = [
            ErrorCode::ValidationFailed,
            ErrorCode::MalformedBody,
            ErrorCode::WeakPassword,
            ErrorCode::InvalidCredentials,
            ErrorCode::AuthenticationRequired,
            ErrorCode::InvalidToken,
            ErrorCode::Forbidden,
            ErrorCode::AccountSuspended,
            ErrorCode::NotFound,
            ErrorCode::MethodNotAllowed,
            ErrorCode::UsernameTaken,
            ErrorCode::EmailTaken,
            ErrorCode::ConfigurationError,
            ErrorCode::InternalError,
        ];

        for code in codes {
            let internal = code.default_status().is_server_error();
            assert_eq!(internal, code.class() == ErrorClass::Internal, "{}", code);
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::not_found("Article").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::internal(ErrorCode::InternalError, "db down").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
