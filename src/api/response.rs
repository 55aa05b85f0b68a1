//! API response types
//!
//! JSON envelopes for every response:
//! - success: `{"status": "success", "data": ...}`
//! - error: `{"status": "error", "errorCode": ..., "message": ..., "details": [...]}`

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ErrorClass, ErrorCode};

/// Message sent in place of any internal error message
pub const GENERIC_INTERNAL_MESSAGE: &str = "Internal server error";

/// Success response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub status: String,
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for SuccessResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status: String,
    pub error_code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ErrorResponse {
    /// Render an API error. Internal errors collapse to a generic body.
    pub fn from_error(err: &ApiError) -> Self {
        match err.class() {
            ErrorClass::User => Self {
                status: "error".to_string(),
                error_code: err.code().code().to_string(),
                message: err.message().to_string(),
                details: err.details().map(|d| d.to_vec()),
            },
            ErrorClass::Internal => Self {
                status: "error".to_string(),
                error_code: ErrorCode::InternalError.code().to_string(),
                message: GENERIC_INTERNAL_MESSAGE.to_string(),
                details: None,
            },
        }
    }
}
