//! API error model and response envelopes
//!
//! Handlers return `ApiResult<T>`. Errors carry a classification (user or
//! internal), a code, an HTTP status and optional details, and are rendered
//! in one place.

pub mod errors;
pub mod response;

pub use errors::{ApiError, ApiResult, ErrorClass, ErrorCode};
pub use response::{ErrorResponse, SuccessResponse, GENERIC_INTERNAL_MESSAGE};
