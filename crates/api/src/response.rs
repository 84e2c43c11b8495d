//! The `{ "data": ... }` envelope used by every successful JSON response.

use serde::Serialize;

/// Wraps a payload under a top-level `data` key.
///
/// Error responses never use this shape; [`crate::error::AppError`] renders
/// `{ "error", "code" }` instead, so clients can branch on which key is
/// present.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
