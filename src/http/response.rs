//! Response contract.
//!
//! - Data present → 200, body in the requested format, matching
//!   content type
//! - Data absent or body empty → 404 with a `{message, error}` body,
//!   also in the requested format
//! - `/api` → 501 plain text

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::{json, Value};

use crate::format::Format;
use crate::http::error::ApiError;

pub const NOT_FOUND_MESSAGE: &str = "Object not found or bad request";
pub const NOT_FOUND_ERROR: &str = "HTTP::Notfound";
pub const NOT_IMPLEMENTED: &str = "Not implemented";

/// Encode a projection result, mapping absence to the 404 contract.
pub fn formatted(format: Format, value: Option<Value>) -> Result<Response, ApiError> {
    let Some(value) = value else {
        return not_found(format);
    };
    let body = format.encode(&value)?;
    if body.is_empty() {
        return not_found(format);
    }
    Ok(encoded(StatusCode::OK, format, body))
}

/// 404 with the structured error body in `format`.
pub fn not_found(format: Format) -> Result<Response, ApiError> {
    let body = format.encode(&json!({
        "message": NOT_FOUND_MESSAGE,
        "error": NOT_FOUND_ERROR,
    }))?;
    Ok(encoded(StatusCode::NOT_FOUND, format, body))
}

pub fn not_implemented() -> Response {
    (StatusCode::NOT_IMPLEMENTED, NOT_IMPLEMENTED).into_response()
}

fn encoded(status: StatusCode, format: Format, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, format.content_type())], body).into_response()
}
