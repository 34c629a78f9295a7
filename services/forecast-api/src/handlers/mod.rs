//! HTTP request handlers.

pub mod collections;
pub mod conformance;
pub mod instances;
pub mod landing;
pub mod locations;
pub mod position;

use axum::http::{header, StatusCode};
use axum::response::Response;
use serde::Serialize;

use edr_core::{media_types, EdrError};

/// Serialize a payload into a JSON response with the given content type.
pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    content_type: &str,
    payload: &T,
) -> Response {
    let body = serde_json::to_string_pretty(payload).unwrap_or_default();

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap()
}

/// Map an error to its exception document response.
///
/// Internal errors are logged here; nothing beyond the generic document
/// reaches the client.
pub(crate) fn exception_response(err: &EdrError) -> Response {
    if err.status_code() >= 500 {
        tracing::error!(error = %err, "internal error while assembling response");
    }

    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(status, media_types::JSON, &err.to_exception())
}
