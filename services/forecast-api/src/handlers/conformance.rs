//! Conformance endpoint handler.

use axum::http::StatusCode;
use axum::response::Response;

use edr_core::{media_types, ConformanceClasses};

use crate::handlers::json_response;

/// GET /conformance - Conformance classes
pub async fn conformance_handler() -> Response {
    json_response(
        StatusCode::OK,
        media_types::JSON,
        &ConformanceClasses::current(),
    )
}
