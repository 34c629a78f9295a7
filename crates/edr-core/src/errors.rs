//! EDR error taxonomy.
//!
//! Validation errors are recovered at the request boundary and mapped to
//! the structured exception document before any partial payload is emitted.

use thiserror::Error;

use crate::responses::ExceptionDocument;

/// Errors that can occur while assembling EDR responses.
#[derive(Debug, Error, PartialEq)]
pub enum EdrError {
    /// Collection not found.
    #[error("no such collection id: {0}")]
    CollectionNotFound(String),

    /// Instance not found.
    #[error("no such instance id: {0}")]
    InstanceNotFound(String),

    /// Location not found.
    #[error("no such location id: {0}")]
    LocationNotFound(String),

    /// Query type not supported by the collection.
    #[error("query type {0} not supported by this collection")]
    QueryNotSupported(String),

    /// Malformed coordinate or WKT point.
    #[error("invalid coords: {0}")]
    InvalidCoords(String),

    /// Unsupported or unparsable query parameter (z, datetime, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Internal shape mismatch between a range and its domain.
    ///
    /// A programming error in the data-source adapter; never exposed with
    /// implementation detail.
    #[error("range shape mismatch: {0}")]
    ShapeMismatch(String),
}

impl EdrError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            EdrError::CollectionNotFound(_)
            | EdrError::InstanceNotFound(_)
            | EdrError::LocationNotFound(_)
            | EdrError::QueryNotSupported(_) => 404,
            EdrError::InvalidCoords(_) | EdrError::InvalidParameter(_) => 400,
            EdrError::ShapeMismatch(_) => 500,
        }
    }

    /// Map to the user-facing exception document.
    pub fn to_exception(&self) -> ExceptionDocument {
        match self {
            EdrError::CollectionNotFound(_) => {
                ExceptionDocument::not_found("No such collection id.")
            }
            EdrError::InstanceNotFound(_) => ExceptionDocument::not_found("No such instance id."),
            EdrError::LocationNotFound(_) => ExceptionDocument::not_found("No such location id."),
            EdrError::QueryNotSupported(_) => {
                ExceptionDocument::not_found("Query type not supported by this collection.")
            }
            EdrError::InvalidCoords(msg) | EdrError::InvalidParameter(msg) => {
                ExceptionDocument::invalid_parameter(msg)
            }
            // No implementation detail crosses the boundary.
            EdrError::ShapeMismatch(_) => ExceptionDocument::internal_error(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(EdrError::CollectionNotFound("x".into()).status_code(), 404);
        assert_eq!(EdrError::InstanceNotFound("x".into()).status_code(), 404);
        assert_eq!(EdrError::LocationNotFound("x".into()).status_code(), 404);
        assert_eq!(EdrError::InvalidCoords("x".into()).status_code(), 400);
        assert_eq!(EdrError::InvalidParameter("x".into()).status_code(), 400);
        assert_eq!(EdrError::ShapeMismatch("x".into()).status_code(), 500);
    }

    #[test]
    fn test_not_found_exception_code() {
        let exc = EdrError::CollectionNotFound("GFS".into()).to_exception();
        assert_eq!(exc.code, "not found");
        assert!(exc.description.unwrap().contains("collection"));
    }

    #[test]
    fn test_shape_mismatch_hides_detail() {
        let exc = EdrError::ShapeMismatch("expected 3 values, got 2".into()).to_exception();
        assert_eq!(exc.code, "internal error");
        assert!(!exc.description.unwrap().contains("values"));
    }

    #[test]
    fn test_display() {
        let err = EdrError::InvalidCoords("expected POINT(lon lat)".into());
        assert!(err.to_string().contains("invalid coords"));
    }
}
