//! Output format selection for data queries.
//!
//! The `f` query parameter wins over the Accept header; only JSON-family
//! formats exist, and anything unrecognized falls back to the default
//! rather than failing the request.

use axum::http::{header, HeaderMap};

use edr_core::media_types;

/// Output format for data query responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// CoverageJSON (default).
    #[default]
    CoverageJson,
    /// GeoJSON.
    GeoJson,
}

impl OutputFormat {
    /// The Content-Type header value for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            OutputFormat::CoverageJson => media_types::COVERAGE_JSON,
            OutputFormat::GeoJson => media_types::GEO_JSON,
        }
    }

    /// Parse the `f` query parameter. Unknown values yield `None` so the
    /// caller can fall back.
    fn from_query_param(f: &str) -> Option<Self> {
        match f.to_ascii_lowercase().as_str() {
            "covjson" | "coveragejson" | media_types::COVERAGE_JSON | media_types::COVERAGE_JSON_VND => {
                Some(OutputFormat::CoverageJson)
            }
            "geojson" | "geo+json" | media_types::GEO_JSON => Some(OutputFormat::GeoJson),
            "json" | media_types::JSON => Some(OutputFormat::CoverageJson),
            _ => None,
        }
    }

    /// Parse an Accept header media type.
    fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            media_types::COVERAGE_JSON | media_types::COVERAGE_JSON_VND | media_types::JSON => {
                Some(OutputFormat::CoverageJson)
            }
            media_types::GEO_JSON => Some(OutputFormat::GeoJson),
            _ => None,
        }
    }
}

/// Pick the output format from the `f` parameter and Accept header.
///
/// Priority: explicit `f` parameter, then the first recognized Accept
/// media type, then CoverageJSON. Never fails.
pub fn negotiate_format(headers: &HeaderMap, f_param: Option<&str>) -> OutputFormat {
    if let Some(format) = f_param
        .filter(|f| !f.is_empty())
        .and_then(OutputFormat::from_query_param)
    {
        return format;
    }

    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");

    for part in accept.split(',') {
        let media_type = part.split(';').next().unwrap_or("").trim();
        if let Some(format) = OutputFormat::from_media_type(media_type) {
            return format;
        }
    }

    OutputFormat::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_accept(accept: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, accept.parse().unwrap());
        headers
    }

    #[test]
    fn test_f_param_wins() {
        let headers = headers_with_accept("application/prs.coverage+json");
        assert_eq!(
            negotiate_format(&headers, Some("geojson")),
            OutputFormat::GeoJson
        );
    }

    #[test]
    fn test_accept_header_used_when_no_f() {
        let headers = headers_with_accept("application/geo+json");
        assert_eq!(negotiate_format(&headers, None), OutputFormat::GeoJson);
    }

    #[test]
    fn test_unrecognized_f_falls_back_to_default() {
        let headers = HeaderMap::new();
        assert_eq!(
            negotiate_format(&headers, Some("netcdf")),
            OutputFormat::CoverageJson
        );
    }

    #[test]
    fn test_empty_f_falls_through_to_accept() {
        let headers = headers_with_accept("application/geo+json");
        assert_eq!(negotiate_format(&headers, Some("")), OutputFormat::GeoJson);
    }

    #[test]
    fn test_json_selects_coverage_json() {
        let headers = HeaderMap::new();
        assert_eq!(
            negotiate_format(&headers, Some("json")),
            OutputFormat::CoverageJson
        );
    }

    #[test]
    fn test_no_preference_defaults_to_coverage_json() {
        assert_eq!(
            negotiate_format(&HeaderMap::new(), None),
            OutputFormat::CoverageJson
        );
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            OutputFormat::CoverageJson.content_type(),
            "application/prs.coverage+json"
        );
        assert_eq!(OutputFormat::GeoJson.content_type(), "application/geo+json");
    }
}
