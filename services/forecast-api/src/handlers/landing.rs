//! Landing page handler.

use axum::extract::Extension;
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;

use edr_core::{media_types, LandingPage};

use crate::handlers::json_response;
use crate::state::AppState;

/// GET / - Landing page
pub async fn landing_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let landing = LandingPage::new(
        "Forecast time-series EDR service",
        "An EDR service serving forecast time-series as CoverageJSON and GeoJSON.",
        &state.base_url,
    )
    .with_keywords(vec!["meteorology".to_string(), "forecast".to_string()])
    .with_provider("MET Norway", "https://met.no");

    json_response(StatusCode::OK, media_types::JSON, &landing)
}

#[cfg(test)]
mod tests {
    use edr_core::LandingPage;

    #[test]
    fn test_landing_page_structure() {
        let landing = LandingPage::new("Test API", "Test description", "http://localhost:8080");

        assert!(landing.links.iter().any(|l| l.rel == "self"));
        assert!(landing.links.iter().any(|l| l.rel == "conformance"));
        assert!(landing.links.iter().any(|l| l.rel == "data"));
        assert!(landing.links.iter().any(|l| l.rel == "service-desc"));
    }
}
