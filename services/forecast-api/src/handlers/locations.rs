//! Location endpoint handlers.

use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use std::sync::Arc;

use edr_core::collections::SupportedQuery;
use edr_core::locations::build_location_listing;
use edr_core::{media_types, EdrError, FeatureCollection, Location};

use crate::content_negotiation::{negotiate_format, OutputFormat};
use crate::handlers::position::{build_point_series_coverage, PositionParams};
use crate::handlers::{exception_response, json_response};
use crate::state::AppState;

/// GET /collections/:collection_id/locations - List named locations
pub async fn list_locations_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
) -> Response {
    let Some(config) = state.config.find_collection(&collection_id) else {
        return exception_response(&EdrError::CollectionNotFound(collection_id));
    };

    if !config.supports(SupportedQuery::Locations) {
        return exception_response(&EdrError::QueryNotSupported("locations".to_string()));
    }

    let collection_base = format!("{}/collections/{}", state.base_url, config.id);
    let listing = build_location_listing(&config.locations, &collection_base, &config.parameters);

    json_response(StatusCode::OK, media_types::GEO_JSON, &listing)
}

/// GET /collections/:collection_id/locations/:location_id - Data at a location
pub async fn get_location_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, location_id)): Path<(String, String)>,
    Query(params): Query<PositionParams>,
    headers: HeaderMap,
) -> Response {
    let format = negotiate_format(&headers, params.f.as_deref());

    let Some(config) = state.config.find_collection(&collection_id) else {
        return exception_response(&EdrError::CollectionNotFound(collection_id));
    };

    if !config.supports(SupportedQuery::Locations) {
        return exception_response(&EdrError::QueryNotSupported("locations".to_string()));
    }

    let Some(location) = Location::find(&config.locations, &location_id) else {
        return exception_response(&EdrError::LocationNotFound(location_id));
    };

    let coverage = match build_point_series_coverage(
        &state,
        config,
        location.lon,
        location.lat,
        params.z.as_deref(),
        params.datetime.as_deref(),
        params.parameter_name.as_deref(),
    ) {
        Ok(coverage) => coverage,
        Err(err) => return exception_response(&err),
    };

    match format {
        OutputFormat::CoverageJson => {
            json_response(StatusCode::OK, format.content_type(), &coverage)
        }
        OutputFormat::GeoJson => json_response(
            StatusCode::OK,
            format.content_type(),
            &FeatureCollection::from_coverage(&coverage),
        ),
    }
}
