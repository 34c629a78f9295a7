//! Position query handler.

use axum::extract::{Extension, Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

use edr_core::queries::{parse_parameter_names, resolve_level};
use edr_core::{
    parse_point_wkt, parse_z, CollectionConfig, Coverage, Domain, EdrError, FeatureCollection,
    TimeSelection,
};

use crate::content_negotiation::{negotiate_format, OutputFormat};
use crate::handlers::{exception_response, json_response};
use crate::state::AppState;

/// Query parameters for position and location endpoints.
#[derive(Debug, Deserialize, Default)]
pub struct PositionParams {
    /// Coordinates as WKT POINT. Required.
    pub coords: Option<String>,

    /// Vertical level.
    pub z: Option<String>,

    /// Datetime instant, list or interval.
    pub datetime: Option<String>,

    /// Parameter name(s) to retrieve.
    #[serde(rename = "parameter-name")]
    pub parameter_name: Option<String>,

    /// Coordinate reference system.
    pub crs: Option<String>,

    /// Output format.
    pub f: Option<String>,
}

/// GET /collections/:collection_id/position
pub async fn position_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(params): Query<PositionParams>,
    headers: HeaderMap,
) -> Response {
    position_query(&state, &collection_id, None, &params, &headers)
}

/// GET /collections/:collection_id/instances/:instance_id/position
pub async fn instance_position_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, instance_id)): Path<(String, String)>,
    Query(params): Query<PositionParams>,
    headers: HeaderMap,
) -> Response {
    position_query(&state, &collection_id, Some(&instance_id), &params, &headers)
}

fn position_query(
    state: &AppState,
    collection_id: &str,
    instance_id: Option<&str>,
    params: &PositionParams,
    headers: &HeaderMap,
) -> Response {
    let format = negotiate_format(headers, params.f.as_deref());

    let Some(config) = state.config.find_collection(collection_id) else {
        return exception_response(&EdrError::CollectionNotFound(collection_id.to_string()));
    };

    if let Some(id) = instance_id {
        if let Err(err) = validate_instance(config, id) {
            return exception_response(&err);
        }
    }

    let coords = match params.coords.as_deref().map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => {
            return exception_response(&EdrError::InvalidCoords(
                "missing required parameter: coords".to_string(),
            ));
        }
    };
    let (lon, lat) = match parse_point_wkt(coords) {
        Ok(point) => point,
        Err(err) => return exception_response(&err),
    };

    if let Some(crs) = params.crs.as_deref() {
        if let Err(err) = validate_crs(crs) {
            return exception_response(&err);
        }
    }

    let coverage = match build_point_series_coverage(
        state,
        config,
        lon,
        lat,
        params.z.as_deref(),
        params.datetime.as_deref(),
        params.parameter_name.as_deref(),
    ) {
        Ok(coverage) => coverage,
        Err(err) => return exception_response(&err),
    };

    respond_with(coverage, format)
}

/// Assemble a PointSeries coverage for a query against a collection.
///
/// Shared with the location handlers, which query by a named point
/// instead of raw coordinates.
pub(crate) fn build_point_series_coverage(
    state: &AppState,
    config: &CollectionConfig,
    lon: f64,
    lat: f64,
    z: Option<&str>,
    datetime: Option<&str>,
    parameter_name: Option<&str>,
) -> Result<Coverage, EdrError> {
    let level = match z {
        Some(raw) => {
            let requested = parse_z(raw)?;
            if requested.len() != 1 {
                return Err(EdrError::InvalidParameter(
                    "exactly one vertical level per query".to_string(),
                ));
            }
            Some(resolve_level(requested[0], &config.levels)?)
        }
        None => config.default_level(),
    };

    let instants: Vec<DateTime<Utc>> = match datetime {
        Some(raw) => {
            let selected = TimeSelection::parse(raw)?.select_from(&config.instants);
            if selected.is_empty() {
                return Err(EdrError::InvalidParameter(
                    "datetime matched no available instant".to_string(),
                ));
            }
            selected
        }
        None => config.instants.clone(),
    };

    let parameters: Vec<String> = match parameter_name {
        Some(raw) => {
            let requested = parse_parameter_names(raw);
            for key in &requested {
                if !config.parameters.contains(key) {
                    return Err(EdrError::InvalidParameter(format!(
                        "parameter {} not available in this collection",
                        key
                    )));
                }
            }
            requested
        }
        None => config.parameters.clone(),
    };

    let mut coverage = Coverage::new(Domain::point_series(lon, lat, &instants, level));
    for key in &parameters {
        let values = state
            .store
            .sample_series(&config.id, key, lon, lat, level, &instants);
        coverage = coverage.with_series(key, values)?;
    }

    Ok(coverage)
}

fn validate_instance(config: &CollectionConfig, instance_id: &str) -> Result<(), EdrError> {
    let reference_time = DateTime::parse_from_rfc3339(instance_id)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            EdrError::InvalidParameter(format!("bad instance id: {}", instance_id))
        })?;

    if !config.reference_times.contains(&reference_time) {
        return Err(EdrError::InstanceNotFound(instance_id.to_string()));
    }
    Ok(())
}

fn validate_crs(crs: &str) -> Result<(), EdrError> {
    match crs {
        "CRS84" | "EPSG:4326" | "http://www.opengis.net/def/crs/OGC/1.3/CRS84" => Ok(()),
        other => Err(EdrError::InvalidParameter(format!(
            "unsupported crs: {}",
            other
        ))),
    }
}

fn respond_with(coverage: Coverage, format: OutputFormat) -> Response {
    match format {
        OutputFormat::CoverageJson => {
            json_response(StatusCode::OK, format.content_type(), &coverage)
        }
        OutputFormat::GeoJson => {
            let features = FeatureCollection::from_coverage(&coverage);
            json_response(StatusCode::OK, format.content_type(), &features)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edr_core::DomainType;

    fn state() -> AppState {
        AppState::demo("http://localhost:8080")
    }

    fn meps(state: &AppState) -> &CollectionConfig {
        state.config.find_collection("MEPS").unwrap()
    }

    #[test]
    fn test_three_timestamps_yield_shape_3() {
        let state = state();
        let coverage = build_point_series_coverage(
            &state,
            meps(&state),
            11.0,
            60.0,
            None,
            Some("2024-01-01T03:00:00Z,2024-01-01T04:00:00Z,2024-01-01T05:00:00Z"),
            None,
        )
        .unwrap();

        assert_eq!(coverage.domain.axes.t.as_ref().unwrap().values.len(), 3);
        let range = &coverage.ranges["air_temperature"];
        assert_eq!(range.shape, vec![3]);
        assert_eq!(range.values.len(), 3);
        assert!(coverage.validate().is_ok());
    }

    #[test]
    fn test_defaults_query_all_instants_and_first_level() {
        let state = state();
        let coverage =
            build_point_series_coverage(&state, meps(&state), 11.0, 60.0, None, None, None)
                .unwrap();

        assert_eq!(coverage.domain.domain_type, DomainType::PointSeries);
        assert_eq!(coverage.domain.axes.t.as_ref().unwrap().values.len(), 3);
        assert_eq!(
            coverage.domain.axes.z.as_ref().unwrap().values,
            vec![100000.0]
        );
    }

    #[test]
    fn test_explicit_level() {
        let state = state();
        let coverage = build_point_series_coverage(
            &state,
            meps(&state),
            11.0,
            60.0,
            Some("50000"),
            None,
            None,
        )
        .unwrap();

        assert_eq!(
            coverage.domain.axes.z.as_ref().unwrap().values,
            vec![50000.0]
        );
    }

    #[test]
    fn test_unavailable_level_is_bad_request() {
        let state = state();
        let err = build_point_series_coverage(
            &state,
            meps(&state),
            11.0,
            60.0,
            Some("85000"),
            None,
            None,
        )
        .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_datetime_outside_collection_is_bad_request() {
        let state = state();
        let err = build_point_series_coverage(
            &state,
            meps(&state),
            11.0,
            60.0,
            None,
            Some("2030-06-01T00:00:00Z"),
            None,
        )
        .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_unknown_parameter_is_bad_request() {
        let state = state();
        let err = build_point_series_coverage(
            &state,
            meps(&state),
            11.0,
            60.0,
            None,
            None,
            Some("soil_moisture"),
        )
        .unwrap_err();

        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_validate_instance() {
        let state = state();
        let config = meps(&state);

        assert!(validate_instance(config, "2024-01-01T00:00:00Z").is_ok());
        assert!(matches!(
            validate_instance(config, "2023-12-31T00:00:00Z"),
            Err(EdrError::InstanceNotFound(_))
        ));
        assert!(matches!(
            validate_instance(config, "not-a-time"),
            Err(EdrError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_validate_crs() {
        assert!(validate_crs("CRS84").is_ok());
        assert!(validate_crs("EPSG:4326").is_ok());
        assert!(validate_crs("EPSG:3857").is_err());
    }

    #[test]
    fn test_geojson_output_has_one_feature_per_instant() {
        let state = state();
        let coverage =
            build_point_series_coverage(&state, meps(&state), 11.0, 60.0, None, None, None)
                .unwrap();

        let features = FeatureCollection::from_coverage(&coverage);
        assert_eq!(features.features.len(), 3);
    }
}
