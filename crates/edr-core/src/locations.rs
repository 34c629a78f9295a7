//! Named locations and their GeoJSON listing.
//!
//! Locations let clients query well-known sites by identifier instead of
//! raw coordinates. The set of locations is part of a collection's static
//! configuration.

use serde::{Deserialize, Serialize};

use crate::geojson::{Feature, FeatureCollection, FeatureProperties, Geometry};
use crate::parameters::I18nString;

/// A named location available for location queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// Unique identifier (e.g., "oslo").
    pub id: String,

    /// Human-readable name.
    pub name: String,

    /// Longitude in CRS84.
    pub lon: f64,

    /// Latitude in CRS84.
    pub lat: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lon,
            lat,
        }
    }

    /// Find a location by id within a slice.
    pub fn find<'a>(locations: &'a [Location], id: &str) -> Option<&'a Location> {
        locations.iter().find(|loc| loc.id == id)
    }
}

/// Encode the location listing for a collection.
///
/// Each feature advertises its own query endpoint and the parameters
/// available there, so clients can follow the listing without a second
/// metadata fetch.
pub fn build_location_listing(
    locations: &[Location],
    collection_base: &str,
    parameter_keys: &[String],
) -> FeatureCollection {
    let mut collection = FeatureCollection::new();
    for location in locations {
        let properties = FeatureProperties {
            name: Some(I18nString::english(&location.name)),
            edr_query_endpoint: Some(format!("{}/locations/{}", collection_base, location.id)),
            parameter_name: Some(parameter_keys.to_vec()),
            ..FeatureProperties::default()
        };

        collection = collection.with_feature(
            Feature {
                type_: "Feature".to_string(),
                id: Some(location.id.clone()),
                geometry: Geometry::point(location.lon, location.lat),
                properties,
            },
        );
    }
    collection
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oslo() -> Location {
        Location::new("oslo", "Oslo", 11.0, 60.0)
    }

    #[test]
    fn test_find_location() {
        let locations = vec![oslo(), Location::new("bergen", "Bergen", 5.32, 60.39)];

        assert!(Location::find(&locations, "oslo").is_some());
        assert!(Location::find(&locations, "bergen").is_some());
        assert!(Location::find(&locations, "stavanger").is_none());
    }

    #[test]
    fn test_location_listing() {
        let fc = build_location_listing(
            &[oslo()],
            "http://localhost:8080/collections/MEPS",
            &["air_temperature".to_string()],
        );

        assert_eq!(fc.features.len(), 1);
        let feature = &fc.features[0];
        assert_eq!(feature.id.as_deref(), Some("oslo"));
        assert_eq!(
            feature.properties.edr_query_endpoint.as_deref(),
            Some("http://localhost:8080/collections/MEPS/locations/oslo")
        );
        assert_eq!(
            feature.properties.parameter_name.as_ref().unwrap(),
            &vec!["air_temperature".to_string()]
        );
    }

    #[test]
    fn test_location_listing_serialization() {
        let fc = build_location_listing(
            &[oslo()],
            "http://localhost:8080/collections/MEPS",
            &["air_temperature".to_string()],
        );

        let json = serde_json::to_string(&fc).unwrap();
        assert!(json.contains("\"type\":\"FeatureCollection\""));
        assert!(json.contains("\"edrqueryendpoint\""));
        assert!(json.contains("\"parameter-name\""));
        assert!(json.contains("\"coordinates\":[11.0,60.0]"));
    }

    #[test]
    fn test_location_deserializes_from_config() {
        let yaml_ish = r#"{"id":"oslo","name":"Oslo","lon":11.0,"lat":60.0}"#;
        let loc: Location = serde_json::from_str(yaml_ish).unwrap();
        assert_eq!(loc, oslo());
    }
}
