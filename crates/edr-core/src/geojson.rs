//! GeoJSON encodings for EDR responses.
//!
//! GeoJSON serves two purposes here: the location listing endpoint returns
//! a FeatureCollection of named sites, and data queries can request
//! `f=geojson` to get per-instant features instead of a coverage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::coverage::Coverage;
use crate::parameters::I18nString;

/// A GeoJSON FeatureCollection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureCollection {
    /// Always "FeatureCollection".
    #[serde(rename = "type")]
    pub type_: String,

    /// Related links.
    pub links: Vec<crate::types::Link>,

    /// The features.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            links: Vec::new(),
            features: Vec::new(),
        }
    }

    /// Add a feature.
    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    /// Encode a PointSeries coverage as one feature per time instant.
    ///
    /// Each feature carries the instant under `datetime` plus one property
    /// per parameter holding the range value at that instant.
    pub fn from_coverage(coverage: &Coverage) -> Self {
        let lon = coverage.domain.axes.x.values.first().copied().unwrap_or(0.0);
        let lat = coverage.domain.axes.y.values.first().copied().unwrap_or(0.0);

        let instants: Vec<String> = coverage
            .domain
            .axes
            .t
            .as_ref()
            .map(|t| t.values.clone())
            .unwrap_or_default();

        let mut collection = Self::new();
        for (index, instant) in instants.iter().enumerate() {
            let mut values = BTreeMap::new();
            for (key, range) in &coverage.ranges {
                if let Some(value) = range.values.get(index) {
                    values.insert(key.clone(), *value);
                }
            }

            collection.features.push(Feature {
                type_: "Feature".to_string(),
                id: None,
                geometry: Geometry::point(lon, lat),
                properties: FeatureProperties {
                    datetime: Some(instant.clone()),
                    values,
                    ..FeatureProperties::default()
                },
            });
        }
        collection
    }
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feature {
    /// Always "Feature".
    #[serde(rename = "type")]
    pub type_: String,

    /// Optional feature identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The geometry of this feature.
    pub geometry: Geometry,

    /// Feature properties.
    pub properties: FeatureProperties,
}

impl Feature {
    /// Create a point feature.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            id: None,
            geometry: Geometry::point(lon, lat),
            properties: FeatureProperties::default(),
        }
    }

    /// Set the feature ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the properties.
    pub fn with_properties(mut self, properties: FeatureProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// GeoJSON geometry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A point geometry.
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: [f64; 2],
    },
}

impl Geometry {
    /// Create a point geometry.
    pub fn point(lon: f64, lat: f64) -> Self {
        Geometry::Point {
            coordinates: [lon, lat],
        }
    }
}

/// Properties of an EDR feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeatureProperties {
    /// Display name of the feature (location listings).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<I18nString>,

    /// Endpoint serving data for this feature (location listings).
    #[serde(rename = "edrqueryendpoint", skip_serializing_if = "Option::is_none")]
    pub edr_query_endpoint: Option<String>,

    /// Parameters available at this feature (location listings).
    #[serde(rename = "parameter-name", skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<Vec<String>>,

    /// Instant this feature's values belong to (data queries).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Parameter values at the instant (data queries).
    #[serde(flatten, default)]
    pub values: BTreeMap<String, f32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::Domain;
    use chrono::{TimeZone, Utc};

    fn sample_coverage() -> Coverage {
        let instants = vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 4, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap(),
        ];
        Coverage::new(Domain::point_series(11.0, 60.0, &instants, None))
            .with_series("air_temperature", vec![-20.8, -20.1, -19.5])
            .unwrap()
    }

    #[test]
    fn test_point_feature_serialization() {
        let feature = Feature::point(11.0, 60.0).with_id("oslo");
        let json = serde_json::to_string(&feature).unwrap();

        assert!(json.contains("\"type\":\"Feature\""));
        assert!(json.contains("\"coordinates\":[11.0,60.0]"));
        assert!(json.contains("\"id\":\"oslo\""));
    }

    #[test]
    fn test_coverage_to_features_one_per_instant() {
        let fc = FeatureCollection::from_coverage(&sample_coverage());

        assert_eq!(fc.features.len(), 3);
        assert_eq!(
            fc.features[0].properties.datetime.as_deref(),
            Some("2024-01-01T03:00:00Z")
        );
        assert_eq!(
            fc.features[0].properties.values.get("air_temperature"),
            Some(&-20.8)
        );
        assert_eq!(
            fc.features[2].properties.values.get("air_temperature"),
            Some(&-19.5)
        );
    }

    #[test]
    fn test_feature_properties_flatten_values() {
        let mut values = BTreeMap::new();
        values.insert("air_temperature".to_string(), -20.8_f32);

        let props = FeatureProperties {
            datetime: Some("2024-01-01T03:00:00Z".to_string()),
            values,
            ..FeatureProperties::default()
        };

        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains("\"air_temperature\":-20.8"));
        assert!(!json.contains("\"values\""));
        assert!(!json.contains("\"name\""));
    }

    #[test]
    fn test_feature_collection_roundtrip() {
        let fc = FeatureCollection::from_coverage(&sample_coverage());
        let json = serde_json::to_string(&fc).unwrap();
        let parsed: FeatureCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fc);
    }
}
