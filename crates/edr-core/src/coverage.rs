//! CoverageJSON encoding: domains, axes and ranges.
//!
//! A coverage document pairs a [`Domain`] (the coordinate space) with one
//! [`NdArray`] range per parameter. Axis coordinates are `f64`; range
//! sample values are `f32`, matching the precision of the upstream store.
//!
//! See: <https://covjson.org/>

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::EdrError;
use crate::parameters::{CovParameter, ParameterDef};
use crate::referencing::{ReferenceSystem, ReferenceSystemConnection};
use crate::types::format_rfc3339;

/// An axis holding numeric coordinate values (x, y, z).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NumericAxis {
    /// Ordered coordinate values.
    pub values: Vec<f64>,
}

impl NumericAxis {
    /// Single-point axis.
    pub fn single(value: f64) -> Self {
        Self {
            values: vec![value],
        }
    }
}

/// An axis holding RFC 3339 timestamp strings (t).
///
/// Timestamps stay strings on the wire to remain diff-friendly and
/// locale-independent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeAxis {
    /// Ordered timestamps.
    pub values: Vec<String>,
}

impl TimeAxis {
    /// Build from instants, preserving order.
    pub fn from_instants(instants: &[DateTime<Utc>]) -> Self {
        Self {
            values: instants.iter().map(format_rfc3339).collect(),
        }
    }
}

/// The axis set of a domain.
///
/// x and y are always present; z only for 3-D queries, t only for
/// time-varying ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Axes {
    /// Horizontal axis (longitude).
    pub x: NumericAxis,

    /// Horizontal axis (latitude).
    pub y: NumericAxis,

    /// Vertical axis (pressure levels).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<NumericAxis>,

    /// Temporal axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub t: Option<TimeAxis>,
}

impl Axes {
    /// Whether an axis with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        match name {
            "x" | "y" => true,
            "z" => self.z.is_some(),
            "t" => self.t.is_some(),
            _ => false,
        }
    }

    /// Number of values on the named axis, if present.
    pub fn len_of(&self, name: &str) -> Option<usize> {
        match name {
            "x" => Some(self.x.values.len()),
            "y" => Some(self.y.values.len()),
            "z" => self.z.as_ref().map(|a| a.values.len()),
            "t" => self.t.as_ref().map(|a| a.values.len()),
            _ => None,
        }
    }
}

/// Domain types produced by this service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum DomainType {
    /// A single point at a single time.
    Point,
    /// A time series at a single point.
    PointSeries,
}

/// The coordinate space a coverage's values are defined over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Domain {
    /// Always "Domain".
    #[serde(rename = "type")]
    pub type_: String,

    /// The domain type tag.
    #[serde(rename = "domainType")]
    pub domain_type: DomainType,

    /// Axis definitions.
    pub axes: Axes,

    /// Reference-system bindings, in fixed order: spatial, temporal,
    /// vertical. Tooling renders the first entry as primary.
    pub referencing: Vec<ReferenceSystemConnection>,
}

impl Domain {
    /// Build a PointSeries domain: a time series at one horizontal point,
    /// optionally on one vertical level.
    pub fn point_series(lon: f64, lat: f64, instants: &[DateTime<Utc>], z: Option<f64>) -> Self {
        let axes = Axes {
            x: NumericAxis::single(lon),
            y: NumericAxis::single(lat),
            z: z.map(NumericAxis::single),
            t: Some(TimeAxis::from_instants(instants)),
        };

        let mut referencing = vec![
            ReferenceSystemConnection::new(&["x", "y"], ReferenceSystem::crs84()),
            ReferenceSystemConnection::new(&["t"], ReferenceSystem::gregorian()),
        ];
        if z.is_some() {
            referencing.push(ReferenceSystemConnection::new(
                &["z"],
                ReferenceSystem::pressure(),
            ));
        }

        Self {
            type_: "Domain".to_string(),
            domain_type: DomainType::PointSeries,
            axes,
            referencing,
        }
    }

    /// Build a Point domain: one horizontal point, no time axis.
    pub fn point(lon: f64, lat: f64, z: Option<f64>) -> Self {
        let mut referencing = vec![ReferenceSystemConnection::new(
            &["x", "y"],
            ReferenceSystem::crs84(),
        )];
        if z.is_some() {
            referencing.push(ReferenceSystemConnection::new(
                &["z"],
                ReferenceSystem::pressure(),
            ));
        }

        Self {
            type_: "Domain".to_string(),
            domain_type: DomainType::Point,
            axes: Axes {
                x: NumericAxis::single(lon),
                y: NumericAxis::single(lat),
                z: z.map(NumericAxis::single),
                t: None,
            },
            referencing,
        }
    }

    /// Check that every axis named by the referencing entries exists.
    pub fn validate(&self) -> Result<(), EdrError> {
        for connection in &self.referencing {
            for coordinate in &connection.coordinates {
                if !self.axes.contains(coordinate) {
                    return Err(EdrError::ShapeMismatch(format!(
                        "referencing names absent axis {}",
                        coordinate
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A shaped, axis-ordered numeric array holding a coverage range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdArray {
    /// Always "NdArray".
    #[serde(rename = "type")]
    pub type_: String,

    /// Data type of the values.
    #[serde(rename = "dataType")]
    pub data_type: String,

    /// Axis names, slowest-varying first (C order).
    #[serde(rename = "axisNames")]
    pub axis_names: Vec<String>,

    /// Shape of the array, matching `axis_names` position by position.
    pub shape: Vec<usize>,

    /// Flattened values in C order.
    pub values: Vec<f32>,
}

impl NdArray {
    /// Create an array, enforcing the shape invariants up front.
    ///
    /// A mismatch is a programming error in the data-source adapter and
    /// fails here rather than being truncated or padded.
    pub fn new(
        values: Vec<f32>,
        shape: Vec<usize>,
        axis_names: Vec<String>,
    ) -> Result<Self, EdrError> {
        if axis_names.len() != shape.len() {
            return Err(EdrError::ShapeMismatch(format!(
                "{} axis names for {} shape entries",
                axis_names.len(),
                shape.len()
            )));
        }

        let expected: usize = shape.iter().product();
        if expected != values.len() {
            return Err(EdrError::ShapeMismatch(format!(
                "shape {:?} implies {} values, got {}",
                shape,
                expected,
                values.len()
            )));
        }

        Ok(Self {
            type_: "NdArray".to_string(),
            data_type: "float".to_string(),
            axis_names,
            shape,
            values,
        })
    }

    /// Create a 1-D array along the time axis.
    pub fn time_series(values: Vec<f32>) -> Self {
        let shape = vec![values.len()];
        Self {
            type_: "NdArray".to_string(),
            data_type: "float".to_string(),
            axis_names: vec!["t".to_string()],
            shape,
            values,
        }
    }
}

/// A complete CoverageJSON document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Coverage {
    /// Always "Coverage".
    #[serde(rename = "type")]
    pub type_: String,

    /// The domain the ranges are defined over.
    pub domain: Domain,

    /// Parameter definitions, one per range.
    pub parameters: BTreeMap<String, CovParameter>,

    /// Data ranges keyed by parameter name.
    pub ranges: BTreeMap<String, NdArray>,
}

impl Coverage {
    /// Create an empty coverage over a domain.
    pub fn new(domain: Domain) -> Self {
        Self {
            type_: "Coverage".to_string(),
            domain,
            parameters: BTreeMap::new(),
            ranges: BTreeMap::new(),
        }
    }

    /// Attach a time-series range for a registered parameter.
    ///
    /// The values must line up one-to-one with the domain's t axis.
    /// Unregistered keys are omitted (caller contract, not a user error).
    pub fn with_series(mut self, key: &str, values: Vec<f32>) -> Result<Self, EdrError> {
        let Some(def) = ParameterDef::lookup(key) else {
            return Ok(self);
        };

        let t_len = self.domain.axes.len_of("t").unwrap_or(1);
        if values.len() != t_len {
            return Err(EdrError::ShapeMismatch(format!(
                "t axis has {} instants, range has {} values",
                t_len,
                values.len()
            )));
        }

        self.parameters.insert(key.to_string(), def.coverage());
        self.ranges.insert(key.to_string(), NdArray::time_series(values));
        Ok(self)
    }

    /// Check the document invariants: a valid domain, range shapes that
    /// multiply out, and a parameters/ranges key bijection.
    pub fn validate(&self) -> Result<(), EdrError> {
        self.domain.validate()?;

        for (key, range) in &self.ranges {
            if !self.parameters.contains_key(key) {
                return Err(EdrError::ShapeMismatch(format!(
                    "range {} has no parameter entry",
                    key
                )));
            }
            let expected: usize = range.shape.iter().product();
            if expected != range.values.len() {
                return Err(EdrError::ShapeMismatch(format!(
                    "range {} shape/values mismatch",
                    key
                )));
            }
        }
        for key in self.parameters.keys() {
            if !self.ranges.contains_key(key) {
                return Err(EdrError::ShapeMismatch(format!(
                    "parameter {} has no range entry",
                    key
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instants() -> Vec<DateTime<Utc>> {
        vec![
            Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 4, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap(),
        ]
    }

    #[test]
    fn test_point_series_domain() {
        let domain = Domain::point_series(11.0, 60.0, &instants(), Some(100000.0));

        assert_eq!(domain.domain_type, DomainType::PointSeries);
        assert_eq!(domain.axes.x.values, vec![11.0]);
        assert_eq!(domain.axes.y.values, vec![60.0]);
        assert_eq!(domain.axes.z.as_ref().unwrap().values, vec![100000.0]);
        assert_eq!(domain.axes.t.as_ref().unwrap().values.len(), 3);
        assert!(domain.validate().is_ok());
    }

    #[test]
    fn test_referencing_order_spatial_temporal_vertical() {
        let domain = Domain::point_series(11.0, 60.0, &instants(), Some(100000.0));

        assert_eq!(domain.referencing.len(), 3);
        assert_eq!(domain.referencing[0].coordinates, vec!["x", "y"]);
        assert_eq!(domain.referencing[1].coordinates, vec!["t"]);
        assert_eq!(domain.referencing[2].coordinates, vec!["z"]);
    }

    #[test]
    fn test_domain_without_z_omits_vertical_referencing() {
        let domain = Domain::point_series(11.0, 60.0, &instants(), None);

        assert!(domain.axes.z.is_none());
        assert_eq!(domain.referencing.len(), 2);

        let json = serde_json::to_string(&domain).unwrap();
        assert!(!json.contains("\"z\""));
        assert!(json.contains("\"domainType\":\"PointSeries\""));
    }

    #[test]
    fn test_domain_validate_catches_dangling_reference() {
        let mut domain = Domain::point_series(11.0, 60.0, &instants(), None);
        domain.referencing.push(ReferenceSystemConnection::new(
            &["z"],
            ReferenceSystem::pressure(),
        ));

        assert!(domain.validate().is_err());
    }

    #[test]
    fn test_time_axis_round_trips_rfc3339() {
        let times = instants();
        let axis = TimeAxis::from_instants(&times);

        let reparsed: Vec<DateTime<Utc>> = axis
            .values
            .iter()
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .unwrap()
                    .with_timezone(&Utc)
            })
            .collect();
        assert_eq!(reparsed, times);
    }

    #[test]
    fn test_ndarray_invariants() {
        let arr = NdArray::new(
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            vec![2, 3],
            vec!["t".to_string(), "z".to_string()],
        )
        .unwrap();

        assert_eq!(arr.shape.iter().product::<usize>(), arr.values.len());
        assert_eq!(arr.axis_names.len(), arr.shape.len());
    }

    #[test]
    fn test_ndarray_rejects_bad_shape() {
        let err = NdArray::new(vec![1.0, 2.0], vec![3], vec!["t".to_string()]).unwrap_err();
        assert!(matches!(err, EdrError::ShapeMismatch(_)));
    }

    #[test]
    fn test_ndarray_rejects_axis_name_count_mismatch() {
        let err = NdArray::new(
            vec![1.0, 2.0, 3.0],
            vec![3],
            vec!["t".to_string(), "z".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, EdrError::ShapeMismatch(_)));
    }

    #[test]
    fn test_ndarray_time_series() {
        let arr = NdArray::time_series(vec![-20.8, -20.1, -19.5]);
        assert_eq!(arr.shape, vec![3]);
        assert_eq!(arr.axis_names, vec!["t"]);
        assert_eq!(arr.data_type, "float");
    }

    #[test]
    fn test_coverage_with_series() {
        let coverage = Coverage::new(Domain::point_series(11.0, 60.0, &instants(), None))
            .with_series("air_temperature", vec![-20.8, -20.1, -19.5])
            .unwrap();

        assert!(coverage.parameters.contains_key("air_temperature"));
        assert_eq!(
            coverage.ranges["air_temperature"].values,
            vec![-20.8, -20.1, -19.5]
        );
        assert_eq!(coverage.ranges["air_temperature"].shape, vec![3]);
        assert!(coverage.validate().is_ok());
    }

    #[test]
    fn test_coverage_rejects_length_mismatch() {
        let err = Coverage::new(Domain::point_series(11.0, 60.0, &instants(), None))
            .with_series("air_temperature", vec![-20.8, -20.1])
            .unwrap_err();
        assert!(matches!(err, EdrError::ShapeMismatch(_)));
    }

    #[test]
    fn test_coverage_omits_unregistered_parameter() {
        let coverage = Coverage::new(Domain::point_series(11.0, 60.0, &instants(), None))
            .with_series("not_a_parameter", vec![1.0, 2.0, 3.0])
            .unwrap();

        assert!(coverage.parameters.is_empty());
        assert!(coverage.ranges.is_empty());
    }

    #[test]
    fn test_coverage_parameter_range_bijection() {
        let coverage = Coverage::new(Domain::point_series(11.0, 60.0, &instants(), None))
            .with_series("air_temperature", vec![-20.8, -20.1, -19.5])
            .unwrap()
            .with_series("wind_speed", vec![3.2, 4.0, 5.1])
            .unwrap();

        let param_keys: Vec<_> = coverage.parameters.keys().collect();
        let range_keys: Vec<_> = coverage.ranges.keys().collect();
        assert_eq!(param_keys, range_keys);
        assert!(coverage.validate().is_ok());
    }

    #[test]
    fn test_coverage_serialization() {
        let coverage = Coverage::new(Domain::point_series(11.0, 60.0, &instants(), Some(100000.0)))
            .with_series("air_temperature", vec![-20.8, -20.1, -19.5])
            .unwrap();

        let json = serde_json::to_string(&coverage).unwrap();
        assert!(json.contains("\"type\":\"Coverage\""));
        assert!(json.contains("\"domainType\":\"PointSeries\""));
        assert!(json.contains("\"dataType\":\"float\""));
        assert!(json.contains("2024-01-01T03:00:00Z"));

        let parsed: Coverage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, coverage);
    }
}
