//! Core EDR types shared across the resource model.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::referencing::{PRESSURE_VRS_WKT, TRS_RFC3339, WGS84_WKT};

/// Format a timestamp the way every EDR payload in this crate does.
pub fn format_rfc3339(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// A hyperlink to a related resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "data", "conformance").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Whether the href is a URI template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
            templated: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Mark as a URI template.
    pub fn templated(mut self) -> Self {
        self.templated = Some(true);
        self
    }
}

/// The spatial, temporal and vertical extent of a collection.
///
/// A queryable collection carries at least one populated sub-extent;
/// missing configuration yields an absent sub-extent, never a zero-valued
/// placeholder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Extent {
    /// The spatial extent of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial: Option<SpatialExtent>,

    /// The temporal extent of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,

    /// The vertical extent of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical: Option<VerticalExtent>,
}

impl Extent {
    /// Build an extent from a collection's static configuration.
    ///
    /// Absent configuration pieces produce absent sub-extents.
    pub fn from_config(
        bbox: Option<[f64; 4]>,
        instants: &[DateTime<Utc>],
        levels: &[f64],
    ) -> Self {
        Self {
            spatial: bbox.map(SpatialExtent::from_bbox),
            temporal: TemporalExtent::from_instants(instants),
            vertical: VerticalExtent::from_levels(levels),
        }
    }

    /// True when at least one sub-extent is populated.
    pub fn has_any(&self) -> bool {
        self.spatial.is_some() || self.temporal.is_some() || self.vertical.is_some()
    }
}

/// Spatial extent with bounding box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes in the order the configuration provides them.
    pub bbox: Vec<[f64; 4]>,

    /// Coordinate reference system, as WKT.
    pub crs: String,
}

impl SpatialExtent {
    /// Create a spatial extent from a bbox literal.
    ///
    /// The bbox is passed through unmodified; axis order is the caller's
    /// contract with its clients, not reordered here.
    pub fn from_bbox(bbox: [f64; 4]) -> Self {
        Self {
            bbox: vec![bbox],
            crs: WGS84_WKT.to_string(),
        }
    }
}

/// Temporal extent with time intervals and enumerated instants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Time intervals as [start, end] pairs (RFC 3339).
    pub interval: Vec<[String; 2]>,

    /// Enumerated instants available in the collection, when the
    /// queryable times are discrete (e.g. forecast steps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    /// Temporal reference system URI.
    pub trs: String,
}

impl TemporalExtent {
    /// Build from enumerated instants; `None` when the list is empty.
    ///
    /// The interval is always the `[min, max]` pair of the instants.
    pub fn from_instants(instants: &[DateTime<Utc>]) -> Option<Self> {
        let min = instants.iter().min()?;
        let max = instants.iter().max()?;

        Some(Self {
            interval: vec![[format_rfc3339(min), format_rfc3339(max)]],
            values: Some(instants.iter().map(format_rfc3339).collect()),
            trs: TRS_RFC3339.to_string(),
        })
    }

    /// Build from an explicit closed interval, without enumerated values.
    pub fn from_interval(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Self {
        Self {
            interval: vec![[format_rfc3339(start), format_rfc3339(end)]],
            values: None,
            trs: TRS_RFC3339.to_string(),
        }
    }
}

/// Vertical extent with pressure-level intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VerticalExtent {
    /// Level intervals as [top, bottom] pairs, in configuration order.
    pub interval: Vec<[f64; 2]>,

    /// Enumerated levels available in the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,

    /// Vertical reference system, as WKT.
    pub vrs: String,
}

impl VerticalExtent {
    /// Build from enumerated levels; `None` when the list is empty.
    ///
    /// Levels keep their configured order (pressure levels run top of the
    /// atmosphere column first), so the interval is [first, last] as given.
    pub fn from_levels(levels: &[f64]) -> Option<Self> {
        let first = *levels.first()?;
        let last = *levels.last()?;

        Some(Self {
            interval: vec![[first, last]],
            values: Some(levels.to_vec()),
            vrs: PRESSURE_VRS_WKT.to_string(),
        })
    }
}

/// A coordinate reference system option advertised in query capabilities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrsDetail {
    /// The CRS identifier (e.g., "EPSG:4326").
    pub crs: String,

    /// WKT representation.
    pub wkt: String,
}

impl CrsDetail {
    /// EPSG:4326 with its WGS 84 WKT.
    pub fn epsg4326() -> Self {
        Self {
            crs: "EPSG:4326".to_string(),
            wkt: WGS84_WKT.to_string(),
        }
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
    fn test_link_builder() {
        let link = Link::new("http://example.com/data", "data")
            .with_type("application/json")
            .with_title("Data endpoint")
            .templated();

        assert_eq!(link.href, "http://example.com/data");
        assert_eq!(link.rel, "data");
        assert_eq!(link.templated, Some(true));
    }

    #[test]
    fn test_link_serialization_skips_absent_fields() {
        let link = Link::new("http://example.com", "self").with_type("application/json");

        let json = serde_json::to_string(&link).unwrap();
        assert!(json.contains("\"type\":\"application/json\""));
        assert!(!json.contains("\"title\""));
        assert!(!json.contains("\"templated\""));
    }

    #[test]
    fn test_spatial_extent_bbox_pass_through() {
        // Axis order is a pass-through contract, even when it looks odd.
        let spatial = SpatialExtent::from_bbox([-180.0, 90.0, 180.0, -90.0]);
        assert_eq!(spatial.bbox, vec![[-180.0, 90.0, 180.0, -90.0]]);
        assert!(spatial.crs.contains("WGS 84"));
    }

    #[test]
    fn test_temporal_extent_interval_is_min_max() {
        // Deliberately unsorted input
        let times = vec![instants()[2], instants()[0], instants()[1]];
        let temporal = TemporalExtent::from_instants(&times).unwrap();

        assert_eq!(
            temporal.interval,
            vec![[
                "2024-01-01T03:00:00Z".to_string(),
                "2024-01-01T05:00:00Z".to_string()
            ]]
        );
        // values preserve input order
        assert_eq!(
            temporal.values.unwrap(),
            vec![
                "2024-01-01T05:00:00Z",
                "2024-01-01T03:00:00Z",
                "2024-01-01T04:00:00Z"
            ]
        );
    }

    #[test]
    fn test_temporal_extent_empty_is_none() {
        assert!(TemporalExtent::from_instants(&[]).is_none());
    }

    #[test]
    fn test_vertical_extent_keeps_configured_order() {
        let vertical = VerticalExtent::from_levels(&[100000.0, 50000.0]).unwrap();
        assert_eq!(vertical.interval, vec![[100000.0, 50000.0]]);
        assert_eq!(vertical.values.unwrap(), vec![100000.0, 50000.0]);
        assert!(vertical.vrs.contains("PARAMETRICCRS"));
    }

    #[test]
    fn test_extent_from_config() {
        let extent = Extent::from_config(
            Some([-180.0, 90.0, 180.0, -90.0]),
            &instants(),
            &[100000.0, 50000.0],
        );

        assert!(extent.spatial.is_some());
        assert!(extent.temporal.is_some());
        assert!(extent.vertical.is_some());
        assert!(extent.has_any());
    }

    #[test]
    fn test_extent_missing_config_yields_absent_sub_extents() {
        let extent = Extent::from_config(None, &[], &[]);
        assert!(extent.spatial.is_none());
        assert!(extent.temporal.is_none());
        assert!(extent.vertical.is_none());
        assert!(!extent.has_any());

        let json = serde_json::to_string(&extent).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_rfc3339_round_trip() {
        let times = instants();
        let temporal = TemporalExtent::from_instants(&times).unwrap();

        let reparsed: Vec<DateTime<Utc>> = temporal
            .values
            .unwrap()
            .iter()
            .map(|s| {
                DateTime::parse_from_rfc3339(s)
                    .unwrap()
                    .with_timezone(&Utc)
            })
            .collect();
        assert_eq!(reparsed, times);
    }
}
