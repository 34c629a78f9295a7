//! Canonical coordinate reference system descriptors.
//!
//! Every axis in a coverage domain is bound to a reference system through a
//! [`ReferenceSystemConnection`]. The descriptors themselves form a small
//! registry: CRS84 for horizontal coordinates, the Gregorian calendar for
//! time, and a parametric pressure CRS for the vertical axis.

use serde::{Deserialize, Serialize};

use crate::parameters::I18nString;

/// URI identifying the CRS84 (WGS84 lon/lat) coordinate reference system.
pub const CRS84_URI: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";

/// WKT for the WGS 84 geographic CRS, used in extents and CRS detail objects.
pub const WGS84_WKT: &str = "GEOGCS[\"WGS 84\",DATUM[\"WGS_1984\",SPHEROID[\"WGS 84\",6378137,298.257223563,AUTHORITY[\"EPSG\",\"7030\"]],AUTHORITY[\"EPSG\",\"6326\"]],PRIMEM[\"Greenwich\",0,AUTHORITY[\"EPSG\",\"8901\"]],UNIT[\"degree\",0.01745329251994328,AUTHORITY[\"EPSG\",\"9122\"]],AUTHORITY[\"EPSG\",\"4326\"]]";

/// Temporal reference system URI advertised in collection extents.
pub const TRS_RFC3339: &str = "https://tools.ietf.org/html/rfc3339#section-5.6";

/// WKT for the parametric pressure-level vertical CRS.
pub const PRESSURE_VRS_WKT: &str = "PARAMETRICCRS[\"WMO standard atmosphere layer 0\",PDATUM[\"Mean Sea Level\",ANCHOR[\"101325 Pa at 15°C\"]],CS[parametric,1],AXIS[\"pressure (Pa)\",up],PARAMETRICUNIT[\"Pascal\",1.0]]";

/// A reference system definition.
///
/// Exactly one variant is populated per instance; the `type` field is the
/// discriminant on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ReferenceSystem {
    /// Temporal reference system.
    #[serde(rename = "TemporalRS")]
    Temporal {
        /// Calendar system (e.g., "Gregorian").
        calendar: String,
    },

    /// Geographic coordinate reference system.
    #[serde(rename = "GeographicCRS")]
    Geographic {
        /// CRS identifier URI.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,

        /// Human-readable description.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<I18nString>,
    },

    /// Vertical reference system.
    #[serde(rename = "VerticalCRS")]
    Vertical {
        /// CRS identifier URI.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,

        /// Human-readable description.
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<I18nString>,
    },
}

impl ReferenceSystem {
    /// The Gregorian calendar temporal reference system.
    pub fn gregorian() -> Self {
        ReferenceSystem::Temporal {
            calendar: "Gregorian".to_string(),
        }
    }

    /// The CRS84 geographic reference system (longitude, latitude).
    pub fn crs84() -> Self {
        ReferenceSystem::Geographic {
            id: Some(CRS84_URI.to_string()),
            description: Some(I18nString::english(
                "WGS84 geographical coordinate system using longitude,latitude as values.",
            )),
        }
    }

    /// The pressure-level vertical reference system.
    pub fn pressure() -> Self {
        ReferenceSystem::Vertical {
            id: None,
            description: Some(I18nString::english(
                "Vertical coordinate system using pressure(Pa) as values.",
            )),
        }
    }
}

/// Binds a subset of domain axes to a reference system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceSystemConnection {
    /// Axes that use this reference system.
    pub coordinates: Vec<String>,

    /// The reference system.
    pub system: ReferenceSystem,
}

impl ReferenceSystemConnection {
    /// Create a new connection.
    pub fn new(coordinates: &[&str], system: ReferenceSystem) -> Self {
        Self {
            coordinates: coordinates.iter().map(|s| s.to_string()).collect(),
            system,
        }
    }
}
