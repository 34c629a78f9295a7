//! OGC API - Environmental Data Retrieval (EDR) resource model and encodings
//!
//! This crate provides the resource model and payload encodings for a
//! read-only EDR service serving forecast time-series: collection metadata
//! (extents, parameter catalogs, hypermedia query links), CoverageJSON
//! documents (domains, axes, reference systems, ranges) and GeoJSON
//! feature collections for named locations.
//!
//! Everything here is a pure transformation over request-scoped inputs;
//! no component performs I/O or retains state across calls.
//!
//! # Example
//!
//! ```rust
//! use edr_core::{CollectionConfig, build_collection};
//!
//! let config = CollectionConfig::demo();
//! let collection = build_collection(&config, "http://localhost:8080");
//! assert_eq!(collection.id, "MEPS");
//! ```

pub mod collections;
pub mod coverage;
pub mod errors;
pub mod geojson;
pub mod locations;
pub mod parameters;
pub mod queries;
pub mod referencing;
pub mod responses;
pub mod types;

// Re-export commonly used types
pub use collections::{
    build_collection, build_instance_collection, Collection, CollectionConfig, CollectionList,
    DataQueries, InstanceList, SupportedQuery,
};
pub use coverage::{Axes, Coverage, Domain, DomainType, NdArray, NumericAxis, TimeAxis};
pub use errors::EdrError;
pub use geojson::{Feature, FeatureCollection, Geometry};
pub use locations::Location;
pub use parameters::{CovParameter, Parameter, ParameterDef};
pub use queries::{parse_point_wkt, parse_z, TimeSelection};
pub use referencing::{ReferenceSystem, ReferenceSystemConnection};
pub use responses::{ConformanceClasses, ExceptionDocument, LandingPage};
pub use types::{Extent, Link, SpatialExtent, TemporalExtent, VerticalExtent};

/// EDR API conformance class URIs declared by this implementation.
pub mod conformance {
    /// Core conformance class
    pub const CORE: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.0/conf/core";
    /// OGC API Common core
    pub const COMMON_CORE: &str = "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/core";
    /// OGC API Common collections
    pub const COMMON_COLLECTIONS: &str =
        "http://www.opengis.net/spec/ogcapi-common-2/1.0/conf/collections";
    /// OpenAPI 3.0 conformance class
    pub const OAS30: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.0/conf/oas30";
    /// CoverageJSON conformance class
    pub const COVJSON: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.0/conf/covjson";
    /// GeoJSON conformance class
    pub const GEOJSON: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.0/conf/geojson";
}

/// Media types used in EDR responses.
pub mod media_types {
    /// CoverageJSON media type
    pub const COVERAGE_JSON: &str = "application/prs.coverage+json";
    /// Alternate CoverageJSON media type some clients send
    pub const COVERAGE_JSON_VND: &str = "application/vnd.cov+json";
    /// GeoJSON media type
    pub const GEO_JSON: &str = "application/geo+json";
    /// JSON media type
    pub const JSON: &str = "application/json";
    /// OpenAPI JSON media type
    pub const OPENAPI_JSON: &str = "application/openapi+json;version=3.0";
}
