//! EDR collection resources and their assembly.
//!
//! A [`Collection`] is assembled fresh per request from its static
//! [`CollectionConfig`]: extent from the configured bbox/instants/levels,
//! the parameter catalog from the registry, and one query affordance per
//! supported query type. Instances (model runs) reuse the same assembler
//! scoped to an instance path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::locations::Location;
use crate::media_types;
use crate::parameters::{Parameter, ParameterDef};
use crate::types::{format_rfc3339, CrsDetail, Extent, Link};

/// Query types a collection can support.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SupportedQuery {
    /// Point sampling by WKT coordinates.
    Position,
    /// Named location listing and lookup.
    Locations,
    /// Model-run instances.
    Instances,
}

/// Static configuration of a collection.
///
/// Everything a collection advertises is derived from this; there is no
/// other source of collection state. Times are threaded through here
/// explicitly rather than living in process-wide constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    /// Unique collection identifier.
    pub id: String,

    /// Human-readable title.
    #[serde(default)]
    pub title: String,

    /// Keywords for discovery.
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Bounding box literal, [west, south, east, north] in CRS order.
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,

    /// The enumerable instants this collection can serve.
    #[serde(default)]
    pub instants: Vec<DateTime<Utc>>,

    /// Model run reference times (the collection's instances).
    #[serde(default)]
    pub reference_times: Vec<DateTime<Utc>>,

    /// Vertical pressure levels in Pa, top of column first.
    #[serde(default)]
    pub levels: Vec<f64>,

    /// Keys into the parameter registry.
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Supported query types, in the order they should be advertised.
    #[serde(default)]
    pub queries: Vec<SupportedQuery>,

    /// Named locations for location queries.
    #[serde(default)]
    pub locations: Vec<Location>,
}

impl CollectionConfig {
    /// The built-in demo collection: a MEPS-style forecast exposing a
    /// short air-temperature time series over the Nordics.
    pub fn demo() -> Self {
        use chrono::TimeZone;

        Self {
            id: "MEPS".to_string(),
            title: "MEPS".to_string(),
            keywords: vec![
                "forecast".to_string(),
                "timeseries".to_string(),
                "nordic".to_string(),
                "air_temperature".to_string(),
            ],
            bbox: Some([-180.0, 90.0, 180.0, -90.0]),
            instants: vec![
                Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 1, 4, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap(),
            ],
            reference_times: vec![Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()],
            levels: vec![100000.0, 50000.0],
            parameters: vec!["air_temperature".to_string()],
            queries: vec![
                SupportedQuery::Position,
                SupportedQuery::Locations,
                SupportedQuery::Instances,
            ],
            locations: vec![Location::new("oslo", "Oslo", 11.0, 60.0)],
        }
    }

    /// The level a query without `z` resolves to.
    pub fn default_level(&self) -> Option<f64> {
        self.levels.first().copied()
    }

    /// Whether this collection supports a query type.
    pub fn supports(&self, query: SupportedQuery) -> bool {
        self.queries.contains(&query)
    }
}

/// An EDR collection resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Collection {
    /// Unique identifier.
    pub id: String,

    /// Human-readable title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Keywords for discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// Links to related resources.
    pub links: Vec<Link>,

    /// Spatial, temporal and vertical extent.
    pub extent: Extent,

    /// Query affordances, keyed by query type.
    pub data_queries: DataQueries,

    /// Supported coordinate reference systems.
    pub crs: Vec<String>,

    /// Supported output formats.
    pub output_formats: Vec<String>,

    /// Parameters available in this collection.
    pub parameter_names: BTreeMap<String, Parameter>,
}

/// The set of query affordances a collection advertises.
///
/// Presence of a key signals support for that query type; unsupported
/// ones are omitted from the payload entirely.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DataQueries {
    /// Position query affordance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<QueryLink>,

    /// Locations query affordance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<QueryLink>,

    /// Instances query affordance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instances: Option<QueryLink>,
}

impl DataQueries {
    /// Build the affordances for a collection path.
    ///
    /// Query types are processed in the order the configuration lists
    /// them, so the advertised set mirrors the configuration rather than
    /// any alphabetical ordering.
    pub fn build(queries: &[SupportedQuery], base_url: &str, collection_path: &str) -> Self {
        let mut data_queries = DataQueries::default();
        for query in queries {
            match query {
                SupportedQuery::Position => {
                    data_queries.position = Some(QueryLink::position(base_url, collection_path));
                }
                SupportedQuery::Locations => {
                    data_queries.locations = Some(QueryLink::locations(base_url, collection_path));
                }
                SupportedQuery::Instances => {
                    data_queries.instances = Some(QueryLink::instances(base_url, collection_path));
                }
            }
        }
        data_queries
    }

    /// Number of advertised query types.
    pub fn len(&self) -> usize {
        [
            self.position.is_some(),
            self.locations.is_some(),
            self.instances.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count()
    }

    /// Whether no query type is advertised.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One query affordance: a link plus its capability metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryLink {
    /// The link carrying the affordance.
    pub link: TemplatedLink,
}

impl QueryLink {
    /// The position query affordance, with a `{coords}` template.
    pub fn position(base_url: &str, collection_path: &str) -> Self {
        Self {
            link: TemplatedLink {
                href: format!(
                    "{}/{}/position?coords={{coords}}",
                    base_url, collection_path
                ),
                rel: "data".to_string(),
                templated: Some(true),
                variables: Some(DataQueryVariables {
                    title: "Position query".to_string(),
                    description: Some(
                        "Query data by a specified geographical point.".to_string(),
                    ),
                    query_type: "position".to_string(),
                    output_formats: Some(output_formats()),
                    default_output_format: Some("CoverageJSON".to_string()),
                    crs_details: Some(vec![CrsDetail::epsg4326()]),
                }),
            },
        }
    }

    /// The locations query affordance.
    pub fn locations(base_url: &str, collection_path: &str) -> Self {
        Self {
            link: TemplatedLink {
                href: format!("{}/{}/locations", base_url, collection_path),
                rel: "data".to_string(),
                templated: None,
                variables: Some(DataQueryVariables {
                    title: "Locations query".to_string(),
                    description: Some(
                        "Query list of geographical locations and data for one of those location."
                            .to_string(),
                    ),
                    query_type: "locations".to_string(),
                    output_formats: Some(output_formats()),
                    default_output_format: Some("CoverageJSON".to_string()),
                    crs_details: Some(vec![CrsDetail::epsg4326()]),
                }),
            },
        }
    }

    /// The instances query affordance.
    pub fn instances(base_url: &str, collection_path: &str) -> Self {
        Self {
            link: TemplatedLink {
                href: format!("{}/{}/instances", base_url, collection_path),
                rel: "data".to_string(),
                templated: None,
                variables: Some(DataQueryVariables {
                    title: "Instances query".to_string(),
                    description: None,
                    query_type: "instances".to_string(),
                    output_formats: None,
                    default_output_format: None,
                    crs_details: None,
                }),
            },
        }
    }
}

/// A link whose href may be a URI template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplatedLink {
    /// The URI, possibly templated.
    pub href: String,

    /// The relationship type.
    pub rel: String,

    /// Whether the href is a URI template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templated: Option<bool>,

    /// Capability metadata for the query behind this link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<DataQueryVariables>,
}

/// Capability metadata describing a query type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataQueryVariables {
    /// Display title.
    pub title: String,

    /// Human description of the query semantics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Query type tag.
    pub query_type: String,

    /// Output formats this query can produce.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_formats: Option<Vec<String>>,

    /// The format used when `f` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_output_format: Option<String>,

    /// CRS options for this query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs_details: Option<Vec<CrsDetail>>,
}

fn output_formats() -> Vec<String> {
    vec!["CoverageJSON".to_string(), "GeoJSON".to_string()]
}

/// Assemble the collection resource for a configuration.
pub fn build_collection(config: &CollectionConfig, base_url: &str) -> Collection {
    let collection_path = format!("collections/{}", config.id);
    assemble(config, base_url, &config.id, &collection_path, &config.queries, None)
}

/// Assemble an instance-scoped collection for a model run.
///
/// The instance is identified by its reference time and lives under the
/// parent collection's `instances` path; it never re-advertises the
/// instances query itself.
pub fn build_instance_collection(
    config: &CollectionConfig,
    base_url: &str,
    reference_time: &DateTime<Utc>,
) -> Collection {
    let instance_id = format_rfc3339(reference_time);
    let collection_path = format!("collections/{}/instances/{}", config.id, instance_id);
    let queries: Vec<SupportedQuery> = config
        .queries
        .iter()
        .copied()
        .filter(|q| *q != SupportedQuery::Instances)
        .collect();

    let mut collection = assemble(
        config,
        base_url,
        &instance_id,
        &collection_path,
        &queries,
        Some(&config.id),
    );
    collection.title = Some(format!("{} {}", config.title, instance_id));
    collection
}

fn assemble(
    config: &CollectionConfig,
    base_url: &str,
    id: &str,
    collection_path: &str,
    queries: &[SupportedQuery],
    parent_id: Option<&str>,
) -> Collection {
    let mut links = vec![Link::new(
        format!("{}/{}", base_url, collection_path),
        "self",
    )
    .with_type(media_types::JSON)];

    for query in queries {
        match query {
            SupportedQuery::Position => links.push(
                Link::new(format!("{}/{}/position", base_url, collection_path), "data")
                    .with_type(media_types::COVERAGE_JSON),
            ),
            SupportedQuery::Locations => links.push(
                Link::new(
                    format!("{}/{}/locations", base_url, collection_path),
                    "data",
                )
                .with_type(media_types::GEO_JSON),
            ),
            SupportedQuery::Instances => links.push(
                Link::new(
                    format!("{}/{}/instances", base_url, collection_path),
                    "data",
                )
                .with_type(media_types::JSON),
            ),
        }
    }

    if let Some(parent) = parent_id {
        links.push(
            Link::new(format!("{}/collections/{}", base_url, parent), "collection")
                .with_type(media_types::JSON),
        );
    }

    let mut parameter_names = BTreeMap::new();
    for key in &config.parameters {
        // Unknown keys fail by omission; registering them is the
        // configuration author's contract.
        if let Some(def) = ParameterDef::lookup(key) {
            parameter_names.insert(key.clone(), def.summary());
        }
    }

    Collection {
        id: id.to_string(),
        title: Some(config.title.clone()),
        keywords: Some(config.keywords.clone()),
        links,
        extent: Extent::from_config(config.bbox, &config.instants, &config.levels),
        data_queries: DataQueries::build(queries, base_url, collection_path),
        crs: vec!["CRS84".to_string()],
        output_formats: output_formats(),
        parameter_names,
    }
}

/// The catalog of all collections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionList {
    /// Links to related resources.
    pub links: Vec<Link>,

    /// The collections.
    pub collections: Vec<Collection>,
}

impl CollectionList {
    /// Create a collection list with its self link.
    pub fn new(collections: Vec<Collection>, base_url: &str) -> Self {
        Self {
            links: vec![Link::new(format!("{}/collections", base_url), "self")
                .with_type(media_types::JSON)],
            collections,
        }
    }
}

/// The instances of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceList {
    /// Links to related resources.
    pub links: Vec<Link>,

    /// One instance-scoped collection per model run.
    pub instances: Vec<Collection>,
}

impl InstanceList {
    /// Create an instance list with its self link.
    pub fn new(instances: Vec<Collection>, base_url: &str, collection_id: &str) -> Self {
        Self {
            links: vec![Link::new(
                format!("{}/collections/{}/instances", base_url, collection_id),
                "self",
            )
            .with_type(media_types::JSON)],
            instances,
        }
    }
}
