//! Landing page, conformance and exception documents.

use serde::{Deserialize, Serialize};

use crate::conformance;
use crate::media_types;
use crate::types::Link;

/// Landing page for the API root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandingPage {
    /// Title of the API.
    pub title: String,

    /// Description of the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Links to related resources.
    pub links: Vec<Link>,

    /// Keywords for discovery.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    /// The organization providing the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<Provider>,
}

/// Service provider details.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provider {
    /// Provider name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Provider homepage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl LandingPage {
    /// Create a landing page with the standard link set.
    pub fn new(title: impl Into<String>, description: impl Into<String>, base_url: &str) -> Self {
        let links = vec![
            Link::new(base_url, "self")
                .with_type(media_types::JSON)
                .with_title("this document"),
            Link::new(format!("{}/api", base_url), "service-desc")
                .with_type(media_types::OPENAPI_JSON)
                .with_title("the API definition"),
            Link::new(format!("{}/conformance", base_url), "conformance")
                .with_type(media_types::JSON)
                .with_title("OGC conformance classes implemented by this API"),
            Link::new(format!("{}/collections", base_url), "data")
                .with_title("Metadata about the resource collections"),
        ];

        Self {
            title: title.into(),
            description: Some(description.into()),
            links,
            keywords: None,
            provider: None,
        }
    }

    /// Set the keywords.
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Set the provider.
    pub fn with_provider(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.provider = Some(Provider {
            name: Some(name.into()),
            url: Some(url.into()),
        });
        self
    }
}

/// Conformance declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConformanceClasses {
    /// List of conformance class URIs.
    #[serde(rename = "conformsTo")]
    pub conforms_to: Vec<String>,
}

impl ConformanceClasses {
    /// The conformance classes this implementation declares.
    pub fn current() -> Self {
        Self {
            conforms_to: vec![
                conformance::CORE.to_string(),
                conformance::COMMON_CORE.to_string(),
                conformance::COMMON_COLLECTIONS.to_string(),
                conformance::OAS30.to_string(),
                conformance::COVJSON.to_string(),
                conformance::GEOJSON.to_string(),
            ],
        }
    }

    /// Check if a conformance class is declared.
    pub fn contains(&self, class: &str) -> bool {
        self.conforms_to.iter().any(|c| c == class)
    }
}

/// Structured error document returned for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExceptionDocument {
    /// Machine-readable error code.
    pub code: String,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExceptionDocument {
    /// Create an exception document.
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: Some(description.into()),
        }
    }

    /// A not-found exception.
    pub fn not_found(description: impl Into<String>) -> Self {
        Self::new("not found", description)
    }

    /// An invalid-parameter exception.
    pub fn invalid_parameter(description: impl Into<String>) -> Self {
        Self::new("invalid parameter value", description)
    }

    /// An internal-error exception, with no implementation detail.
    pub fn internal_error() -> Self {
        Self::new("internal error", "Internal server error")
    }
}
