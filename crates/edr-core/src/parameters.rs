//! Parameter metadata for collections and coverages.
//!
//! The same physical variable appears in two shapes: the collection-level
//! summary ([`Parameter`]) under `parameter_names`, and the per-value form
//! ([`CovParameter`]) embedded in encoded coverages. Both are derived from
//! a fixed registry of known parameters; referencing an unregistered key
//! is a caller bug and fails by omission, not at runtime.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Internationalized string supporting multiple languages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum I18nString {
    /// Simple string (assumes English).
    Simple(String),
    /// Map of language codes to strings.
    Localized(HashMap<String, String>),
}

impl I18nString {
    /// Create an English-only i18n string.
    pub fn english(s: &str) -> Self {
        let mut map = HashMap::new();
        map.insert("en".to_string(), s.to_string());
        I18nString::Localized(map)
    }

    /// Get the English text, or any available text.
    pub fn text(&self) -> &str {
        match self {
            I18nString::Simple(s) => s,
            I18nString::Localized(map) => map
                .get("en")
                .map(|s| s.as_str())
                .unwrap_or_else(|| map.values().next().map(|s| s.as_str()).unwrap_or("")),
        }
    }
}

/// The observed property a parameter measures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservedProperty {
    /// URI identifier for the property.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Human-readable label.
    pub label: I18nString,
}

/// Unit of measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    /// Human-readable label for the unit.
    pub label: I18nString,

    /// Symbol with its defining vocabulary URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<UnitSymbol>,
}

/// A unit symbol together with the vocabulary that defines it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitSymbol {
    /// Vocabulary URI for the symbol (e.g., a QUDT unit URI).
    #[serde(rename = "type")]
    pub type_: String,

    /// The symbol itself (e.g., "K").
    pub value: String,
}

/// Collection-level summary form of a parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    /// Always "Parameter".
    #[serde(rename = "type")]
    pub type_: String,

    /// The observed property.
    #[serde(rename = "observedProperty")]
    pub observed_property: ObservedProperty,

    /// Unit of measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

/// Coverage-embedded form of a parameter.
///
/// Same semantic content as [`Parameter`] with the nesting the CoverageJSON
/// schema requires: localized labels throughout and a description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CovParameter {
    /// Always "Parameter".
    #[serde(rename = "type")]
    pub type_: String,

    /// Description of the parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<I18nString>,

    /// The observed property.
    #[serde(rename = "observedProperty")]
    pub observed_property: ObservedProperty,

    /// Unit of measurement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
}

/// Registry entry for a known physical parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDef {
    /// Parameter key (CF standard name).
    pub key: &'static str,

    /// Observed-property vocabulary URI.
    pub property_uri: &'static str,

    /// Short display label.
    pub label: &'static str,

    /// Longer description for coverage payloads.
    pub description: &'static str,

    /// Unit label.
    pub unit_label: &'static str,

    /// Unit symbol.
    pub unit_symbol: &'static str,

    /// Vocabulary URI defining the unit symbol.
    pub unit_uri: &'static str,
}

/// The fixed dictionary of physical parameters this service knows about.
const REGISTRY: &[ParameterDef] = &[
    ParameterDef {
        key: "air_temperature",
        property_uri: "https://vocab.nerc.ac.uk/standard_name/air_temperature/",
        label: "Temperature",
        description: "Air temperature is the bulk temperature of the air, not the surface (skin) temperature.",
        unit_label: "Kelvin",
        unit_symbol: "K",
        unit_uri: "https://qudt.org/vocab/unit/K",
    },
    ParameterDef {
        key: "wind_speed",
        property_uri: "https://vocab.nerc.ac.uk/standard_name/wind_speed/",
        label: "Wind speed",
        description: "Speed is the magnitude of velocity. Wind is defined as a two-dimensional (horizontal) air velocity vector.",
        unit_label: "Metres per second",
        unit_symbol: "m/s",
        unit_uri: "https://qudt.org/vocab/unit/M-PER-SEC",
    },
    ParameterDef {
        key: "air_pressure_at_sea_level",
        property_uri: "https://vocab.nerc.ac.uk/standard_name/air_pressure_at_sea_level/",
        label: "Air pressure at sea level",
        description: "Air pressure at sea level is the quantity often abbreviated as MSLP or PMSL.",
        unit_label: "Pascal",
        unit_symbol: "Pa",
        unit_uri: "https://qudt.org/vocab/unit/PA",
    },
];

impl ParameterDef {
    /// Look up a parameter by key. Unknown keys fail by omission.
    pub fn lookup(key: &str) -> Option<&'static ParameterDef> {
        REGISTRY.iter().find(|def| def.key == key)
    }

    /// All registered parameter keys.
    pub fn keys() -> Vec<&'static str> {
        REGISTRY.iter().map(|def| def.key).collect()
    }

    /// The collection-level summary shape.
    pub fn summary(&self) -> Parameter {
        Parameter {
            type_: "Parameter".to_string(),
            observed_property: ObservedProperty {
                id: Some(self.property_uri.to_string()),
                label: I18nString::Simple(self.label.to_string()),
            },
            unit: Some(Unit {
                label: I18nString::Simple(self.unit_label.to_string()),
                symbol: Some(UnitSymbol {
                    type_: self.unit_uri.to_string(),
                    value: self.unit_symbol.to_string(),
                }),
            }),
        }
    }

    /// The coverage-embedded shape.
    pub fn coverage(&self) -> CovParameter {
        CovParameter {
            type_: "Parameter".to_string(),
            description: Some(I18nString::english(self.description)),
            observed_property: ObservedProperty {
                id: Some(self.property_uri.to_string()),
                label: I18nString::english(self.key),
            },
            unit: Some(Unit {
                label: I18nString::english(self.unit_label),
                symbol: Some(UnitSymbol {
                    type_: self.unit_uri.to_string(),
                    value: self.unit_symbol.to_string(),
                }),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_parameter() {
        let def = ParameterDef::lookup("air_temperature").unwrap();
        assert_eq!(def.unit_symbol, "K");
        assert!(def.property_uri.contains("air_temperature"));
    }

    #[test]
    fn test_lookup_unknown_parameter_fails_by_omission() {
        assert!(ParameterDef::lookup("sea_surface_salinity").is_none());
    }

    #[test]
    fn test_registry_keys_unique() {
        let mut keys = ParameterDef::keys();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn test_summary_shape() {
        let param = ParameterDef::lookup("air_temperature").unwrap().summary();

        let json = serde_json::to_string(&param).unwrap();
        assert!(json.contains("\"type\":\"Parameter\""));
        assert!(json.contains("\"label\":\"Temperature\""));
        assert!(json.contains("\"value\":\"K\""));
        assert!(json.contains("qudt.org"));
    }

    #[test]
    fn test_coverage_shape_is_localized() {
        let param = ParameterDef::lookup("air_temperature").unwrap().coverage();

        assert!(param.description.is_some());
        let json = serde_json::to_string(&param).unwrap();
        assert!(json.contains("\"en\":\"air_temperature\""));
        assert!(json.contains("\"en\":\"Kelvin\""));
        assert!(json.contains("skin"));
    }

    #[test]
    fn test_i18n_string_english() {
        let s = I18nString::english("Temperature");
        assert_eq!(s.text(), "Temperature");

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"en\":\"Temperature\""));
    }

    #[test]
    fn test_i18n_string_simple() {
        let s = I18nString::Simple("Temperature".to_string());
        assert_eq!(s.text(), "Temperature");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"Temperature\"");
    }

    #[test]
    fn test_parameter_roundtrip() {
        let param = ParameterDef::lookup("wind_speed").unwrap().coverage();
        let json = serde_json::to_string(&param).unwrap();
        let parsed: CovParameter = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, param);
    }
}
