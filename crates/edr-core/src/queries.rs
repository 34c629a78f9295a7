//! Query parameter parsing for EDR data endpoints.
//!
//! Position queries arrive as WKT points plus optional `z`, `datetime`
//! and `parameter-name` values. All parsing errors surface as
//! [`EdrError::InvalidCoords`] / [`EdrError::InvalidParameter`] and are
//! mapped to bad-request exception documents at the boundary.

use chrono::{DateTime, Utc};

use crate::errors::EdrError;

/// Parse a WKT `POINT(lon lat)` string.
///
/// Accepts an optional space between the keyword and the parenthesis.
pub fn parse_point_wkt(coords: &str) -> Result<(f64, f64), EdrError> {
    let coords = coords.trim();

    if !coords.to_uppercase().starts_with("POINT") {
        return Err(EdrError::InvalidCoords(
            "expected POINT(lon lat)".to_string(),
        ));
    }

    let start = coords
        .find('(')
        .ok_or_else(|| EdrError::InvalidCoords("missing opening parenthesis".to_string()))?;
    let end = coords
        .find(')')
        .ok_or_else(|| EdrError::InvalidCoords("missing closing parenthesis".to_string()))?;
    if end <= start {
        return Err(EdrError::InvalidCoords(
            "invalid parenthesis order".to_string(),
        ));
    }

    let parts: Vec<&str> = coords[start + 1..end].split_whitespace().collect();
    if parts.len() != 2 {
        return Err(EdrError::InvalidCoords(format!(
            "expected 2 coordinates, got {}",
            parts.len()
        )));
    }

    let lon: f64 = parts[0]
        .parse()
        .map_err(|_| EdrError::InvalidCoords(format!("bad longitude: {}", parts[0])))?;
    let lat: f64 = parts[1]
        .parse()
        .map_err(|_| EdrError::InvalidCoords(format!("bad latitude: {}", parts[1])))?;

    if !(-180.0..=180.0).contains(&lon) {
        return Err(EdrError::InvalidCoords(format!(
            "longitude {} out of range [-180, 180]",
            lon
        )));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(EdrError::InvalidCoords(format!(
            "latitude {} out of range [-90, 90]",
            lat
        )));
    }

    Ok((lon, lat))
}

/// Parse a `z` parameter: a single level or a comma-separated list.
pub fn parse_z(z: &str) -> Result<Vec<f64>, EdrError> {
    z.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| EdrError::InvalidParameter(format!("bad z value: {}", part)))
        })
        .collect()
}

/// Resolve a requested level against the collection's enumerated levels.
///
/// Requesting a level the collection does not carry is a bad request.
pub fn resolve_level(requested: f64, available: &[f64]) -> Result<f64, EdrError> {
    available
        .iter()
        .copied()
        .find(|level| *level == requested)
        .ok_or_else(|| {
            EdrError::InvalidParameter(format!("z={} is not an available level", requested))
        })
}

/// Parse a `parameter-name` list.
pub fn parse_parameter_names(param: &str) -> Vec<String> {
    param
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// A parsed `datetime` query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSelection {
    /// A single instant.
    Instant(DateTime<Utc>),

    /// A comma-separated list of instants.
    List(Vec<DateTime<Utc>>),

    /// An interval, either bound may be open (`..`).
    Interval {
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    },
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, EdrError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| EdrError::InvalidParameter(format!("bad datetime: {}", s)))
}

impl TimeSelection {
    /// Parse a `datetime` parameter.
    ///
    /// Accepted forms:
    /// - instant: `2024-01-01T03:00:00Z`
    /// - list: `2024-01-01T03:00:00Z,2024-01-01T04:00:00Z`
    /// - interval: `2024-01-01T03:00:00Z/2024-01-01T05:00:00Z`,
    ///   with `..` for an open bound on either side
    pub fn parse(datetime: &str) -> Result<Self, EdrError> {
        let datetime = datetime.trim();
        if datetime.is_empty() {
            return Err(EdrError::InvalidParameter("empty datetime".to_string()));
        }

        if datetime.contains('/') && !datetime.contains(',') {
            let parts: Vec<&str> = datetime.split('/').collect();
            if parts.len() != 2 {
                return Err(EdrError::InvalidParameter(
                    "datetime interval must be start/end".to_string(),
                ));
            }
            let start = match parts[0] {
                ".." => None,
                s => Some(parse_instant(s)?),
            };
            let end = match parts[1] {
                ".." => None,
                s => Some(parse_instant(s)?),
            };
            return Ok(TimeSelection::Interval { start, end });
        }

        if datetime.contains(',') {
            let instants = datetime
                .split(',')
                .map(|s| parse_instant(s.trim()))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(TimeSelection::List(instants));
        }

        Ok(TimeSelection::Instant(parse_instant(datetime)?))
    }

    /// Select matching instants from the collection's enumerated times.
    ///
    /// Instants and lists keep the requested order, filtered to those the
    /// collection actually carries; intervals filter the available list in
    /// its own order.
    pub fn select_from(&self, available: &[DateTime<Utc>]) -> Vec<DateTime<Utc>> {
        match self {
            TimeSelection::Instant(t) => available
                .iter()
                .copied()
                .filter(|a| a == t)
                .collect(),
            TimeSelection::List(requested) => requested
                .iter()
                .copied()
                .filter(|t| available.contains(t))
                .collect(),
            TimeSelection::Interval { start, end } => available
                .iter()
                .copied()
                .filter(|t| {
                    start.map_or(true, |s| *t >= s) && end.map_or(true, |e| *t <= e)
                })
                .collect(),
        }
    }
}
