//! The data-source adapter.
//!
//! The numerical store behind this service is an external collaborator;
//! the trait below is its query interface. The in-tree implementation
//! returns deterministic synthetic values so the whole service runs
//! without any backing store.

use chrono::{DateTime, Utc};

/// Query interface the forecast store exposes to the encoders.
///
/// Implementations must return exactly one value per requested instant;
/// the encoding layer fails fast on any other length.
pub trait SampleStore: Send + Sync {
    /// Sample a parameter's time series at a point.
    fn sample_series(
        &self,
        collection_id: &str,
        parameter: &str,
        lon: f64,
        lat: f64,
        level: Option<f64>,
        instants: &[DateTime<Utc>],
    ) -> Vec<f32>;
}

/// A store serving synthetic values, one per requested instant.
///
/// Values ramp linearly from a per-parameter base so that consecutive
/// forecast steps are distinguishable in responses and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoStore;

impl DemoStore {
    fn base_value(parameter: &str) -> f32 {
        match parameter {
            "air_temperature" => -20.8,
            "wind_speed" => 3.2,
            "air_pressure_at_sea_level" => 101_325.0,
            _ => 0.0,
        }
    }

    fn step(parameter: &str) -> f32 {
        match parameter {
            "air_temperature" => 0.65,
            "wind_speed" => 0.4,
            "air_pressure_at_sea_level" => -25.0,
            _ => 0.0,
        }
    }
}

impl SampleStore for DemoStore {
    fn sample_series(
        &self,
        _collection_id: &str,
        parameter: &str,
        _lon: f64,
        _lat: f64,
        _level: Option<f64>,
        instants: &[DateTime<Utc>],
    ) -> Vec<f32> {
        let base = Self::base_value(parameter);
        let step = Self::step(parameter);
        (0..instants.len())
            .map(|i| base + step * i as f32)
            .collect()
    }
}
