//! Forecast time-series EDR service
//!
//! This crate provides the HTTP server around the `edr-core` resource
//! model: routing, configuration loading, content negotiation and the
//! (mocked) sample store.

pub mod config;
pub mod content_negotiation;
pub mod handlers;
pub mod state;
pub mod store;
