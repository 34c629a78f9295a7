//! Instances endpoint handler.
//!
//! An instance is one model run, identified by its reference time; each
//! is served as an instance-scoped collection resource.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;

use edr_core::collections::SupportedQuery;
use edr_core::{build_instance_collection, media_types, EdrError, InstanceList};

use crate::handlers::{exception_response, json_response};
use crate::state::AppState;

/// GET /collections/:collection_id/instances - List model runs
pub async fn list_instances_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
) -> Response {
    let Some(config) = state.config.find_collection(&collection_id) else {
        return exception_response(&EdrError::CollectionNotFound(collection_id));
    };

    if !config.supports(SupportedQuery::Instances) {
        return exception_response(&EdrError::QueryNotSupported("instances".to_string()));
    }

    let instances = config
        .reference_times
        .iter()
        .map(|reference_time| build_instance_collection(config, &state.base_url, reference_time))
        .collect();

    let list = InstanceList::new(instances, &state.base_url, &config.id);
    json_response(StatusCode::OK, media_types::JSON, &list)
}

#[cfg(test)]
mod tests {
    use edr_core::{build_instance_collection, CollectionConfig, InstanceList};

    #[test]
    fn test_instances_are_scoped_collections() {
        let config = CollectionConfig::demo();
        let instances: Vec<_> = config
            .reference_times
            .iter()
            .map(|rt| build_instance_collection(&config, "http://localhost:8080", rt))
            .collect();

        let list = InstanceList::new(instances, "http://localhost:8080", &config.id);
        assert_eq!(list.instances.len(), 1);
        assert_eq!(list.instances[0].id, "2024-01-01T00:00:00Z");
        assert!(list.instances[0].data_queries.instances.is_none());
    }
}
