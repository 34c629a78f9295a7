//! Collections endpoint handlers.

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::response::Response;
use std::sync::Arc;

use edr_core::{build_collection, media_types, CollectionList, EdrError};

use crate::handlers::{exception_response, json_response};
use crate::state::AppState;

/// GET /collections - List all collections
pub async fn list_collections_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    let collections = state
        .config
        .collections
        .iter()
        .map(|config| build_collection(config, &state.base_url))
        .collect();

    let list = CollectionList::new(collections, &state.base_url);
    json_response(StatusCode::OK, media_types::JSON, &list)
}

/// GET /collections/:collection_id - Get a specific collection
pub async fn get_collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
) -> Response {
    let Some(config) = state.config.find_collection(&collection_id) else {
        return exception_response(&EdrError::CollectionNotFound(collection_id));
    };

    let collection = build_collection(config, &state.base_url);
    json_response(StatusCode::OK, media_types::JSON, &collection)
}
