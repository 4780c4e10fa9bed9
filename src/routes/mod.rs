//! Routers for the two demo services.

use crate::handlers::{blobs, todos};
use crate::state::{BlobState, TodoState};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

/// Todo API: CRUD over /todos with a permissive CORS header and an
/// informational fallback.
pub fn todo_routes(state: TodoState) -> Router {
    Router::new()
        .route("/todos", get(todos::list).post(todos::create))
        .route(
            "/todos/:id",
            get(todos::read).put(todos::update).delete(todos::delete),
        )
        .fallback(todos::api_info)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Blob API: health, list, and per-name get/create/delete.
pub fn blob_routes(state: BlobState) -> Router {
    Router::new()
        .route("/", get(blobs::health))
        .route("/health", get(blobs::health))
        .route("/blobs", get(blobs::list))
        .route(
            "/blob/:name",
            get(blobs::read).post(blobs::create).delete(blobs::delete),
        )
        .fallback(blobs::not_found)
        .with_state(state)
}
