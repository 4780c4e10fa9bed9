//! Blob API handlers. Every operation checks the static policy before
//! touching the store.

use crate::error::AppError;
use crate::response::{BlobChangedBody, BlobContentBody, BlobListBody, HealthBody};
use crate::state::BlobState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

pub async fn health(State(state): State<BlobState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "healthy",
        container: state.store.container().to_string(),
        policy: state.policy.to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn list(State(state): State<BlobState>) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.policy.can_read() {
        return Err(AppError::PolicyDenied("Read"));
    }
    let blobs = state.store.list().await?;
    let count = blobs.len();
    Ok((StatusCode::OK, Json(BlobListBody { blobs, count })))
}

pub async fn read(
    State(state): State<BlobState>,
    Path(name): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.policy.can_read() {
        return Err(AppError::PolicyDenied("Read"));
    }
    let content = state
        .store
        .get(&name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("blob {name}")))?;
    Ok((StatusCode::OK, Json(BlobContentBody { name, content })))
}

/// Create or overwrite a blob from the raw request body.
pub async fn create(
    State(state): State<BlobState>,
    Path(name): Path<String>,
    body: String,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.policy.can_write() {
        return Err(AppError::PolicyDenied("Write"));
    }
    state.store.put(&name, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(BlobChangedBody {
            message: "Blob created",
            name,
        }),
    ))
}

pub async fn delete(
    State(state): State<BlobState>,
    Path(name): Path<String>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if !state.policy.can_write() {
        return Err(AppError::PolicyDenied("Write"));
    }
    if !state.store.delete(&name).await? {
        return Err(AppError::NotFound(format!("blob {name}")));
    }
    Ok((
        StatusCode::OK,
        Json(BlobChangedBody {
            message: "Blob deleted",
            name,
        }),
    ))
}

/// 404 listing the available endpoints.
pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "error": "Not found",
            "endpoints": {
                "health": "GET /health",
                "listBlobs": "GET /blobs",
                "getBlob": "GET /blob/{name}",
                "createBlob": "POST /blob/{name}",
                "deleteBlob": "DELETE /blob/{name}"
            }
        })),
    )
}
