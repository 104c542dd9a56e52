//! services/api/src/web/progress.rs
//!
//! Per-user checklist progress. One document per user_id, maintained by
//! upsert; a save replaces the whole items map, it never merges.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::doc;
use guide_core::domain::Progress;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SaveProgressRequest {
    pub user_id: String,
    pub items: HashMap<String, bool>,
}

#[derive(Serialize, ToSchema)]
pub struct ProgressResponse {
    pub items: HashMap<String, bool>,
}

/// GET /api/progress/{user_id} - The user's checklist map
///
/// Absence of a progress document (or of the store itself) is not an error;
/// the checklist is simply empty.
#[utoipa::path(
    get,
    path = "/api/progress/{user_id}",
    params(("user_id" = String, Path, description = "User id the checklist belongs to")),
    responses(
        (status = 200, description = "Checklist map, empty if never saved", body = ProgressResponse)
    )
)]
pub async fn get_progress_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let document = match &state.store {
        Some(store) => {
            store
                .find_document(Progress::COLLECTION, doc! { "user_id": &user_id })
                .await?
        }
        None => None,
    };
    let items = match document {
        Some(document) => {
            let progress: Progress = bson::from_document(document).map_err(|e| {
                error!("Failed to decode progress document: {:?}", e);
                ApiError::Internal("Failed to decode progress".to_string())
            })?;
            progress.items
        }
        None => HashMap::new(),
    };
    Ok(Json(ProgressResponse { items }))
}

/// POST /api/progress - Replace the user's checklist map
#[utoipa::path(
    post,
    path = "/api/progress",
    request_body = SaveProgressRequest,
    responses(
        (status = 200, description = "Checklist saved"),
        (status = 500, description = "Database not available")
    )
)]
pub async fn save_progress_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveProgressRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.require_store()?;
    let items = bson::to_bson(&req.items)
        .map_err(|e| ApiError::Internal(format!("Failed to encode items: {e}")))?;
    store
        .upsert_document(
            Progress::COLLECTION,
            doc! { "user_id": &req.user_id },
            doc! { "items": items, "updated_at": bson::DateTime::now() },
        )
        .await?;
    Ok(Json(serde_json::json!({ "saved": true })))
}
