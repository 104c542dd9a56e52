//! services/api/src/web/steps.rs
//!
//! CRUD over the guide step content. Admin-style: there is no auth gate on
//! any of these, matching the product surface.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::Document;
use guide_core::domain::{Resource, Step};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

/// Wire-level step payload for creation. Deliberately has no id field; the
/// store generates identifiers.
#[derive(Deserialize, ToSchema)]
pub struct CreateStepRequest {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    #[schema(value_type = Vec<Object>)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub estimate_days: Option<i64>,
    #[serde(default)]
    pub cost_estimate: Option<String>,
    #[serde(default)]
    pub order: i64,
}

#[derive(Serialize, ToSchema)]
pub struct StepResponse {
    pub id: String,
    pub key: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    #[schema(value_type = Vec<Object>)]
    pub resources: Vec<Resource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate_days: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimate: Option<String>,
    pub order: i64,
}

#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: String,
}

fn decode_step(document: Document) -> Result<StepResponse, ApiError> {
    let step: Step = bson::from_document(document).map_err(|e| {
        error!("Failed to decode step document: {:?}", e);
        ApiError::Internal("Failed to decode step".to_string())
    })?;
    let id = step
        .id
        .map(|oid| oid.to_hex())
        .ok_or_else(|| ApiError::Internal("Step document has no id".to_string()))?;
    Ok(StepResponse {
        id,
        key: step.key,
        title: step.title,
        description: step.description,
        content: step.content,
        resources: step.resources,
        estimate_days: step.estimate_days,
        cost_estimate: step.cost_estimate,
        order: step.order,
    })
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /api/steps - All steps, ascending by display order
///
/// Ties on `order` keep the store's retrieval order, which MongoDB leaves
/// unspecified.
#[utoipa::path(
    get,
    path = "/api/steps",
    responses(
        (status = 200, description = "All steps sorted by order", body = [StepResponse])
    )
)]
pub async fn list_steps_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = match &state.store {
        Some(store) => store.find_documents(Step::COLLECTION, bson::doc! {}).await?,
        None => Vec::new(),
    };
    let mut steps = documents
        .into_iter()
        .map(decode_step)
        .collect::<Result<Vec<_>, _>>()?;
    steps.sort_by_key(|s| s.order);
    Ok(Json(steps))
}

/// POST /api/steps - Create a step
///
/// No duplicate check on `key`; re-posting the same key creates a second
/// document.
#[utoipa::path(
    post,
    path = "/api/steps",
    request_body = CreateStepRequest,
    responses(
        (status = 200, description = "Step created", body = CreatedResponse),
        (status = 500, description = "Database not available")
    )
)]
pub async fn create_step_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateStepRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let step = Step {
        id: None,
        key: req.key,
        title: req.title,
        description: req.description,
        content: req.content,
        resources: req.resources,
        estimate_days: req.estimate_days,
        cost_estimate: req.cost_estimate,
        order: req.order,
    };
    let document = bson::to_document(&step)
        .map_err(|e| ApiError::Internal(format!("Failed to encode step: {e}")))?;
    let id = state
        .require_store()?
        .insert_document(Step::COLLECTION, document)
        .await?;
    Ok(Json(CreatedResponse { id }))
}

/// PUT /api/steps/{id} - Merge a partial field map into a step
#[utoipa::path(
    put,
    path = "/api/steps/{id}",
    params(("id" = String, Path, description = "Step document id")),
    responses(
        (status = 200, description = "Step updated"),
        (status = 404, description = "Step not found"),
        (status = 500, description = "Database not available")
    )
)]
pub async fn update_step_handler(
    State(state): State<Arc<AppState>>,
    Path(step_id): Path<String>,
    Json(payload): Json<serde_json::Map<String, serde_json::Value>>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.require_store()?;
    let mut fields = bson::to_document(&payload)
        .map_err(|e| ApiError::BadRequest(format!("Unusable update payload: {e}")))?;
    // The identifier is immutable.
    fields.remove("_id");
    let matched = store
        .update_document_by_id(Step::COLLECTION, &step_id, fields)
        .await?;
    if !matched {
        return Err(ApiError::NotFound("Step not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "updated": true })))
}

/// DELETE /api/steps/{id} - Remove a step
#[utoipa::path(
    delete,
    path = "/api/steps/{id}",
    params(("id" = String, Path, description = "Step document id")),
    responses(
        (status = 200, description = "Step deleted"),
        (status = 404, description = "Step not found"),
        (status = 500, description = "Database not available")
    )
)]
pub async fn delete_step_handler(
    State(state): State<Arc<AppState>>,
    Path(step_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let store = state.require_store()?;
    let deleted = store
        .delete_document_by_id(Step::COLLECTION, &step_id)
        .await?;
    if !deleted {
        return Err(ApiError::NotFound("Step not found".to_string()));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}
