//! services/api/src/web/notifications.rs
//!
//! Reminder notifications: create and per-user list. Create-only; nothing
//! updates or deletes a notification.

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::{doc, Document};
use guide_core::domain::Notification;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;
use crate::web::steps::CreatedResponse;

#[derive(Deserialize, ToSchema)]
pub struct CreateNotificationRequest {
    pub user_id: String,
    pub message: String,
    /// ISO date string. Stored as given, not parsed.
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

fn decode_notification(document: Document) -> Result<NotificationResponse, ApiError> {
    let notification: Notification = bson::from_document(document).map_err(|e| {
        error!("Failed to decode notification document: {:?}", e);
        ApiError::Internal("Failed to decode notification".to_string())
    })?;
    let id = notification
        .id
        .map(|oid| oid.to_hex())
        .ok_or_else(|| ApiError::Internal("Notification document has no id".to_string()))?;
    Ok(NotificationResponse {
        id,
        user_id: notification.user_id,
        kind: notification.kind,
        message: notification.message,
        due_date: notification.due_date,
    })
}

/// POST /api/notifications - Store a reminder for a user
#[utoipa::path(
    post,
    path = "/api/notifications",
    request_body = CreateNotificationRequest,
    responses(
        (status = 200, description = "Notification created", body = CreatedResponse),
        (status = 500, description = "Database not available")
    )
)]
pub async fn create_notification_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let notification = Notification {
        id: None,
        user_id: req.user_id,
        kind: "reminder".to_string(),
        message: req.message,
        due_date: req.due_date,
    };
    let document = bson::to_document(&notification)
        .map_err(|e| ApiError::Internal(format!("Failed to encode notification: {e}")))?;
    let id = state
        .require_store()?
        .insert_document(Notification::COLLECTION, document)
        .await?;
    Ok(Json(CreatedResponse { id }))
}

/// GET /api/notifications/{user_id} - Every notification for a user
///
/// Retrieval order is whatever the store returns; no sort is applied.
#[utoipa::path(
    get,
    path = "/api/notifications/{user_id}",
    params(("user_id" = String, Path, description = "User id the notifications belong to")),
    responses(
        (status = 200, description = "Notifications for the user", body = [NotificationResponse])
    )
)]
pub async fn list_notifications_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let documents = match &state.store {
        Some(store) => {
            store
                .find_documents(Notification::COLLECTION, doc! { "user_id": &user_id })
                .await?
        }
        None => Vec::new(),
    };
    let notifications = documents
        .into_iter()
        .map(decode_notification)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(notifications))
}
