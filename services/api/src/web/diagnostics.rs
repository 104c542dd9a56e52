//! services/api/src/web/diagnostics.rs
//!
//! The root status message, the `/test` environment diagnostic, and the
//! `/schema` collection listing used by the admin viewer.

use axum::{extract::State, response::IntoResponse, Json};
use guide_core::domain::COLLECTIONS;
use std::sync::Arc;

use crate::web::state::AppState;

/// GET / - Liveness message
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Status message"))
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Work in Taiwan Guide Backend Running" }))
}

/// GET /test - Backend, database, and env-var availability
///
/// This is the only endpoint that downgrades store failures into descriptive
/// strings instead of failing the request.
#[utoipa::path(
    get,
    path = "/test",
    responses((status = 200, description = "Diagnostic map, never errors"))
)]
pub async fn test_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut database = "not available".to_string();
    let mut connection_status = "not connected";
    let mut collections: Vec<String> = Vec::new();

    if let Some(store) = &state.store {
        database = "available".to_string();
        connection_status = "connected";
        match store.collection_names().await {
            Ok(names) => {
                collections = names.into_iter().take(10).collect();
                database = "connected and working".to_string();
            }
            Err(e) => {
                let mut detail = e.to_string();
                detail.truncate(80);
                database = format!("connected but error: {detail}");
            }
        }
    }

    Json(serde_json::json!({
        "backend": "running",
        "database": database,
        "database_url": if state.config.database_url.is_some() { "set" } else { "not set" },
        "database_name": if std::env::var("DATABASE_NAME").is_ok() { "set" } else { "not set" },
        "connection_status": connection_status,
        "collections": collections,
    }))
}

/// GET /schema - Static list of known collection names
#[utoipa::path(
    get,
    path = "/schema",
    responses((status = 200, description = "Known collection names"))
)]
pub async fn schema_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "collections": COLLECTIONS }))
}
