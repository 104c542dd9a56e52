//! services/api/src/web/router.rs
//!
//! Builds the axum `Router` for the whole HTTP surface, and holds the master
//! definition for the OpenAPI specification. The binary and the integration
//! tests share this one construction path.

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;

use crate::web::auth::{login_handler, signup_handler};
use crate::web::diagnostics::{root_handler, schema_handler, test_handler};
use crate::web::notifications::{create_notification_handler, list_notifications_handler};
use crate::web::progress::{get_progress_handler, save_progress_handler};
use crate::web::state::AppState;
use crate::web::steps::{
    create_step_handler, delete_step_handler, list_steps_handler, update_step_handler,
};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::diagnostics::root_handler,
        crate::web::diagnostics::test_handler,
        crate::web::diagnostics::schema_handler,
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::steps::list_steps_handler,
        crate::web::steps::create_step_handler,
        crate::web::steps::update_step_handler,
        crate::web::steps::delete_step_handler,
        crate::web::progress::get_progress_handler,
        crate::web::progress::save_progress_handler,
        crate::web::notifications::create_notification_handler,
        crate::web::notifications::list_notifications_handler,
    ),
    components(schemas(
        crate::web::auth::SignupRequest,
        crate::web::auth::LoginRequest,
        crate::web::auth::AuthResponse,
        crate::web::steps::CreateStepRequest,
        crate::web::steps::StepResponse,
        crate::web::steps::CreatedResponse,
        crate::web::progress::SaveProgressRequest,
        crate::web::progress::ProgressResponse,
        crate::web::notifications::CreateNotificationRequest,
        crate::web::notifications::NotificationResponse,
    )),
    tags(
        (name = "Work in Taiwan Guide API", description = "CRUD endpoints for the relocation guide backend.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Router Construction
//=========================================================================================

/// Builds the application router with fully open CORS, as the frontend is
/// served from a different origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root_handler))
        .route("/test", get(test_handler))
        .route("/schema", get(schema_handler))
        .route("/api/auth/signup", post(signup_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/steps", get(list_steps_handler).post(create_step_handler))
        .route("/api/steps/{id}", put(update_step_handler).delete(delete_step_handler))
        .route("/api/progress/{user_id}", get(get_progress_handler))
        .route("/api/progress", post(save_progress_handler))
        .route("/api/notifications", post(create_notification_handler))
        .route("/api/notifications/{user_id}", get(list_notifications_handler))
        .layer(cors)
        .with_state(state)
}
