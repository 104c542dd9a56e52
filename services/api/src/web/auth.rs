//! services/api/src/web/auth.rs
//!
//! Authentication endpoints for user signup and login.
//!
//! There is no session or token issuance: login only validates credentials
//! and echoes profile fields. Every later call that takes a user_id trusts
//! the caller to supply their own. That is a functional gap inherited from
//! the product this serves, not an intentional security design; closing it
//! means adding a session layer in front of the progress and notification
//! endpoints.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, response::IntoResponse, Json};
use bson::doc;
use guide_core::domain::User;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: String,
}

//=========================================================================================
// Password Helpers
//=========================================================================================

pub(crate) fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            error!("Failed to hash password: {:?}", e);
            ApiError::Internal("Failed to hash password".to_string())
        })?;
    Ok(hash.to_string())
}

pub(crate) fn verify_password(plain: &str, hashed: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hashed) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /api/auth/signup - Create a new user account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created successfully", body = AuthResponse),
        (status = 400, description = "Email already registered"),
        (status = 500, description = "Database not available")
    )
)]
pub async fn signup_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // 1. Reject duplicate emails (exact, case-sensitive match)
    if let Some(store) = &state.store {
        let existing = store
            .find_document(User::COLLECTION, doc! { "email": &req.email })
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }
    }

    // 2. Hash the password and persist the user
    let user = User {
        id: None,
        email: req.email.clone(),
        password_hash: hash_password(&req.password)?,
        name: req.name.clone(),
        role: "user".to_string(),
        preferences: doc! {},
    };
    let document = bson::to_document(&user)
        .map_err(|e| ApiError::Internal(format!("Failed to encode user: {e}")))?;
    let user_id = state
        .require_store()?
        .insert_document(User::COLLECTION, document)
        .await?;

    Ok(Json(AuthResponse {
        user_id,
        email: req.email,
        name: req.name,
        role: "user".to_string(),
    }))
}

/// POST /api/auth/login - Validate credentials and echo profile fields
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // 1. Look up the user by exact email. An absent store yields no user,
    //    which falls into the invalid-credentials branch.
    let document = match &state.store {
        Some(store) => {
            store
                .find_document(User::COLLECTION, doc! { "email": &req.email })
                .await?
        }
        None => None,
    };
    let document = document.ok_or(ApiError::Unauthorized)?;

    let user: User = bson::from_document(document).map_err(|e| {
        error!("Failed to decode user document: {:?}", e);
        ApiError::Internal("Failed to decode user".to_string())
    })?;

    // 2. Verify the password against the stored hash
    if !verify_password(&req.password, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    let user_id = user
        .id
        .map(|oid| oid.to_hex())
        .ok_or_else(|| ApiError::Internal("User document has no id".to_string()))?;

    Ok(Json(AuthResponse {
        user_id,
        email: user.email,
        name: user.name,
        role: user.role,
    }))
}
