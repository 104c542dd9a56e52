//! HTTP API integration tests
//!
//! Drives the real router end to end against the in-memory store, plus the
//! degraded paths with no store at all.

use api_lib::adapters::MemoryStore;
use api_lib::config::Config;
use api_lib::web::{build_router, AppState};
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use bson::Document;
use guide_core::ports::{DocumentStore, StoreError, StoreResult};
use serde_json::json;
use std::sync::Arc;

/// A store whose every operation fails, for exercising the error-downgrade
/// paths.
struct BrokenStore {
    message: String,
}

#[async_trait]
impl DocumentStore for BrokenStore {
    async fn insert_document(&self, _: &str, _: Document) -> StoreResult<String> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
    async fn find_documents(&self, _: &str, _: Document) -> StoreResult<Vec<Document>> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
    async fn find_document(&self, _: &str, _: Document) -> StoreResult<Option<Document>> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
    async fn update_document_by_id(&self, _: &str, _: &str, _: Document) -> StoreResult<bool> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
    async fn delete_document_by_id(&self, _: &str, _: &str) -> StoreResult<bool> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
    async fn upsert_document(&self, _: &str, _: Document, _: Document) -> StoreResult<()> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        Err(StoreError::Unexpected(self.message.clone()))
    }
}

fn test_server_with(store: Option<Arc<dyn DocumentStore>>) -> TestServer {
    let config = Arc::new(Config::from_env().expect("config should load"));
    let state = Arc::new(AppState::new(store, config));
    TestServer::new(build_router(state)).expect("router should build")
}

fn test_server() -> TestServer {
    test_server_with(Some(Arc::new(MemoryStore::new())))
}

fn storeless_server() -> TestServer {
    test_server_with(None)
}

//=========================================================================================
// Auth
//=========================================================================================

#[tokio::test]
async fn signup_returns_profile_without_hash() {
    let server = test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "a@example.com", "password": "secret", "name": "Ann" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "a@example.com");
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["role"], "user");
    assert!(body.get("user_id").is_some());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn signup_twice_with_same_email_conflicts() {
    let server = test_server();

    let first = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "dup@example.com", "password": "one" }))
        .await;
    assert_eq!(first.status_code(), StatusCode::OK);

    // A different password does not help; the email is the key.
    let second = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "dup@example.com", "password": "two" }))
        .await;
    assert_eq!(second.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = second.json();
    assert_eq!(body["error"], "Email already registered");
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn login_round_trips_the_signup_identity() {
    let server = test_server();

    let signup = server
        .post("/api/auth/signup")
        .json(&json!({ "email": "b@example.com", "password": "pw123" }))
        .await;
    let signed_up: serde_json::Value = signup.json();

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "b@example.com", "password": "pw123" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
    let logged_in: serde_json::Value = login.json();
    assert_eq!(logged_in["user_id"], signed_up["user_id"]);
    assert_eq!(logged_in["role"], "user");
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email() {
    let server = test_server();

    server
        .post("/api/auth/signup")
        .json(&json!({ "email": "c@example.com", "password": "right" }))
        .await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "c@example.com", "password": "wrong" }))
        .await;
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "right" }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn stored_password_is_not_the_plaintext() {
    let store = Arc::new(MemoryStore::new());
    let server = test_server_with(Some(store.clone()));

    server
        .post("/api/auth/signup")
        .json(&json!({ "email": "d@example.com", "password": "plaintext-pw" }))
        .await;

    let doc = store
        .find_document("user", bson::doc! { "email": "d@example.com" })
        .await
        .unwrap()
        .expect("user should be persisted");
    let hash = doc.get_str("password_hash").unwrap();
    assert_ne!(hash, "plaintext-pw");
    assert!(!hash.contains("plaintext-pw"));
}

//=========================================================================================
// Steps
//=========================================================================================

async fn create_step(server: &TestServer, key: &str, order: i64) -> String {
    let response = server
        .post("/api/steps")
        .json(&json!({ "key": key, "title": format!("Step {key}"), "order": order }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn steps_list_ascends_by_order_regardless_of_insertion() {
    let server = test_server();

    create_step(&server, "three", 3).await;
    create_step(&server, "one", 1).await;
    create_step(&server, "two", 2).await;

    let response = server.get("/api/steps").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let steps: Vec<serde_json::Value> = response.json();
    let orders: Vec<i64> = steps.iter().map(|s| s["order"].as_i64().unwrap()).collect();
    assert_eq!(orders, vec![1, 2, 3]);
    // The raw identifier is rewritten to a string `id` field.
    assert!(steps[0].get("_id").is_none());
    assert!(steps[0]["id"].is_string());
}

#[tokio::test]
async fn step_update_merges_fields() {
    let server = test_server();
    let id = create_step(&server, "visa", 5).await;

    let response = server
        .put(&format!("/api/steps/{id}"))
        .json(&json!({ "title": "Work Visa", "estimate_days": 10 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["updated"], true);

    let steps: Vec<serde_json::Value> = server.get("/api/steps").await.json();
    assert_eq!(steps[0]["title"], "Work Visa");
    assert_eq!(steps[0]["estimate_days"], 10);
    // Untouched fields survive the merge.
    assert_eq!(steps[0]["key"], "visa");
    assert_eq!(steps[0]["order"], 5);
}

#[tokio::test]
async fn step_update_and_delete_report_not_found() {
    let server = test_server();
    let missing = bson::oid::ObjectId::new().to_hex();

    let update = server
        .put(&format!("/api/steps/{missing}"))
        .json(&json!({ "title": "x" }))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = server.delete(&format!("/api/steps/{missing}")).await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn step_delete_removes_the_step() {
    let server = test_server();
    let id = create_step(&server, "gone", 1).await;

    let response = server.delete(&format!("/api/steps/{id}")).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["deleted"], true);

    let steps: Vec<serde_json::Value> = server.get("/api/steps").await.json();
    assert!(steps.is_empty());
}

#[tokio::test]
async fn malformed_step_id_is_a_bad_request() {
    let server = test_server();
    let response = server
        .put("/api/steps/not-a-valid-oid")
        .json(&json!({ "title": "x" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

//=========================================================================================
// Progress
//=========================================================================================

#[tokio::test]
async fn progress_save_then_get_round_trips() {
    let server = test_server();

    let save = server
        .post("/api/progress")
        .json(&json!({ "user_id": "u1", "items": { "a": true, "b": false } }))
        .await;
    assert_eq!(save.status_code(), StatusCode::OK);
    let body: serde_json::Value = save.json();
    assert_eq!(body["saved"], true);

    let get = server.get("/api/progress/u1").await;
    let body: serde_json::Value = get.json();
    assert_eq!(body["items"], json!({ "a": true, "b": false }));
}

#[tokio::test]
async fn progress_save_replaces_the_whole_map() {
    let server = test_server();

    server
        .post("/api/progress")
        .json(&json!({ "user_id": "u1", "items": { "a": true, "b": false } }))
        .await;
    server
        .post("/api/progress")
        .json(&json!({ "user_id": "u1", "items": { "a": true } }))
        .await;

    let body: serde_json::Value = server.get("/api/progress/u1").await.json();
    // "b" is gone; saves replace, they do not merge.
    assert_eq!(body["items"], json!({ "a": true }));
}

#[tokio::test]
async fn progress_for_unknown_user_is_an_empty_map() {
    let server = test_server();
    let body: serde_json::Value = server.get("/api/progress/never-saved").await.json();
    assert_eq!(body["items"], json!({}));
}

//=========================================================================================
// Notifications
//=========================================================================================

#[tokio::test]
async fn notifications_are_scoped_per_user() {
    let server = test_server();

    server
        .post("/api/notifications")
        .json(&json!({ "user_id": "u1", "message": "renew passport", "due_date": "2026-09-01" }))
        .await;
    server
        .post("/api/notifications")
        .json(&json!({ "user_id": "u2", "message": "book flight" }))
        .await;

    let for_u1: Vec<serde_json::Value> = server.get("/api/notifications/u1").await.json();
    assert_eq!(for_u1.len(), 1);
    assert_eq!(for_u1[0]["message"], "renew passport");
    assert_eq!(for_u1[0]["type"], "reminder");
    assert_eq!(for_u1[0]["due_date"], "2026-09-01");
    assert!(for_u1[0]["id"].is_string());

    let for_u2: Vec<serde_json::Value> = server.get("/api/notifications/u2").await.json();
    assert_eq!(for_u2.len(), 1);
    assert_eq!(for_u2[0]["message"], "book flight");
}

//=========================================================================================
// Diagnostics & store-absent behavior
//=========================================================================================

#[tokio::test]
async fn root_and_schema_are_static() {
    let server = test_server();

    let root: serde_json::Value = server.get("/").await.json();
    assert_eq!(root["message"], "Work in Taiwan Guide Backend Running");

    let schema: serde_json::Value = server.get("/schema").await.json();
    assert_eq!(
        schema["collections"],
        json!(["user", "progress", "step", "notification", "recommendationprofile"])
    );
}

#[tokio::test]
async fn test_endpoint_reports_store_presence() {
    let with_store: serde_json::Value = test_server().get("/test").await.json();
    assert_eq!(with_store["backend"], "running");
    assert_eq!(with_store["connection_status"], "connected");

    let without: serde_json::Value = storeless_server().get("/test").await.json();
    assert_eq!(without["backend"], "running");
    assert_eq!(without["database"], "not available");
    assert_eq!(without["connection_status"], "not connected");
    assert_eq!(without["collections"], json!([]));
}

#[tokio::test]
async fn test_endpoint_downgrades_store_errors_to_a_string() {
    let long_message = "x".repeat(200);
    let server = test_server_with(Some(Arc::new(BrokenStore {
        message: long_message,
    })));

    let response = server.get("/test").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["backend"], "running");
    assert_eq!(body["connection_status"], "connected");
    let database = body["database"].as_str().unwrap();
    assert!(database.starts_with("connected but error:"));
    // The error detail is truncated to 80 characters.
    assert!(database.len() <= "connected but error: ".len() + 80);
    assert_eq!(body["collections"], json!([]));
}

#[tokio::test]
async fn storeless_reads_degrade_to_empty_results() {
    let server = storeless_server();

    let steps: Vec<serde_json::Value> = server.get("/api/steps").await.json();
    assert!(steps.is_empty());

    let progress: serde_json::Value = server.get("/api/progress/u1").await.json();
    assert_eq!(progress["items"], json!({}));

    let notifications: Vec<serde_json::Value> = server.get("/api/notifications/u1").await.json();
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn storeless_writes_fail_with_database_not_available() {
    let server = storeless_server();

    for response in [
        server
            .post("/api/steps")
            .json(&json!({ "key": "k", "title": "t" }))
            .await,
        server
            .post("/api/progress")
            .json(&json!({ "user_id": "u1", "items": {} }))
            .await,
        server
            .post("/api/notifications")
            .json(&json!({ "user_id": "u1", "message": "m" }))
            .await,
        server
            .post("/api/auth/signup")
            .json(&json!({ "email": "e@example.com", "password": "p" }))
            .await,
    ] {
        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Database not available");
    }

    // Login's lookup simply finds nothing, so it reads as bad credentials.
    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "e@example.com", "password": "p" }))
        .await;
    assert_eq!(login.status_code(), StatusCode::UNAUTHORIZED);
}
