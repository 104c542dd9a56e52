//! crates/guide_core/src/domain.rs
//!
//! Defines the persisted record shapes for the application.
//! Each struct maps one-to-one onto a MongoDB collection; the collection
//! name is the lowercase of the struct name.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Names of every collection the service touches, in the order `/schema`
/// reports them.
pub const COLLECTIONS: [&str; 5] = [
    User::COLLECTION,
    Progress::COLLECTION,
    Step::COLLECTION,
    Notification::COLLECTION,
    RecommendationProfile::COLLECTION,
];

/// A registered account. Created on signup, never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    /// Argon2 hash, server-generated. The plaintext is never stored.
    pub password_hash: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    /// Open key-value settings (darkMode, language, ...).
    #[serde(default)]
    pub preferences: bson::Document,
}

impl User {
    pub const COLLECTION: &'static str = "user";
}

fn default_role() -> String {
    "user".to_string()
}

/// One onboarding step of the relocation guide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Free-form identifier, e.g. "passport" or "job-search". Not enforced
    /// unique by the store.
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Rich markdown/HTML content.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Estimated processing time in days.
    #[serde(default)]
    pub estimate_days: Option<i64>,
    /// Approximate costs, free text.
    #[serde(default)]
    pub cost_estimate: Option<String>,
    /// Display order, ascending.
    #[serde(default)]
    pub order: i64,
}

impl Step {
    pub const COLLECTION: &'static str = "step";
}

/// A labelled link attached to a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub label: String,
    pub url: String,
}

/// Per-user checklist state. At most one document per user_id, maintained
/// by upsert; the items map is replaced whole on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Reference to a user `_id`, as a string. Not enforced by the store.
    pub user_id: String,
    /// step key -> completed.
    #[serde(default)]
    pub items: HashMap<String, bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<bson::DateTime>,
}

impl Progress {
    pub const COLLECTION: &'static str = "progress";
}

/// A reminder for a user. Create-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    /// Always "reminder" when created through the API.
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// ISO date string. Stored as given, not validated.
    #[serde(default)]
    pub due_date: Option<String>,
}

impl Notification {
    pub const COLLECTION: &'static str = "notification";
}

/// Optional profile used to tailor recommendations. Carried for the schema
/// listing; no endpoint writes it yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationProfile {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: String,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub language_level: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl RecommendationProfile {
    pub const COLLECTION: &'static str = "recommendationprofile";
}
