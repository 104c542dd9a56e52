//! crates/guide_core/src/ports.rs
//!
//! Defines the service contract (trait) for the application's storage.
//! The trait forms the boundary of the hexagonal architecture, allowing the
//! handlers to be independent of the concrete document store.

use async_trait::async_trait;
use bson::Document;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all store operations.
/// This abstracts away the specific errors of the underlying driver.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The supplied identifier is not a valid ObjectId hex string.
    #[error("Invalid document id: {0}")]
    InvalidId(String),
    #[error("An unexpected store error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//=========================================================================================
// Store Port (Trait)
//=========================================================================================

/// Generic document operations addressed by collection name.
///
/// Every operation is a single round trip; atomicity is whatever the backing
/// store guarantees for one document. Availability is not modelled here:
/// callers hold the store as an `Option` and treat `None` as "database not
/// available".
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a new document and returns its generated id as a hex string.
    async fn insert_document(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Returns all documents matching an equality filter, identifiers
    /// included raw (`_id`). No sort is applied; ordering is the caller's
    /// responsibility.
    async fn find_documents(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>>;

    /// Returns the first document matching the filter, if any.
    async fn find_document(&self, collection: &str, filter: Document)
        -> StoreResult<Option<Document>>;

    /// Field-level merge of `fields` into the document with the given id.
    /// Returns whether a document matched.
    async fn update_document_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> StoreResult<bool>;

    /// Removes the document with the given id. Returns whether one was
    /// deleted.
    async fn delete_document_by_id(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Field-level merge into the document matching `filter`, inserting a
    /// new document if none matches.
    async fn upsert_document(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> StoreResult<()>;

    /// Lists collection names present in the database, for diagnostics.
    async fn collection_names(&self) -> StoreResult<Vec<String>>;
}
