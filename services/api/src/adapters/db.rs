//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DocumentStore` port from the `core` crate. It handles all interactions
//! with MongoDB using the official driver.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Document};
use futures::TryStreamExt;
use guide_core::ports::{DocumentStore, StoreError, StoreResult};
use mongodb::Database;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A document-store adapter that implements the `DocumentStore` port over a
/// `mongodb::Database` handle.
#[derive(Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Creates a new `MongoStore`.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

fn unexpected(e: mongodb::error::Error) -> StoreError {
    StoreError::Unexpected(e.to_string())
}

//=========================================================================================
// `DocumentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_document(&self, collection: &str, document: Document) -> StoreResult<String> {
        let result = self
            .collection(collection)
            .insert_one(document)
            .await
            .map_err(unexpected)?;
        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Unexpected("inserted id is not an ObjectId".to_string()))?;
        Ok(id.to_hex())
    }

    async fn find_documents(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        let cursor = self
            .collection(collection)
            .find(filter)
            .await
            .map_err(unexpected)?;
        cursor.try_collect().await.map_err(unexpected)
    }

    async fn find_document(
        &self,
        collection: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        self.collection(collection)
            .find_one(filter)
            .await
            .map_err(unexpected)
    }

    async fn update_document_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> StoreResult<bool> {
        let oid = parse_id(id)?;
        let result = self
            .collection(collection)
            .update_one(doc! { "_id": oid }, doc! { "$set": fields })
            .await
            .map_err(unexpected)?;
        Ok(result.matched_count > 0)
    }

    async fn delete_document_by_id(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let oid = parse_id(id)?;
        let result = self
            .collection(collection)
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(unexpected)?;
        Ok(result.deleted_count > 0)
    }

    async fn upsert_document(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> StoreResult<()> {
        self.collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(true)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        self.db.list_collection_names().await.map_err(unexpected)
    }
}
