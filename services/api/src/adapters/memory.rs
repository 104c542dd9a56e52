//! services/api/src/adapters/memory.rs
//!
//! An in-memory implementation of the `DocumentStore` port. Backs the
//! integration tests and lets the store-present code paths run without a
//! MongoDB instance.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use guide_core::ports::{DocumentStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::Mutex;

/// A `DocumentStore` over a mutex-held map of collection name to documents.
/// Generates ObjectIds the way the real store does, so identifier round-trips
/// behave identically.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Equality match of every filter field against the document.
fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

fn parse_id(id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| StoreError::InvalidId(id.to_string()))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_document(&self, collection: &str, mut document: Document) -> StoreResult<String> {
        let id = ObjectId::new();
        document.insert("_id", id);
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(id.to_hex())
    }

    async fn find_documents(&self, collection: &str, filter: Document) -> StoreResult<Vec<Document>> {
        let collections = self.collections.lock().unwrap();
        let documents = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| matches(d, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn find_document(
        &self,
        collection: &str,
        filter: Document,
    ) -> StoreResult<Option<Document>> {
        let collections = self.collections.lock().unwrap();
        let document = collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)))
            .cloned();
        Ok(document)
    }

    async fn update_document_by_id(
        &self,
        collection: &str,
        id: &str,
        fields: Document,
    ) -> StoreResult<bool> {
        let oid = parse_id(id)?;
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(document) = docs
            .iter_mut()
            .find(|d| d.get_object_id("_id").map(|o| o == oid).unwrap_or(false))
        else {
            return Ok(false);
        };
        for (key, value) in fields {
            document.insert(key, value);
        }
        Ok(true)
    }

    async fn delete_document_by_id(&self, collection: &str, id: &str) -> StoreResult<bool> {
        let oid = parse_id(id)?;
        let mut collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| !d.get_object_id("_id").map(|o| o == oid).unwrap_or(false));
        Ok(docs.len() < before)
    }

    async fn upsert_document(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> StoreResult<()> {
        let mut collections = self.collections.lock().unwrap();
        let docs = collections.entry(collection.to_string()).or_default();
        if let Some(document) = docs.iter_mut().find(|d| matches(d, &filter)) {
            for (key, value) in fields {
                document.insert(key, value);
            }
        } else {
            let mut document = filter;
            document.insert("_id", Bson::ObjectId(ObjectId::new()));
            for (key, value) in fields {
                document.insert(key, value);
            }
            docs.push(document);
        }
        Ok(())
    }

    async fn collection_names(&self) -> StoreResult<Vec<String>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections.keys().cloned().collect())
    }
}
