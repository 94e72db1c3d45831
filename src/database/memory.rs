use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Document, ExtractedData};
use super::store::DocumentStore;

#[derive(Default)]
struct Tables {
    documents: HashMap<String, Document>,
    extracted_data: HashMap<String, Vec<ExtractedData>>,
}

/// In-process `DocumentStore` for local development and tests.
///
/// Both tables sit behind a single lock, so a delete removes a document and
/// its extracted data under one write guard.
#[derive(Default)]
pub struct MemoryDocumentStore {
    tables: RwLock<Tables>,
    offline: AtomicBool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document, replacing any previous one with the same key
    pub async fn insert_document(&self, document: Document) {
        let mut tables = self.tables.write().await;
        tables.documents.insert(document.id.clone(), document);
    }

    /// Attach extracted data to an existing document
    pub async fn insert_extracted_data(&self, data: ExtractedData) -> Result<(), DatabaseError> {
        let mut tables = self.tables.write().await;
        if !tables.documents.contains_key(&data.document_id) {
            return Err(DatabaseError::Unavailable(format!(
                "foreign key violation: document {} does not exist",
                data.document_id
            )));
        }
        tables
            .extracted_data
            .entry(data.document_id.clone())
            .or_default()
            .push(data);
        Ok(())
    }

    /// Simulate losing the backing store; every operation then fails
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), DatabaseError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("memory store is offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, id: &str, owner: Uuid) -> Result<Option<Document>, DatabaseError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .documents
            .get(id)
            .filter(|document| document.is_owned_by(owner))
            .cloned())
    }

    async fn delete_by_key(&self, id: &str) -> Result<u64, DatabaseError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let removed = tables.documents.remove(id);
        tables.extracted_data.remove(id);
        Ok(u64::from(removed.is_some()))
    }

    async fn find_extracted_data(&self, document_id: &str) -> Result<Vec<ExtractedData>, DatabaseError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        Ok(tables
            .extracted_data
            .get(document_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.ensure_online()
    }
}
