use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Document, ExtractedData};

/// Keyed document storage with owner-filtered lookup and cascading delete
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Find the document with this key *and* this owner.
    ///
    /// A key that exists under another owner yields `Ok(None)`, exactly like
    /// a key that was never stored.
    async fn find_one(&self, id: &str, owner: Uuid) -> Result<Option<Document>, DatabaseError>;

    /// Remove a document and every extracted-data row that references it.
    ///
    /// Both removals happen atomically. Returns the number of documents removed;
    /// a missing key is `Ok(0)`, not an error.
    async fn delete_by_key(&self, id: &str) -> Result<u64, DatabaseError>;

    /// Extracted data currently attached to a document
    async fn find_extracted_data(&self, document_id: &str) -> Result<Vec<ExtractedData>, DatabaseError>;

    /// Check store connectivity
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
