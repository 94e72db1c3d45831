use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::auth::AuthUser;
use crate::database::{DatabaseError, Document, DocumentStore};

/// Outcomes of a gateway operation that are not a success
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("no authenticated session")]
    Unauthorized,

    /// Absent and owned-by-someone-else are deliberately the same outcome
    #[error("document not found or not owned by caller")]
    NotFoundOrForbidden,

    #[error(transparent)]
    Internal(#[from] DatabaseError),
}

/// Owner-scoped access to stored documents
#[derive(Clone)]
pub struct DocumentService {
    store: Arc<dyn DocumentStore>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Fetch a document the caller owns
    pub async fn retrieve(&self, caller: Option<&AuthUser>, id: &str) -> Result<Document, GatewayError> {
        self.find_owned(caller, id).await
    }

    /// Permanently delete a document the caller owns, along with its extracted data
    pub async fn delete(&self, caller: Option<&AuthUser>, id: &str) -> Result<(), GatewayError> {
        let document = self.find_owned(caller, id).await?;

        let removed = self.store.delete_by_key(&document.id).await?;
        if removed == 0 {
            // Lost a race with a concurrent delete; the record is gone either way
            debug!("Document {} was already removed before delete completed", document.id);
        }

        info!("Document {} deleted by user {}", document.id, document.user_id);
        Ok(())
    }

    async fn find_owned(&self, caller: Option<&AuthUser>, id: &str) -> Result<Document, GatewayError> {
        let caller = caller.ok_or(GatewayError::Unauthorized)?;

        self.store
            .find_one(id, caller.user_id)
            .await?
            .ok_or(GatewayError::NotFoundOrForbidden)
    }
}
