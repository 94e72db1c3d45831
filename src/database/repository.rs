use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Document, ExtractedData};
use super::store::DocumentStore;

/// PostgreSQL-backed `DocumentStore`
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_one(&self, id: &str, owner: Uuid) -> Result<Option<Document>, DatabaseError> {
        let document = sqlx::query_as::<_, Document>(
            r#"
            SELECT id, user_id, file_name, file_type, file_size, file_data, created_at, updated_at
            FROM documents
            WHERE id = $1
            AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(document)
    }

    async fn delete_by_key(&self, id: &str) -> Result<u64, DatabaseError> {
        // The FK cascade would cover dependents on its own; deleting them in the
        // same transaction keeps the removal atomic even on schemas without it.
        let mut tx = self.pool.begin().await?;

        let dependents = sqlx::query("DELETE FROM extracted_data WHERE document_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        debug!("Deleted document {} ({} row, {} extracted data rows)", id, removed, dependents);
        Ok(removed)
    }

    async fn find_extracted_data(&self, document_id: &str) -> Result<Vec<ExtractedData>, DatabaseError> {
        let rows = sqlx::query_as::<_, ExtractedData>(
            r#"
            SELECT id, document_id, field_name, field_value, created_at
            FROM extracted_data
            WHERE document_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}
