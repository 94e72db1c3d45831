use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Data derived from a document; removed together with its parent
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExtractedData {
    pub id: Uuid,
    pub document_id: String,
    pub field_name: String,
    pub field_value: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ExtractedData {
    pub fn new(
        document_id: impl Into<String>,
        field_name: impl Into<String>,
        field_value: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id: document_id.into(),
            field_name: field_name.into(),
            field_value,
            created_at: Utc::now(),
        }
    }
}
