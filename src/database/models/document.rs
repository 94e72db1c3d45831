use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user-owned binary document with its upload metadata
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Document {
    pub id: String,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    #[serde(skip_serializing)]
    pub file_data: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a document whose declared size matches its payload
    pub fn new(
        id: impl Into<String>,
        user_id: Uuid,
        file_name: impl Into<String>,
        file_type: impl Into<String>,
        file_data: Vec<u8>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id,
            file_name: file_name.into(),
            file_type: file_type.into(),
            file_size: file_data.len() as i64,
            file_data,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    /// Actual payload length, which is what goes on the wire
    pub fn payload_len(&self) -> usize {
        self.file_data.len()
    }

    /// True when the stored `file_size` disagrees with the payload
    pub fn size_mismatch(&self) -> bool {
        self.file_size != self.file_data.len() as i64
    }
}
