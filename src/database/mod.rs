pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryDocumentStore;
pub use models::{Document, ExtractedData};
pub use repository::PgDocumentStore;
pub use store::DocumentStore;
