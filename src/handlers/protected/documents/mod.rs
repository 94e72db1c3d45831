pub mod document;

// Re-export handler functions for use in routing
pub use document::get as document_get;
pub use document::delete as document_delete;
