pub mod document;
pub mod extracted_data;

pub use document::Document;
pub use extracted_data::ExtractedData;
