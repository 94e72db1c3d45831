// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Middleware: global layers only (CORS, request tracing)
pub mod service;

pub use service::{health, root};
