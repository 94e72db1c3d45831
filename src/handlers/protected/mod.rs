// handlers/protected/mod.rs - Session-scoped handlers
//
// Security Level: caller identity required
// Middleware: `session_middleware` injects `Session` into request extensions
//
// Every lookup is filtered on (id, owner), so a document owned by someone
// else is reported exactly like one that does not exist.
pub mod documents;
