// handlers/mod.rs - Handler tiers
//
// Public (no session) → Protected (session resolved by middleware)
//
// Protected handlers always receive a `Session`; an empty one is answered
// with 401 by the handler itself, before any store access.
pub mod public;    // No authentication: /, /health
pub mod protected; // Session required: /documents/*
