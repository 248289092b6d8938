//! Request middleware.
//!
//! Purpose: cross-cutting request concerns, namely trace identifiers and
//! CORS headers for browser clients.

pub mod cors;
pub mod trace;

pub use cors::cors;
pub use trace::Trace;
