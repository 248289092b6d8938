//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **redis**: the production score index, a Redis sorted set reached
//!   through a `bb8` pool
//! - **memory**: an in-process score index with the same ordering, used by
//!   tests and for running without Redis
//!
//! Adapters are thin translators between domain types and storage
//! representations. They contain no ranking or search logic.

pub mod memory;
pub mod redis;
