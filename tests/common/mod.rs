//! Common test utilities and helpers
//!
//! - Seeded in-memory collections and a router built on them
//! - HTTP request helpers for `oneshot` tests
//! - Custom assertion macros
//! - PostgreSQL pool, migrations and per-test ids for ignored database tests

pub mod database;

pub use fixtures::*;
pub use http::*;
