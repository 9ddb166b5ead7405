//! PostgreSQL-backed tests
//!
//! Ignored by default; run with `cargo test -- --ignored` and a reachable
//! `DATABASE_URL`.

mod pg_collection_test;
