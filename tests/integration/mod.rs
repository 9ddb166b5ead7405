//! Integration tests
//!
//! HTTP tests drive the full router (`oneshot`) over the in-memory
//! collection; service tests call `RelationshipService` directly. The
//! `database` tests need PostgreSQL and are ignored by default.

mod database;
mod follow_test;
mod reconcile_test;
