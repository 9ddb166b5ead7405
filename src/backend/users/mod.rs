//! User Directory Module
//!
//! Registration and profile CRUD over the same collection the relationship
//! core uses.
//!
//! - **`directory`** - `UserDirectory`: create, get, get-all, update, delete
//! - **`handlers`** - HTTP handlers under `/v1/user`
//!
//! Relationship fields are never written here. A new user always starts
//! with empty lists and zero counters, and updates only touch name,
//! contact number and email.

/// User CRUD service
pub mod directory;

/// HTTP handlers for user CRUD
pub mod handlers;

pub use directory::UserDirectory;
