//! Route Configuration Module
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - The `/v1/user` API
//!
//! # Routes
//!
//! - `GET /health` - Liveness check
//! - `POST /v1/user/create`, `GET /v1/user/get/{id}`, `GET /v1/user/getall`,
//!   `PATCH /v1/user/update`, `DELETE /v1/user/delete/{id}` - User CRUD
//! - `POST /v1/user/follow/{id}`, `POST /v1/user/unfollow/{id}`,
//!   `GET /v1/user/getFollowing/{id}`, `POST /v1/user/reconcile/{id}` -
//!   Relationships
//!
//! Unknown paths get a JSON 404. Every request passes through
//! `middleware::log_requests`.

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
