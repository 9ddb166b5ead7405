//! PetalPix - Main Library
//!
//! PetalPix is a social-graph backend: users follow and unfollow each other,
//! and every user document carries both directions of the relationship
//! (following list and count, followers list and count).
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types shared by the store, the services and the HTTP layer
//!   - `User` document, follow/unfollow request bodies, `Targets`
//!   - Validation error type
//!
//! - **`backend`** - Server-side code
//!   - Document store adapter (PostgreSQL and in-memory collections)
//!   - Relationship mutator, reader and reconcile pass
//!   - User directory (create/get/update/delete)
//!   - Axum routes, request logging, configuration
//!
//! # Usage
//!
//! ```rust,no_run
//! use petalpix::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::load()?;
//! let (app, _store) = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod shared;
