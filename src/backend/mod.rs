//! Backend Module
//!
//! All server-side code for PetalPix.
//!
//! # Architecture
//!
//! - **`store`** - Document store adapter: the `UserCollection` trait, filters and
//!   mutations, PostgreSQL and in-memory implementations
//! - **`graph`** - Relationship mutator (follow/unfollow), reader (following
//!   list resolution) and the reconcile pass for asymmetric edges
//! - **`users`** - User directory: registration and profile CRUD
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Request logging
//! - **`error`** - Store and API error types, HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── store/          - Document store adapter
//! ├── graph/          - Follow/unfollow core
//! ├── users/          - User CRUD
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The store adapter is constructed once in `server::init::create_app` and
//! passed as `Arc<dyn UserCollection>` into the services; the services are
//! shared with handlers through `AppState`. Nothing holds mutable state in
//! process apart from the in-memory collection itself.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Document store adapter
pub mod store;

/// Follow/unfollow relationship core
pub mod graph;

/// User registration and profile CRUD
pub mod users;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

pub use error::{GraphError, StoreError};
pub use graph::{GraphPolicy, RelationshipService};
pub use server::create_app;
pub use store::{MemoryUserCollection, PgUserCollection, UserCollection};
pub use users::UserDirectory;
