//! Server Module
//!
//! Everything needed to turn a `ServerConfig` into a running Axum app.
//!
//! - **`config`** - `ServerConfig` loading, validation, store construction
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`init`** - `create_app` and `shutdown_signal`
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::load` reads `config.toml`
//!    and environment overrides
//! 2. **Store**: `config::load_store` opens PostgreSQL or falls back to the
//!    in-memory collection
//! 3. **State Creation**: the relationship service and the user directory
//!    share the one store handle
//! 4. **Router Creation**: routes plus the request logging layer

/// Server configuration loading
pub mod config;

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, shutdown_signal};
pub use state::AppState;
