//! Backend Error Module
//!
//! # Architecture
//!
//! - **`types`** - `StoreError` (document store layer) and `GraphError`
//!   (service and API layer)
//! - **`conversion`** - `IntoResponse` for `GraphError`, JSON rejection mapping
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```

pub mod conversion;
pub mod types;

pub use types::{ErrorKind, GraphError, StoreError};
