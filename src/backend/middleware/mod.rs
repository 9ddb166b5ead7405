//! Middleware Module
//!
//! - **`logging`** - Per-request span and completion log line

pub mod logging;

pub use logging::{log_requests, REQUEST_ID_HEADER};
