//! Shared Types
//!
//! Types used by both the store adapter and the HTTP layer: the persisted
//! `User` document, the follow/unfollow request bodies and the normalized
//! `Targets` variant.

pub mod error;
pub mod targets;
pub mod user;

pub use error::SharedError;
pub use targets::{FollowRequest, Targets, UnfollowRequest};
pub use user::{MessageResponse, User};
