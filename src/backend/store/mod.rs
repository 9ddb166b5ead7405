//! Document Store Adapter
//!
//! The relationship core talks to exactly one collection of user documents
//! through the `UserCollection` trait. Implementations carry no business
//! logic; they execute finds and updates and report matched counts.
//!
//! - **`document`** - `Filter`, `Mutation` and two-phase result types
//! - **`memory`** - `MemoryUserCollection`, an in-process collection
//! - **`postgres`** - `PgUserCollection`, one PostgreSQL table with `TEXT[]`
//!   relationship columns

pub mod document;
pub mod memory;
pub mod postgres;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::backend::error::StoreError;
use crate::shared::User;

pub use document::{
    CounterField, Filter, ListField, Mutation, Operation, PhaseUpdate, TextField, TwoPhaseOutcome,
};
pub use memory::MemoryUserCollection;
pub use postgres::PgUserCollection;

/// A collection of user documents keyed by `User::id`
///
/// Each single call is atomic for the documents it touches. Stores that can
/// also run two updates atomically report it through
/// `supports_transactions` and implement `apply_two_phase`.
#[async_trait]
pub trait UserCollection: Send + Sync {
    /// Insert a new document; an existing id fails with `DuplicateKey`
    async fn insert_one(&self, user: &User) -> Result<(), StoreError>;

    /// First document matching `filter`, if any
    async fn find_one(&self, filter: &Filter) -> Result<Option<User>, StoreError>;

    /// Every document matching `filter`, in store order
    async fn find_many(&self, filter: &Filter) -> Result<Vec<User>, StoreError>;

    /// Apply `mutation` to the first matching document; returns matched count
    async fn update_one(&self, filter: &Filter, mutation: &Mutation) -> Result<u64, StoreError>;

    /// Apply `mutation` to every matching document; returns matched count
    async fn update_many(&self, filter: &Filter, mutation: &Mutation) -> Result<u64, StoreError>;

    /// Delete the first matching document; returns deleted count
    async fn delete_one(&self, filter: &Filter) -> Result<u64, StoreError>;

    /// Whether `apply_two_phase` runs both updates atomically
    fn supports_transactions(&self) -> bool {
        false
    }

    /// Run `source` as an update-one and, if it matched, `targets` as an
    /// update-many, atomically
    async fn apply_two_phase(
        &self,
        _source: &PhaseUpdate,
        _targets: &PhaseUpdate,
    ) -> Result<TwoPhaseOutcome, StoreError> {
        Err(StoreError::Unsupported {
            operation: "apply_two_phase",
        })
    }

    /// Release connections; called once on shutdown
    async fn close(&self) {}
}

/// Bound a store call by `limit`
///
/// Dropping the returned future cancels the call, so a canceled request
/// does not leave the operation running.
pub async fn with_timeout<T, F>(
    limit: Duration,
    operation: &'static str,
    future: F,
) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, limit_ms = limit.as_millis() as u64, "Store call timed out");
            Err(StoreError::Timeout {
                operation,
                after_ms: limit.as_millis() as u64,
            })
        }
    }
}
