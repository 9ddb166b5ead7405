//! Relationship Core
//!
//! Follow and unfollow keep an edge "A follows B" recorded on both
//! documents: `B ∈ A.following` and `A ∈ B.followers`, with both counters
//! moved in the same update as their list.
//!
//! - **`mutator`** - follow/unfollow, two phases per call
//! - **`reader`** - resolve a user's following list into user documents
//! - **`reconcile`** - repair asymmetric edges and drifted counters
//! - **`handlers`** - HTTP handlers for the above
//!
//! # Phases
//!
//! Phase 1 updates the source document, Phase 2 updates every target. On a
//! collection that `supports_transactions` both run atomically through
//! `apply_two_phase`. Otherwise they run one after the other and Phase 2 is
//! retried with exponential backoff; if it still fails the call returns a
//! store failure naming the one-sided edge, and `reconcile` is the repair.

pub mod handlers;
pub mod mutator;
pub mod reader;
pub mod reconcile;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::error::StoreError;
use crate::backend::store::{with_timeout, UserCollection};

pub use mutator::EdgeChange;
pub use reconcile::ReconcileReport;

/// Behavior switches for the relationship core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphPolicy {
    /// Collapse repeated usernames in one request before mutating
    pub dedup_targets: bool,
    /// Never let an unfollow drive a counter below zero
    pub clamp_counts: bool,
    /// Upper bound on every single store call
    pub store_timeout: Duration,
    /// Extra Phase 2 attempts on non-transactional collections
    pub phase2_retries: usize,
    /// Phase 2 backoff unit; the first retry waits twice this, then doubles
    pub phase2_backoff: Duration,
}

impl Default for GraphPolicy {
    fn default() -> Self {
        Self {
            dedup_targets: false,
            clamp_counts: false,
            store_timeout: Duration::from_secs(5),
            phase2_retries: 3,
            phase2_backoff: Duration::from_millis(10),
        }
    }
}

/// Follow, unfollow, following lookup and reconcile over one collection
pub struct RelationshipService {
    store: Arc<dyn UserCollection>,
    policy: GraphPolicy,
}

impl RelationshipService {
    pub fn new(store: Arc<dyn UserCollection>, policy: GraphPolicy) -> Self {
        Self { store, policy }
    }

    async fn bounded<T, F>(&self, operation: &'static str, future: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        with_timeout(self.policy.store_timeout, operation, future).await
    }
}

/// Drop repeated ids, keeping first occurrences in order
pub(crate) fn dedup_preserving_order(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
