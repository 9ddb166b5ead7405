//! Follow / Unfollow
//!
//! Every follow/unfollow goes through `edge_mutations`, which builds the
//! list change and the counter change for each side as one mutation, so a
//! list is never updated without its counter.

use std::time::Duration;

use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;

use super::{dedup_preserving_order, GraphPolicy, RelationshipService};
use crate::backend::error::{GraphError, StoreError};
use crate::backend::store::{
    CounterField, Filter, ListField, Mutation, PhaseUpdate, TwoPhaseOutcome,
};
use crate::shared::Targets;

/// Direction of an edge change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeChange {
    Follow,
    Unfollow,
}

impl EdgeChange {
    fn as_str(&self) -> &'static str {
        match self {
            EdgeChange::Follow => "follow",
            EdgeChange::Unfollow => "unfollow",
        }
    }
}

/// Phase 1 (source) and Phase 2 (targets) updates for one edge change
///
/// Follow pushes onto the lists and adds `len(targets)` / 1 to the
/// counters. Unfollow pulls and subtracts the same amounts, floored at
/// zero when `clamp` is set.
pub fn edge_mutations(
    change: EdgeChange,
    source_id: &str,
    targets: &[String],
    clamp: bool,
) -> (PhaseUpdate, PhaseUpdate) {
    let count = targets.len() as i64;
    let source_filter = Filter::by_id(source_id);
    let targets_filter = Filter::id_in(targets);
    let source_entry = vec![source_id.to_string()];

    let (source, affected) = match change {
        EdgeChange::Follow => (
            Mutation::new()
                .push(ListField::Following, targets.to_vec())
                .inc(CounterField::FollowingCount, count),
            Mutation::new()
                .push(ListField::Followers, source_entry)
                .inc(CounterField::FollowersCount, 1),
        ),
        EdgeChange::Unfollow => {
            let source = Mutation::new().pull(ListField::Following, targets.to_vec());
            let affected = Mutation::new().pull(ListField::Followers, source_entry);
            if clamp {
                (
                    source.inc_floored(CounterField::FollowingCount, -count, 0),
                    affected.inc_floored(CounterField::FollowersCount, -1, 0),
                )
            } else {
                (
                    source.inc(CounterField::FollowingCount, -count),
                    affected.inc(CounterField::FollowersCount, -1),
                )
            }
        }
    };

    (
        PhaseUpdate::new(source_filter, source),
        PhaseUpdate::new(targets_filter, affected),
    )
}

impl RelationshipService {
    /// Record that `source_id` follows every target
    ///
    /// Returns the normalized target list. Following twice records the edge
    /// twice unless the policy dedups targets.
    pub async fn follow(
        &self,
        source_id: &str,
        targets: impl Into<Targets>,
    ) -> Result<Vec<String>, GraphError> {
        self.change_edges(EdgeChange::Follow, source_id, targets.into())
            .await
    }

    /// Remove `source_id`'s edges to every target
    ///
    /// Counters are decremented even when the edge did not exist.
    pub async fn unfollow(
        &self,
        source_id: &str,
        targets: impl Into<Targets>,
    ) -> Result<Vec<String>, GraphError> {
        self.change_edges(EdgeChange::Unfollow, source_id, targets.into())
            .await
    }

    async fn change_edges(
        &self,
        change: EdgeChange,
        source_id: &str,
        targets: Targets,
    ) -> Result<Vec<String>, GraphError> {
        if source_id.trim().is_empty() {
            return Err(GraphError::invalid_input("user id must not be empty"));
        }

        let mut targets = targets.normalize()?;
        if self.policy.dedup_targets {
            targets = dedup_preserving_order(targets);
        }

        let (source, affected) =
            edge_mutations(change, source_id, &targets, self.policy.clamp_counts);

        tracing::debug!(
            change = change.as_str(),
            source_id = %source_id,
            targets = ?targets,
            transactional = self.store.supports_transactions(),
            "Applying edge change"
        );

        let targets_matched = if self.store.supports_transactions() {
            let outcome = self
                .bounded(
                    "apply_two_phase",
                    self.store.apply_two_phase(&source, &affected),
                )
                .await?;
            match outcome {
                TwoPhaseOutcome::SourceMissing => return Err(source_missing(source_id)),
                TwoPhaseOutcome::Applied {
                    targets_matched, ..
                } => targets_matched,
            }
        } else {
            let matched = self
                .bounded(
                    "update_one",
                    self.store.update_one(&source.filter, &source.mutation),
                )
                .await?;
            if matched == 0 {
                return Err(source_missing(source_id));
            }
            self.phase_two_with_retry(source_id, &targets, &affected)
                .await?
        };

        if targets_matched < targets.len() as u64 {
            tracing::warn!(
                change = change.as_str(),
                source_id = %source_id,
                requested = targets.len(),
                matched = targets_matched,
                "Some targets matched no user"
            );
        }
        tracing::info!(
            change = change.as_str(),
            source_id = %source_id,
            targets = ?targets,
            "Edge change recorded"
        );

        Ok(targets)
    }

    /// Phase 2 on a non-transactional collection
    ///
    /// Phase 1 is already persisted here; failures after the last retry are
    /// reported as an asymmetric edge.
    async fn phase_two_with_retry(
        &self,
        source_id: &str,
        targets: &[String],
        update: &PhaseUpdate,
    ) -> Result<u64, StoreError> {
        let strategy = phase_two_backoff(&self.policy).map(jitter);

        let service = self;
        let result = Retry::start(strategy, move || async move {
            let attempt = service
                .bounded(
                    "update_many",
                    service
                        .store
                        .update_many(&update.filter, &update.mutation),
                )
                .await;
            if let Err(ref err) = attempt {
                tracing::warn!(source_id = %source_id, error = %err, "Phase 2 update failed");
            }
            attempt
        })
        .await;

        result.map_err(|err| {
            tracing::error!(
                source_id = %source_id,
                targets = ?targets,
                error = %err,
                "Phase 2 gave up; edge left asymmetric"
            );
            StoreError::AsymmetricEdge {
                source_id: source_id.to_string(),
                targets: targets.to_vec(),
                cause: Box::new(err),
            }
        })
    }
}

/// Delays between Phase 2 attempts before jitter
///
/// Doubles from twice the configured backoff and is capped at one second.
fn phase_two_backoff(policy: &GraphPolicy) -> impl Iterator<Item = Duration> {
    let base_ms = (policy.phase2_backoff.as_millis() as u64).max(1);
    ExponentialBackoff::from_millis(2)
        .factor(base_ms)
        .max_delay(Duration::from_secs(1))
        .take(policy.phase2_retries)
}

fn source_missing(source_id: &str) -> GraphError {
    GraphError::not_found(format!("no user with id '{}'", source_id))
}
