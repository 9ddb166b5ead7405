//! Edge repair
//!
//! `reconcile` restores the symmetric-edge and counter invariants around one
//! user after a Phase 2 failure (or any other drift). The user's `following`
//! list is authoritative:
//!
//! - a followed user missing the reverse entry gets it back
//! - a followed id with no document is dropped from `following`
//! - a follower whose document is gone, or who no longer follows back, is
//!   dropped from `followers`
//! - both of the user's counters are set to the repaired list lengths
//!
//! Each repair is its own single-document update, so a reconcile that fails
//! halfway can simply be run again.

use std::collections::HashSet;

use serde::Serialize;

use super::{dedup_preserving_order, RelationshipService};
use crate::backend::error::GraphError;
use crate::backend::store::{CounterField, Filter, ListField, Mutation};

/// What a reconcile pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    pub user_id: String,
    /// Followed users that had lost `user_id` from their followers
    pub restored_followers: Vec<String>,
    /// Ids removed from `following` because no document has them
    pub dropped_following: Vec<String>,
    /// Ids removed from `followers`
    pub dropped_followers: Vec<String>,
    pub following_count: i64,
    pub followers_count: i64,
}

impl ReconcileReport {
    /// True when the pass found nothing to repair beyond counters
    pub fn is_clean(&self) -> bool {
        self.restored_followers.is_empty()
            && self.dropped_following.is_empty()
            && self.dropped_followers.is_empty()
    }
}

impl RelationshipService {
    pub async fn reconcile(&self, user_id: &str) -> Result<ReconcileReport, GraphError> {
        if user_id.trim().is_empty() {
            return Err(GraphError::invalid_input("user id must not be empty"));
        }

        let user = self
            .bounded("find_one", self.store.find_one(&Filter::by_id(user_id)))
            .await?
            .ok_or_else(|| GraphError::not_found(format!("no user with id '{}'", user_id)))?;

        let followed_ids = dedup_preserving_order(user.following.clone());
        let followed = if followed_ids.is_empty() {
            Vec::new()
        } else {
            self.bounded("find_many", self.store.find_many(&Filter::id_in(&followed_ids)))
                .await?
        };
        let existing: HashSet<&str> = followed.iter().map(|u| u.id.as_str()).collect();

        let dropped_following: Vec<String> = followed_ids
            .iter()
            .filter(|id| !existing.contains(id.as_str()))
            .cloned()
            .collect();

        // Reverse entries for followed users that lost them
        let mut restored_followers = Vec::new();
        for target in followed.iter().filter(|t| !t.is_followed_by(user_id)) {
            let mutation = Mutation::new()
                .push(ListField::Followers, vec![user_id.to_string()])
                .set_count(CounterField::FollowersCount, target.followers.len() as i64 + 1);
            self.bounded(
                "update_one",
                self.store.update_one(&Filter::by_id(target.id.as_str()), &mutation),
            )
            .await?;
            restored_followers.push(target.id.clone());
        }

        let follower_ids = dedup_preserving_order(user.followers.clone());
        let followers = if follower_ids.is_empty() {
            Vec::new()
        } else {
            self.bounded("find_many", self.store.find_many(&Filter::id_in(&follower_ids)))
                .await?
        };
        let following_back: HashSet<&str> = followers
            .iter()
            .filter(|f| f.is_following(user_id))
            .map(|f| f.id.as_str())
            .collect();
        let dropped_followers: Vec<String> = follower_ids
            .iter()
            .filter(|id| !following_back.contains(id.as_str()))
            .cloned()
            .collect();

        let following_count = user
            .following
            .iter()
            .filter(|id| !dropped_following.contains(id))
            .count() as i64;
        let self_restored = restored_followers.iter().any(|id| id == user_id);
        let followers_count = user
            .followers
            .iter()
            .filter(|id| !dropped_followers.contains(id))
            .count() as i64
            + i64::from(self_restored);

        let mut mutation = Mutation::new();
        if !dropped_following.is_empty() {
            mutation = mutation.pull(ListField::Following, dropped_following.clone());
        }
        if !dropped_followers.is_empty() {
            mutation = mutation.pull(ListField::Followers, dropped_followers.clone());
        }
        let mutation = mutation
            .set_count(CounterField::FollowingCount, following_count)
            .set_count(CounterField::FollowersCount, followers_count);

        let matched = self
            .bounded(
                "update_one",
                self.store.update_one(&Filter::by_id(user_id), &mutation),
            )
            .await?;
        if matched == 0 {
            return Err(GraphError::not_found(format!(
                "user '{}' was deleted during reconcile",
                user_id
            )));
        }

        let report = ReconcileReport {
            user_id: user_id.to_string(),
            restored_followers,
            dropped_following,
            dropped_followers,
            following_count,
            followers_count,
        };

        if report.is_clean() {
            tracing::debug!(user_id = %user_id, "Reconcile found no broken edges");
        } else {
            tracing::info!(
                user_id = %user_id,
                restored = ?report.restored_followers,
                dropped_following = ?report.dropped_following,
                dropped_followers = ?report.dropped_followers,
                "Reconciled edges"
            );
        }
        Ok(report)
    }
}
