//! In-memory user collection
//!
//! Documents live in a `Vec` behind a tokio `RwLock`, so insertion order is
//! the store order. Used when no database is configured and by the tests.
//! Both phases of a follow/unfollow run under one write lock, which makes
//! `apply_two_phase` atomic.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::document::{Filter, Mutation, PhaseUpdate, TwoPhaseOutcome};
use super::UserCollection;
use crate::backend::error::StoreError;
use crate::shared::User;

/// Shared in-process collection; clones see the same documents
#[derive(Debug, Clone, Default)]
pub struct MemoryUserCollection {
    documents: Arc<RwLock<Vec<User>>>,
}

impl MemoryUserCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection already holding `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        Self {
            documents: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    /// Number of documents
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn update_first(documents: &mut [User], filter: &Filter, mutation: &Mutation) -> u64 {
    match documents.iter_mut().find(|user| filter.matches(user)) {
        Some(user) => {
            mutation.apply(user);
            1
        }
        None => 0,
    }
}

fn update_all(documents: &mut [User], filter: &Filter, mutation: &Mutation) -> u64 {
    let mut matched = 0;
    for user in documents.iter_mut().filter(|user| filter.matches(user)) {
        mutation.apply(user);
        matched += 1;
    }
    matched
}

#[async_trait]
impl UserCollection for MemoryUserCollection {
    async fn insert_one(&self, user: &User) -> Result<(), StoreError> {
        let mut documents = self.documents.write().await;
        if documents.iter().any(|existing| existing.id == user.id) {
            return Err(StoreError::DuplicateKey {
                id: user.id.clone(),
            });
        }
        documents.push(user.clone());
        Ok(())
    }

    async fn find_one(&self, filter: &Filter) -> Result<Option<User>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents.iter().find(|user| filter.matches(user)).cloned())
    }

    async fn find_many(&self, filter: &Filter) -> Result<Vec<User>, StoreError> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|user| filter.matches(user))
            .cloned()
            .collect())
    }

    async fn update_one(&self, filter: &Filter, mutation: &Mutation) -> Result<u64, StoreError> {
        if mutation.is_empty() {
            return Err(StoreError::EmptyMutation);
        }
        let mut documents = self.documents.write().await;
        Ok(update_first(&mut documents, filter, mutation))
    }

    async fn update_many(&self, filter: &Filter, mutation: &Mutation) -> Result<u64, StoreError> {
        if mutation.is_empty() {
            return Err(StoreError::EmptyMutation);
        }
        let mut documents = self.documents.write().await;
        Ok(update_all(&mut documents, filter, mutation))
    }

    async fn delete_one(&self, filter: &Filter) -> Result<u64, StoreError> {
        let mut documents = self.documents.write().await;
        match documents.iter().position(|user| filter.matches(user)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn supports_transactions(&self) -> bool {
        true
    }

    async fn apply_two_phase(
        &self,
        source: &PhaseUpdate,
        targets: &PhaseUpdate,
    ) -> Result<TwoPhaseOutcome, StoreError> {
        if source.mutation.is_empty() || targets.mutation.is_empty() {
            return Err(StoreError::EmptyMutation);
        }
        let mut documents = self.documents.write().await;

        let source_matched = update_first(&mut documents, &source.filter, &source.mutation);
        if source_matched == 0 {
            return Ok(TwoPhaseOutcome::SourceMissing);
        }
        let targets_matched = update_all(&mut documents, &targets.filter, &targets.mutation);

        Ok(TwoPhaseOutcome::Applied {
            source_matched,
            targets_matched,
        })
    }
}
