/**
 * User Directory
 *
 * Create, read, update and delete user documents. Every store call is
 * bounded by the configured store timeout.
 *
 * # Not Found Messages
 *
 * An empty collection on `get_all` reports "documents not found"; an update
 * or delete that matches nothing reports "no matched document found for
 * update". Clients match on these strings.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::backend::error::{GraphError, StoreError};
use crate::backend::store::{with_timeout, Filter, Mutation, TextField, UserCollection};
use crate::shared::User;

const NO_DOCUMENTS: &str = "documents not found";
const NO_MATCH: &str = "no matched document found for update";

/// User CRUD over a `UserCollection`
pub struct UserDirectory {
    store: Arc<dyn UserCollection>,
    store_timeout: Duration,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserCollection>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
        }
    }

    /// Register a user
    ///
    /// The relationship lists and counters in `user` are ignored; a new user
    /// follows nobody and has no followers.
    pub async fn create(&self, mut user: User) -> Result<User, GraphError> {
        user.validate_new()?;
        user.following.clear();
        user.followers.clear();
        user.following_count = 0;
        user.followers_count = 0;

        match with_timeout(self.store_timeout, "insert_one", self.store.insert_one(&user)).await {
            Ok(()) => {}
            Err(StoreError::DuplicateKey { id }) => return Err(GraphError::Conflict { id }),
            Err(err) => return Err(err.into()),
        }

        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    pub async fn get(&self, user_id: &str) -> Result<User, GraphError> {
        with_timeout(
            self.store_timeout,
            "find_one",
            self.store.find_one(&Filter::by_id(user_id)),
        )
        .await?
        .ok_or_else(|| GraphError::not_found(format!("no user with id '{}'", user_id)))
    }

    /// Every user, in store order; an empty collection is `NotFound`
    pub async fn get_all(&self) -> Result<Vec<User>, GraphError> {
        let users = with_timeout(
            self.store_timeout,
            "find_many",
            self.store.find_many(&Filter::All),
        )
        .await?;
        if users.is_empty() {
            return Err(GraphError::not_found(NO_DOCUMENTS));
        }
        Ok(users)
    }

    /// Overwrite name, contact number and email of `user.id`
    pub async fn update(&self, user: &User) -> Result<(), GraphError> {
        if user.id.trim().is_empty() {
            return Err(GraphError::invalid_input("userId must not be empty"));
        }

        let mutation = Mutation::new()
            .set(TextField::Name, user.name.clone())
            .set(TextField::ContactNo, user.contact_no.clone())
            .set(TextField::Email, user.email.clone());
        let matched = with_timeout(
            self.store_timeout,
            "update_one",
            self.store.update_one(&Filter::by_id(user.id.as_str()), &mutation),
        )
        .await?;
        if matched != 1 {
            return Err(GraphError::not_found(NO_MATCH));
        }

        tracing::info!(user_id = %user.id, "User updated");
        Ok(())
    }

    /// Delete a user document
    ///
    /// Ids of the deleted user left in other users' lists are not removed;
    /// `get_following` skips them and `reconcile` drops them.
    pub async fn delete(&self, user_id: &str) -> Result<(), GraphError> {
        let deleted = with_timeout(
            self.store_timeout,
            "delete_one",
            self.store.delete_one(&Filter::by_id(user_id)),
        )
        .await?;
        if deleted != 1 {
            return Err(GraphError::not_found(NO_MATCH));
        }

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}
