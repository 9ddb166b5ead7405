//! Following lookup

use super::RelationshipService;
use crate::backend::error::GraphError;
use crate::backend::store::Filter;
use crate::shared::User;

impl RelationshipService {
    /// Resolve the users `user_id` follows into their documents
    ///
    /// Ids in `following` that match no document are skipped, and an id
    /// recorded twice still yields one document. Order is the store's.
    pub async fn get_following(&self, user_id: &str) -> Result<Vec<User>, GraphError> {
        if user_id.trim().is_empty() {
            return Err(GraphError::invalid_input("user id must not be empty"));
        }

        let user = self
            .bounded("find_one", self.store.find_one(&Filter::by_id(user_id)))
            .await?
            .ok_or_else(|| GraphError::not_found(format!("no user with id '{}'", user_id)))?;

        if user.following.is_empty() {
            return Ok(Vec::new());
        }

        let followed = self
            .bounded(
                "find_many",
                self.store.find_many(&Filter::id_in(&user.following)),
            )
            .await?;

        tracing::debug!(
            user_id = %user_id,
            recorded = user.following.len(),
            resolved = followed.len(),
            "Resolved following list"
        );
        Ok(followed)
    }
}
