/**
 * Application State
 *
 * `AppState` holds the two services handlers talk to; both share one
 * `UserCollection`. `FromRef` lets each handler extract only the service it uses:
 *
 * ```rust,ignore
 * async fn handler(State(graph): State<Arc<RelationshipService>>) { .. }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::graph::{GraphPolicy, RelationshipService};
use crate::backend::store::UserCollection;
use crate::backend::users::UserDirectory;

#[derive(Clone)]
pub struct AppState {
    /// Follow, unfollow, following lookup and reconcile
    pub relationships: Arc<RelationshipService>,

    /// User CRUD
    pub users: Arc<UserDirectory>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserCollection>, policy: GraphPolicy) -> Self {
        let users = Arc::new(UserDirectory::new(store.clone(), policy.store_timeout));
        let relationships = Arc::new(RelationshipService::new(store, policy));
        Self {
            relationships,
            users,
        }
    }
}

impl FromRef<AppState> for Arc<RelationshipService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.relationships.clone()
    }
}

impl FromRef<AppState> for Arc<UserDirectory> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}
