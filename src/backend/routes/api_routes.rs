/**
 * API Routes
 *
 * ## Users
 * - `POST /v1/user/create` - Register a user
 * - `GET /v1/user/get/{id}` - Fetch one user
 * - `GET /v1/user/getall` - Fetch every user
 * - `PATCH /v1/user/update` - Change name, contact number, email
 * - `DELETE /v1/user/delete/{id}` - Delete a user
 *
 * ## Relationships
 * - `POST /v1/user/follow/{id}` - `{"followUser": ..}` or `{"followUsers": [..]}`
 * - `POST /v1/user/unfollow/{id}` - `{"unfollowUser": ..}` or `{"unfollowUsers": [..]}`
 * - `GET /v1/user/getFollowing/{id}` - Users `id` follows
 * - `POST /v1/user/reconcile/{id}` - Repair `id`'s edges and counters
 */

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::graph::handlers::{follow, get_following, reconcile, unfollow};
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{
    create_user, delete_user, get_all_users, get_user, update_user,
};

/// Prefix shared by every user route
pub const USER_API_PREFIX: &str = "/v1/user";

/// Add the `/v1/user` routes to `router`
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    let user_routes = Router::new()
        // User CRUD
        .route("/create", post(create_user))
        .route("/get/{id}", get(get_user))
        .route("/getall", get(get_all_users))
        .route("/update", patch(update_user))
        .route("/delete/{id}", delete(delete_user))
        // Relationships
        .route("/follow/{id}", post(follow))
        .route("/unfollow/{id}", post(unfollow))
        .route("/getFollowing/{id}", get(get_following))
        .route("/reconcile/{id}", post(reconcile));

    router.nest(USER_API_PREFIX, user_routes)
}
