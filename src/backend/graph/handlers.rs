//! Relationship HTTP Handlers
//!
//! Thin wrappers: decode the body into `Targets`, call the service, return
//! JSON. Errors render through `GraphError`'s `IntoResponse`.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::{ReconcileReport, RelationshipService};
use crate::backend::error::GraphError;
use crate::shared::{FollowRequest, UnfollowRequest, User};

/// `POST /v1/user/follow/{id}` with `{"followUser": ..}` or `{"followUsers": [..]}`
pub async fn follow(
    State(graph): State<Arc<RelationshipService>>,
    Path(user_id): Path<String>,
    payload: Result<Json<FollowRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, GraphError> {
    let Json(request) = payload?;
    let targets = request.into_targets()?;
    let followed = graph.follow(&user_id, targets).await?;
    Ok(Json(followed))
}

/// `POST /v1/user/unfollow/{id}` with `{"unfollowUser": ..}` or `{"unfollowUsers": [..]}`
pub async fn unfollow(
    State(graph): State<Arc<RelationshipService>>,
    Path(user_id): Path<String>,
    payload: Result<Json<UnfollowRequest>, JsonRejection>,
) -> Result<Json<Vec<String>>, GraphError> {
    let Json(request) = payload?;
    let targets = request.into_targets()?;
    let unfollowed = graph.unfollow(&user_id, targets).await?;
    Ok(Json(unfollowed))
}

/// `GET /v1/user/getFollowing/{id}`
pub async fn get_following(
    State(graph): State<Arc<RelationshipService>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<User>>, GraphError> {
    Ok(Json(graph.get_following(&user_id).await?))
}

/// `POST /v1/user/reconcile/{id}`
pub async fn reconcile(
    State(graph): State<Arc<RelationshipService>>,
    Path(user_id): Path<String>,
) -> Result<Json<ReconcileReport>, GraphError> {
    Ok(Json(graph.reconcile(&user_id).await?))
}
