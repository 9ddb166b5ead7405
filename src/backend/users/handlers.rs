//! User CRUD HTTP Handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::UserDirectory;
use crate::backend::error::GraphError;
use crate::shared::{MessageResponse, User};

/// `POST /v1/user/create`
pub async fn create_user(
    State(users): State<Arc<UserDirectory>>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<MessageResponse>, GraphError> {
    let Json(user) = payload?;
    let created = users.create(user).await?;
    Ok(Json(MessageResponse::new(format!(
        "user '{}' created",
        created.id
    ))))
}

/// `GET /v1/user/get/{id}`
pub async fn get_user(
    State(users): State<Arc<UserDirectory>>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, GraphError> {
    Ok(Json(users.get(&user_id).await?))
}

/// `GET /v1/user/getall`
pub async fn get_all_users(
    State(users): State<Arc<UserDirectory>>,
) -> Result<Json<Vec<User>>, GraphError> {
    Ok(Json(users.get_all().await?))
}

/// `PATCH /v1/user/update`
pub async fn update_user(
    State(users): State<Arc<UserDirectory>>,
    payload: Result<Json<User>, JsonRejection>,
) -> Result<Json<MessageResponse>, GraphError> {
    let Json(user) = payload?;
    users.update(&user).await?;
    Ok(Json(MessageResponse::new("Success")))
}

/// `DELETE /v1/user/delete/{id}`
pub async fn delete_user(
    State(users): State<Arc<UserDirectory>>,
    Path(user_id): Path<String>,
) -> Result<Json<MessageResponse>, GraphError> {
    users.delete(&user_id).await?;
    Ok(Json(MessageResponse::new("Success")))
}
