use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::services::friendship_service;
use crate::web::error::ApiResult;
use crate::web::routes::ok;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FriendParams {
    pub friend_email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    pub from_email: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    pub target_email: Option<String>,
}

pub async fn list_friends_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(friendship_service::list_friends(&pool, &email).await?))
}

pub async fn add_friend_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<FriendParams>,
) -> ApiResult<Json<Value>> {
    friendship_service::add_friend_edge(&pool, &email, body.friend_email.as_deref()).await?;
    Ok(ok())
}

pub async fn remove_friend_handler(
    Path(email): Path<String>,
    Query(params): Query<FriendParams>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Value>> {
    friendship_service::remove_friend_edge(&pool, &email, params.friend_email.as_deref())
        .await?;
    Ok(ok())
}

pub async fn remove_friendship_handler(
    Path(email): Path<String>,
    Query(params): Query<FriendParams>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Value>> {
    friendship_service::remove_friendship(&pool, &email, params.friend_email.as_deref())
        .await?;
    Ok(ok())
}

pub async fn list_requests_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(friendship_service::list_requests(&pool, &email).await?))
}

pub async fn add_request_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<RequestParams>,
) -> ApiResult<Json<Value>> {
    friendship_service::add_request_edge(&pool, &email, body.from_email.as_deref()).await?;
    Ok(ok())
}

pub async fn delete_request_handler(
    Path(email): Path<String>,
    Query(params): Query<RequestParams>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Value>> {
    friendship_service::delete_request(&pool, &email, params.from_email.as_deref()).await?;
    Ok(ok())
}

pub async fn send_request_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<SendRequestBody>,
) -> ApiResult<Json<Value>> {
    friendship_service::send_request(&pool, &email, body.target_email.as_deref()).await?;
    Ok(ok())
}

pub async fn accept_request_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<RequestParams>,
) -> ApiResult<Json<Value>> {
    friendship_service::accept_request(&pool, &email, body.from_email.as_deref()).await?;
    Ok(ok())
}

pub async fn decline_request_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<RequestParams>,
) -> ApiResult<Json<Value>> {
    friendship_service::decline_request(&pool, &email, body.from_email.as_deref()).await?;
    Ok(ok())
}
