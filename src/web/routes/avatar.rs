use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::services::avatar_service::{self, AvatarView};
use crate::web::error::ApiResult;
use crate::web::routes::ok;

#[derive(Debug, Deserialize)]
pub struct AvatarBody {
    pub data: Option<Value>,
}

pub async fn get_avatar_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<AvatarView>> {
    Ok(Json(avatar_service::load_avatar(&pool, &email).await?))
}

pub async fn put_avatar_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<AvatarBody>,
) -> ApiResult<Json<Value>> {
    avatar_service::save_avatar(&pool, &email, body.data).await?;
    Ok(ok())
}
