use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::models::UserSummary;
use crate::services::user_service::{self, Credentials};
use crate::web::error::ApiResult;
use crate::web::routes::ok;
use crate::web::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct CredentialsBody {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsBody {
    pub fn as_credentials(&self) -> Credentials<'_> {
        Credentials {
            email: self.email.as_deref(),
            password: self.password.as_deref(),
            name: self.name.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserBody {
    pub name: Option<String>,
    pub email: Option<String>,
}

pub async fn register_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<Json<UserSummary>> {
    let user = user_service::register(
        &state.pool,
        state.config.password_hash_iterations,
        body.as_credentials(),
    )
    .await?;
    Ok(Json(user))
}

pub async fn login_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<Json<UserSummary>> {
    Ok(Json(user_service::login(&pool, body.as_credentials()).await?))
}

pub async fn list_users_handler(State(pool): State<SqlitePool>) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(user_service::list_users(&pool).await?))
}

pub async fn get_user_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<UserSummary>> {
    Ok(Json(user_service::get_user(&pool, &email).await?))
}

pub async fn update_user_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<UpdateUserBody>,
) -> ApiResult<Json<UserSummary>> {
    let user =
        user_service::update_user(&pool, &email, body.email.as_deref(), body.name.as_deref())
            .await?;
    Ok(Json(user))
}

pub async fn delete_user_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Value>> {
    user_service::delete_user(&pool, &email).await?;
    Ok(ok())
}
