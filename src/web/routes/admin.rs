use axum::{
    extract::{Path, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::models::UserSummary;
use crate::services::user_service;
use crate::web::error::{ApiError, ApiResult};
use crate::web::middleware::auth::{header_credentials, is_admin};
use crate::web::routes::ok;
use crate::web::routes::users::CredentialsBody;
use crate::web::AppState;

/// Accepts credentials from the `x-admin-*` headers or the JSON body.
pub async fn admin_login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<CredentialsBody>>,
) -> ApiResult<Json<Value>> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let (header_email, header_password) = header_credentials(&headers);
    let email = header_email.or(body.email);
    let password = header_password.or(body.password);

    if !is_admin(&state.config, email.as_deref(), password.as_deref()) {
        return Err(ApiError::Unauthorized("invalid admin credentials".into()));
    }
    Ok(Json(json!({ "email": state.config.admin_email })))
}

pub async fn admin_list_users_handler(
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Vec<UserSummary>>> {
    Ok(Json(user_service::list_users_for_admin(&pool).await?))
}

pub async fn admin_create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<Json<UserSummary>> {
    let user = user_service::create_user_as_admin(
        &state.pool,
        state.config.password_hash_iterations,
        body.as_credentials(),
    )
    .await?;
    Ok(Json(user))
}

pub async fn admin_delete_user_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Value>> {
    user_service::delete_user(&pool, &email).await?;
    Ok(ok())
}
