use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::models::UserSummary;
use crate::services::mitid_service::{self, MitidRegistration};
use crate::web::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct MitidRegisterBody {
    pub cpr: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub async fn mitid_lookup_handler(
    Path(cpr): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<UserSummary>> {
    Ok(Json(mitid_service::lookup(&pool, &cpr).await?))
}

pub async fn mitid_register_handler(
    State(pool): State<SqlitePool>,
    Json(body): Json<MitidRegisterBody>,
) -> ApiResult<Json<UserSummary>> {
    let user = mitid_service::register(
        &pool,
        MitidRegistration {
            cpr: body.cpr.as_deref(),
            name: body.name.as_deref(),
            email: body.email.as_deref(),
        },
    )
    .await?;
    Ok(Json(user))
}
