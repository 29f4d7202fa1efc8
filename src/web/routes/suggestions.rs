use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::SqlitePool;

use crate::services::suggestion_service::{self, SuggestionPage};
use crate::web::error::ApiResult;

pub async fn suggestions_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<SuggestionPage>> {
    Ok(Json(suggestion_service::suggestions_for(&pool, &email).await?))
}
