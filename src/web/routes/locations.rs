use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::engine::LocationMap;
use crate::services::location_service;
use crate::web::error::ApiResult;
use crate::web::routes::ok;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub updated_at: Option<i64>,
}

pub async fn list_locations_handler(State(pool): State<SqlitePool>) -> ApiResult<Json<LocationMap>> {
    Ok(Json(location_service::location_map(&pool).await?))
}

pub async fn save_location_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<LocationBody>,
) -> ApiResult<Json<Value>> {
    location_service::save_location(&pool, &email, body.lat, body.lng, body.updated_at).await?;
    Ok(ok())
}
