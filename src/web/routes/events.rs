use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use sqlx::SqlitePool;

use crate::models::StoredEventRow;
use crate::services::event_service::{self, EventInput};
use crate::web::error::ApiResult;
use crate::web::routes::ok;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventQuery {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub event_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveEventBody {
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub event: Option<EventInput>,
}

pub async fn list_events_handler(
    Path(email): Path<String>,
    Query(query): Query<EventQuery>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Vec<StoredEventRow>>> {
    let events = event_service::list_events(&pool, &email, query.event_type.as_deref()).await?;
    Ok(Json(events))
}

pub async fn save_event_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<SaveEventBody>,
) -> ApiResult<Json<Value>> {
    event_service::save_event(&pool, &email, body.event_type.as_deref(), body.event).await?;
    Ok(ok())
}

pub async fn delete_event_handler(
    Path(email): Path<String>,
    Query(query): Query<EventQuery>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Value>> {
    event_service::delete_event(
        &pool,
        &email,
        query.event_type.as_deref(),
        query.event_id.as_deref(),
    )
    .await?;
    Ok(ok())
}
