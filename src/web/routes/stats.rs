use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::engine::UserStats;
use crate::models::OwnedItemRow;
use crate::services::progression_service::{self, PurchaseOutcome, ShopOrder, ShopReceipt};
use crate::web::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseBody {
    pub amount: Option<f64>,
    #[serde(default)]
    pub guest: bool,
    pub event_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBody {
    pub item_name: Option<String>,
    pub price: Option<i64>,
    pub source: Option<String>,
}

pub async fn get_stats_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<UserStats>> {
    Ok(Json(progression_service::load_stats(&pool, &email).await?))
}

pub async fn purchase_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<PurchaseBody>,
) -> ApiResult<Json<PurchaseOutcome>> {
    let outcome = progression_service::award_purchase(
        &pool,
        &email,
        body.amount,
        body.guest,
        body.event_name.as_deref(),
    )
    .await?;
    Ok(Json(outcome))
}

pub async fn list_items_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
) -> ApiResult<Json<Vec<OwnedItemRow>>> {
    Ok(Json(progression_service::list_items(&pool, &email).await?))
}

pub async fn buy_item_handler(
    Path(email): Path<String>,
    State(pool): State<SqlitePool>,
    Json(body): Json<ItemBody>,
) -> ApiResult<Json<ShopReceipt>> {
    let receipt = progression_service::buy_item(
        &pool,
        &email,
        ShopOrder {
            item_name: body.item_name.as_deref(),
            price: body.price,
            source: body.source.as_deref(),
        },
    )
    .await?;
    Ok(Json(receipt))
}
