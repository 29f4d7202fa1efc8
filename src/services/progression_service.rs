use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::{items_repo, stats_repo, user_repo};
use crate::engine::{self, EngineError, UserStats};
use crate::models::OwnedItemRow;
use crate::services::{required, ServiceError, ServiceResult};
use crate::util::{normalize_email, now_iso};

pub const SOURCE_POINTS: &str = "shop-points";
pub const SOURCE_CURRENCY: &str = "shop-dkk";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOutcome {
    pub stats: UserStats,
    pub rounded_amount: u64,
    pub total_xp: u64,
    pub levels_gained: u32,
    pub summary: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopReceipt {
    pub stats: UserStats,
    pub item_name: String,
    pub source: String,
    pub message: String,
}

pub struct ShopOrder<'a> {
    pub item_name: Option<&'a str>,
    pub price: Option<i64>,
    pub source: Option<&'a str>,
}

/// Stored stats, or the starting stats for an identity that has none yet.
pub async fn load_stats(pool: &SqlitePool, email: &str) -> ServiceResult<UserStats> {
    let email = normalize_email(email);
    Ok(stats_repo::load_stats(pool, &email)
        .await?
        .unwrap_or_default())
}

/// Identities without an account row are guests, as is anything the client
/// flags as one.
async fn is_guest(pool: &SqlitePool, email: &str, flagged: bool) -> ServiceResult<bool> {
    if flagged {
        return Ok(true);
    }
    Ok(!user_repo::user_exists(pool, email).await?)
}

pub async fn award_purchase(
    pool: &SqlitePool,
    email: &str,
    amount: Option<f64>,
    guest: bool,
    event_name: Option<&str>,
) -> ServiceResult<PurchaseOutcome> {
    let email = normalize_email(email);
    let guest = is_guest(pool, &email, guest).await?;

    let stats = load_stats(pool, &email).await?;
    let award = engine::award_purchase(&stats, amount.unwrap_or(0.0), guest)?;

    let mut conn = pool.acquire().await?;
    stats_repo::save_stats(&mut conn, &email, &award.stats, &now_iso()).await?;

    info!(
        "⭐ {} earned {} points / {} xp (level {} -> {})",
        email, award.rounded_amount, award.total_xp, stats.level, award.stats.level
    );

    Ok(PurchaseOutcome {
        summary: award.summary(event_name),
        stats: award.stats,
        rounded_amount: award.rounded_amount,
        total_xp: award.total_xp,
        levels_gained: award.levels_gained,
    })
}

/// Point-shop and currency-shop orders. Point orders spend points and record
/// the item in one transaction; the deduction only applies while the stored
/// balance still covers the price. Currency orders are recorded as pending
/// payment and leave stats alone.
pub async fn buy_item(
    pool: &SqlitePool,
    email: &str,
    order: ShopOrder<'_>,
) -> ServiceResult<ShopReceipt> {
    let email = normalize_email(email);
    let item_name = required(order.item_name, "itemName required")?;
    let source = required(order.source, "source required")?;
    if source != SOURCE_POINTS && source != SOURCE_CURRENCY {
        return Err(ServiceError::BadRequest(format!(
            "unknown source '{}'",
            source
        )));
    }
    let price = match (source.as_str(), order.price) {
        (_, Some(p)) if p < 0 => {
            return Err(ServiceError::BadRequest("price must not be negative".into()))
        }
        (SOURCE_POINTS, None | Some(0)) => {
            return Err(ServiceError::BadRequest("price required".into()))
        }
        (_, p) => p.unwrap_or(0),
    };

    if is_guest(pool, &email, false).await? {
        return Err(EngineError::GuestNotEligible.into());
    }

    let now = now_iso();
    let mut tx = pool.begin().await?;

    let (stats, message) = if source == SOURCE_POINTS {
        let cost = price as u64;
        let deducted = stats_repo::deduct_points(&mut tx, &email, cost, &now).await?;
        let current = stats_repo::load_stats_in(&mut tx, &email)
            .await?
            .unwrap_or_default();
        if !deducted {
            return Err(EngineError::InsufficientPoints {
                available: current.points,
                required: cost,
            }
            .into());
        }
        (
            current,
            format!("Bought {} for {} points.", item_name, price),
        )
    } else {
        let current = stats_repo::load_stats_in(&mut tx, &email)
            .await?
            .unwrap_or_default();
        (
            current,
            "Payment pending. Points are awarded once the transaction completes.".to_string(),
        )
    };

    items_repo::insert_item(
        &mut tx,
        items_repo::NewOwnedItem {
            email: &email,
            item_name: &item_name,
            source: &source,
            price,
            created_at: &now,
        },
    )
    .await?;
    tx.commit().await?;

    info!("🛒 {} bought {} via {}", email, item_name, source);
    Ok(ShopReceipt {
        stats,
        item_name,
        source,
        message,
    })
}

pub async fn list_items(pool: &SqlitePool, email: &str) -> ServiceResult<Vec<OwnedItemRow>> {
    Ok(items_repo::list_items(pool, &normalize_email(email)).await?)
}
