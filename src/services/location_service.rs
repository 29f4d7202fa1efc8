use sqlx::SqlitePool;
use tracing::debug;

use crate::database::locations_repo;
use crate::engine::{GeoPoint, LocationMap};
use crate::services::{ServiceError, ServiceResult};
use crate::util::{normalize_email, now_millis};

/// Every stored location keyed by identity.
pub async fn location_map(pool: &SqlitePool) -> ServiceResult<LocationMap> {
    let rows = locations_repo::list_locations(pool).await?;
    Ok(rows
        .iter()
        .map(|row| (row.email.clone(), row.to_location()))
        .collect())
}

/// Stores a geolocation reading. Last write wins; out-of-range coordinates
/// are rejected before anything is written.
pub async fn save_location(
    pool: &SqlitePool,
    email: &str,
    lat: Option<f64>,
    lng: Option<f64>,
    updated_at: Option<i64>,
) -> ServiceResult<()> {
    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(ServiceError::BadRequest("lat and lng required".into()));
    };
    let point = GeoPoint::new(lat, lng)?;
    let email = normalize_email(email);
    let updated_at = updated_at.filter(|t| *t > 0).unwrap_or_else(now_millis);

    locations_repo::upsert_location(pool, &email, point.latitude, point.longitude, updated_at)
        .await?;
    debug!("📍 Location saved for {}", email);
    Ok(())
}
