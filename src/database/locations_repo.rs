use sqlx::SqlitePool;

use crate::models::LocationRow;

const SQL_LIST_LOCATIONS: &str = r#"
SELECT email, lat, lng, updated_at
FROM locations
"#;

const SQL_UPSERT_LOCATION: &str = r#"
INSERT INTO locations (email, lat, lng, updated_at)
VALUES (?1, ?2, ?3, ?4)
ON CONFLICT (email) DO UPDATE SET
  lat = excluded.lat,
  lng = excluded.lng,
  updated_at = excluded.updated_at
"#;

pub async fn list_locations(pool: &SqlitePool) -> sqlx::Result<Vec<LocationRow>> {
    sqlx::query_as::<_, LocationRow>(SQL_LIST_LOCATIONS)
        .fetch_all(pool)
        .await
}

pub async fn upsert_location(
    pool: &SqlitePool,
    email: &str,
    lat: f64,
    lng: f64,
    updated_at: i64,
) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_LOCATION)
        .bind(email)
        .bind(lat)
        .bind(lng)
        .bind(updated_at)
        .execute(pool)
        .await?;
    Ok(())
}
