use sqlx::{SqliteConnection, SqlitePool};

use crate::engine::UserStats;
use crate::models::UserStatsRow;

const SQL_LOAD_STATS: &str = r#"
SELECT experience, level, points
FROM user_stats
WHERE email = ?1
LIMIT 1
"#;

const SQL_SAVE_STATS: &str = r#"
INSERT INTO user_stats (email, experience, level, points, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
ON CONFLICT (email) DO UPDATE SET
  experience = excluded.experience,
  level = excluded.level,
  points = excluded.points,
  updated_at = excluded.updated_at
"#;

// Only succeeds while the balance covers the price.
const SQL_DEDUCT_POINTS: &str = r#"
UPDATE user_stats
SET points = points - ?2, updated_at = ?3
WHERE email = ?1 AND points >= ?2
"#;

pub async fn load_stats(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<UserStats>> {
    let row = sqlx::query_as::<_, UserStatsRow>(SQL_LOAD_STATS)
        .bind(email)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(UserStats::from))
}

pub async fn load_stats_in(
    conn: &mut SqliteConnection,
    email: &str,
) -> sqlx::Result<Option<UserStats>> {
    let row = sqlx::query_as::<_, UserStatsRow>(SQL_LOAD_STATS)
        .bind(email)
        .fetch_optional(conn)
        .await?;
    Ok(row.map(UserStats::from))
}

/// Subtracts `price` from the stored balance in one statement. Returns false
/// when there is no row or the balance is too small.
pub async fn deduct_points(
    conn: &mut SqliteConnection,
    email: &str,
    price: u64,
    updated_at: &str,
) -> sqlx::Result<bool> {
    let result = sqlx::query(SQL_DEDUCT_POINTS)
        .bind(email)
        .bind(to_i64(price))
        .bind(updated_at)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Last write wins.
pub async fn save_stats(
    conn: &mut SqliteConnection,
    email: &str,
    stats: &UserStats,
    updated_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_SAVE_STATS)
        .bind(email)
        .bind(to_i64(stats.experience))
        .bind(i64::from(stats.level))
        .bind(to_i64(stats.points))
        .bind(updated_at)
        .execute(conn)
        .await?;
    Ok(())
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
