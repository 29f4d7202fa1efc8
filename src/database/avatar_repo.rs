use sqlx::SqlitePool;

use crate::models::AvatarRow;

const SQL_LOAD_AVATAR: &str = r#"
SELECT data, updated_at
FROM avatars
WHERE email = ?1
LIMIT 1
"#;

const SQL_UPSERT_AVATAR: &str = r#"
INSERT INTO avatars (email, data, updated_at)
VALUES (?1, ?2, ?3)
ON CONFLICT (email) DO UPDATE SET
  data = excluded.data,
  updated_at = excluded.updated_at
"#;

pub async fn load_avatar(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<AvatarRow>> {
    sqlx::query_as::<_, AvatarRow>(SQL_LOAD_AVATAR)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn upsert_avatar(
    pool: &SqlitePool,
    email: &str,
    data_json: &str,
    updated_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_AVATAR)
        .bind(email)
        .bind(data_json)
        .bind(updated_at)
        .execute(pool)
        .await?;
    Ok(())
}
