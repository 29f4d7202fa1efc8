use sqlx::{SqliteConnection, SqlitePool};

use crate::models::MitidAccountRow;

const SQL_LOAD_MAPPING: &str = r#"
SELECT cpr, email, created_at
FROM mitid_accounts
WHERE cpr = ?1
LIMIT 1
"#;

const SQL_INSERT_MAPPING: &str = r#"
INSERT INTO mitid_accounts (cpr, email, created_at)
VALUES (?1, ?2, ?3)
"#;

pub async fn load_mapping(pool: &SqlitePool, cpr: &str) -> sqlx::Result<Option<MitidAccountRow>> {
    sqlx::query_as::<_, MitidAccountRow>(SQL_LOAD_MAPPING)
        .bind(cpr)
        .fetch_optional(pool)
        .await
}

pub async fn insert_mapping(
    conn: &mut SqliteConnection,
    cpr: &str,
    email: &str,
    created_at: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_MAPPING)
        .bind(cpr)
        .bind(email)
        .bind(created_at)
        .execute(conn)
        .await?;
    Ok(())
}
