use sqlx::{Row, SqliteConnection, SqlitePool};

const SQL_LIST_REQUESTS: &str = r#"
SELECT from_email
FROM friend_requests
WHERE email = ?1
ORDER BY rowid ASC
"#;

const SQL_INSERT_REQUEST: &str = r#"
INSERT INTO friend_requests (email, from_email)
VALUES (?1, ?2)
ON CONFLICT DO NOTHING
"#;

const SQL_DELETE_REQUEST: &str = r#"
DELETE FROM friend_requests
WHERE email = ?1 AND from_email = ?2
"#;

/// Senders of pending requests addressed to `email`.
pub async fn list_requests(pool: &SqlitePool, email: &str) -> sqlx::Result<Vec<String>> {
    let rows = sqlx::query(SQL_LIST_REQUESTS)
        .bind(email)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|r| r.get("from_email")).collect())
}

pub async fn insert_request(
    conn: &mut SqliteConnection,
    email: &str,
    from_email: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_REQUEST)
        .bind(email)
        .bind(from_email)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_request(
    conn: &mut SqliteConnection,
    email: &str,
    from_email: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_REQUEST)
        .bind(email)
        .bind(from_email)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
