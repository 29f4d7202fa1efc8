use sqlx::{Row, SqliteConnection, SqlitePool};

const SQL_LIST_FRIENDS: &str = r#"
SELECT friend_email
FROM friends
WHERE email = ?1
ORDER BY rowid ASC
"#;

// The requester's own edges plus the edges of each of their friends.
const SQL_LIST_TWO_HOP_EDGES: &str = r#"
SELECT email, friend_email
FROM friends
WHERE email = ?1
   OR email IN (SELECT friend_email FROM friends WHERE email = ?1)
ORDER BY rowid ASC
"#;

const SQL_INSERT_FRIEND_EDGE: &str = r#"
INSERT INTO friends (email, friend_email)
VALUES (?1, ?2)
ON CONFLICT DO NOTHING
"#;

const SQL_DELETE_FRIEND_EDGE: &str = r#"
DELETE FROM friends
WHERE email = ?1 AND friend_email = ?2
"#;

pub async fn list_friends(pool: &SqlitePool, email: &str) -> sqlx::Result<Vec<String>> {
    let rows = sqlx::query(SQL_LIST_FRIENDS)
        .bind(email)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|r| r.get("friend_email")).collect())
}

pub async fn list_two_hop_edges(
    pool: &SqlitePool,
    email: &str,
) -> sqlx::Result<Vec<(String, String)>> {
    let rows = sqlx::query(SQL_LIST_TWO_HOP_EDGES)
        .bind(email)
        .fetch_all(pool)
        .await?;
    Ok(rows
        .into_iter()
        .map(|r| (r.get("email"), r.get("friend_email")))
        .collect())
}

pub async fn insert_friend_edge(
    conn: &mut SqliteConnection,
    email: &str,
    friend_email: &str,
) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_FRIEND_EDGE)
        .bind(email)
        .bind(friend_email)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete_friend_edge(
    conn: &mut SqliteConnection,
    email: &str,
    friend_email: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_FRIEND_EDGE)
        .bind(email)
        .bind(friend_email)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
