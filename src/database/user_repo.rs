use sqlx::{SqliteConnection, SqlitePool};

use crate::database::schema::OWNED_COLUMNS;
use crate::models::{UserRow, UserSummary};

pub struct NewUser<'a> {
    pub email: &'a str,
    pub name: &'a str,
    pub password: Option<&'a str>,
    pub created_at: &'a str,
}

const SQL_LOAD_USER: &str = r#"
SELECT email, name, password, created_at
FROM users
WHERE email = ?1
LIMIT 1
"#;

const SQL_LIST_USERS_BY_NAME: &str = r#"
SELECT email, name, created_at
FROM users
ORDER BY name COLLATE NOCASE ASC, email ASC
"#;

const SQL_LIST_USERS_NEWEST_FIRST: &str = r#"
SELECT email, name, created_at
FROM users
ORDER BY created_at DESC
"#;

const SQL_INSERT_USER: &str = r#"
INSERT INTO users (email, name, password, created_at)
VALUES (?1, ?2, ?3, ?4)
"#;

const SQL_UPDATE_NAME: &str = r#"
UPDATE users SET name = ?2 WHERE email = ?1
"#;

pub async fn load_user(pool: &SqlitePool, email: &str) -> sqlx::Result<Option<UserRow>> {
    sqlx::query_as::<_, UserRow>(SQL_LOAD_USER)
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn user_exists(pool: &SqlitePool, email: &str) -> sqlx::Result<bool> {
    Ok(load_user(pool, email).await?.is_some())
}

pub async fn list_users_by_name(pool: &SqlitePool) -> sqlx::Result<Vec<UserSummary>> {
    sqlx::query_as::<_, UserSummary>(SQL_LIST_USERS_BY_NAME)
        .fetch_all(pool)
        .await
}

pub async fn list_users_newest_first(pool: &SqlitePool) -> sqlx::Result<Vec<UserSummary>> {
    sqlx::query_as::<_, UserSummary>(SQL_LIST_USERS_NEWEST_FIRST)
        .fetch_all(pool)
        .await
}

pub async fn insert_user(conn: &mut SqliteConnection, user: NewUser<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_INSERT_USER)
        .bind(user.email)
        .bind(user.name)
        .bind(user.password)
        .bind(user.created_at)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn update_name(conn: &mut SqliteConnection, email: &str, name: &str) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_UPDATE_NAME)
        .bind(email)
        .bind(name)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

/// Moves an account and everything it owns to a new identity.
/// Run inside a transaction; the caller checks for conflicts first.
pub async fn rename_user(
    conn: &mut SqliteConnection,
    old_email: &str,
    new_email: &str,
    name: &str,
) -> sqlx::Result<()> {
    sqlx::query("UPDATE users SET email = ?1, name = ?2 WHERE email = ?3")
        .bind(new_email)
        .bind(name)
        .bind(old_email)
        .execute(&mut *conn)
        .await?;

    for (table, column) in OWNED_COLUMNS {
        let sql = format!("UPDATE {table} SET {column} = ?1 WHERE {column} = ?2");
        sqlx::query(&sql)
            .bind(new_email)
            .bind(old_email)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Removes an account and every row it owns. Run inside a transaction.
pub async fn delete_user_cascade(conn: &mut SqliteConnection, email: &str) -> sqlx::Result<u64> {
    for (table, column) in OWNED_COLUMNS {
        let sql = format!("DELETE FROM {table} WHERE {column} = ?1");
        sqlx::query(&sql).bind(email).execute(&mut *conn).await?;
    }

    let result = sqlx::query("DELETE FROM users WHERE email = ?1")
        .bind(email)
        .execute(&mut *conn)
        .await?;
    Ok(result.rows_affected())
}
