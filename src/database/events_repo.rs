use sqlx::{Row, SqlitePool};

use crate::models::StoredEventRow;

pub struct EventUpsert<'a> {
    pub email: &'a str,
    pub event_id: &'a str,
    pub event_type: &'a str,
    pub name: &'a str,
    pub city: &'a str,
    pub date: &'a str,
    pub raw_date: &'a str,
    pub url: &'a str,
    pub created_at: &'a str,
}

#[derive(Debug, Clone)]
pub struct DatedEvent {
    pub email: String,
    pub event_id: String,
    pub raw_date: String,
}

const SQL_LIST_EVENTS: &str = r#"
SELECT event_id, event_type, name, city, date, raw_date, url
FROM events
WHERE email = ?1 AND event_type = ?2
ORDER BY raw_date ASC
"#;

const SQL_LIST_DATED_EVENTS_FOR_USER: &str = r#"
SELECT email, event_id, raw_date
FROM events
WHERE email = ?1 AND raw_date IS NOT NULL AND raw_date != ''
"#;

const SQL_LIST_ALL_DATED_EVENTS: &str = r#"
SELECT email, event_id, raw_date
FROM events
WHERE raw_date IS NOT NULL AND raw_date != ''
"#;

const SQL_UPSERT_EVENT: &str = r#"
INSERT INTO events (email, event_id, event_type, name, city, date, raw_date, url, created_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT (email, event_id, event_type) DO UPDATE SET
  name = excluded.name,
  city = excluded.city,
  date = excluded.date,
  raw_date = excluded.raw_date,
  url = excluded.url,
  created_at = excluded.created_at
"#;

const SQL_DELETE_EVENT: &str = r#"
DELETE FROM events
WHERE email = ?1 AND event_type = ?2 AND event_id = ?3
"#;

// Both the interested and attending copies go.
const SQL_DELETE_EVENT_ALL_TYPES: &str = r#"
DELETE FROM events
WHERE email = ?1 AND event_id = ?2
"#;

pub async fn list_events(
    pool: &SqlitePool,
    email: &str,
    event_type: &str,
) -> sqlx::Result<Vec<StoredEventRow>> {
    sqlx::query_as::<_, StoredEventRow>(SQL_LIST_EVENTS)
        .bind(email)
        .bind(event_type)
        .fetch_all(pool)
        .await
}

pub async fn list_dated_events(
    pool: &SqlitePool,
    email: Option<&str>,
) -> sqlx::Result<Vec<DatedEvent>> {
    let rows = match email {
        Some(email) => {
            sqlx::query(SQL_LIST_DATED_EVENTS_FOR_USER)
                .bind(email)
                .fetch_all(pool)
                .await?
        }
        None => sqlx::query(SQL_LIST_ALL_DATED_EVENTS).fetch_all(pool).await?,
    };

    Ok(rows
        .into_iter()
        .map(|row| DatedEvent {
            email: row.get("email"),
            event_id: row.get("event_id"),
            raw_date: row.get("raw_date"),
        })
        .collect())
}

pub async fn upsert_event(pool: &SqlitePool, event: EventUpsert<'_>) -> sqlx::Result<()> {
    sqlx::query(SQL_UPSERT_EVENT)
        .bind(event.email)
        .bind(event.event_id)
        .bind(event.event_type)
        .bind(event.name)
        .bind(event.city)
        .bind(event.date)
        .bind(event.raw_date)
        .bind(event.url)
        .bind(event.created_at)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete_event(
    pool: &SqlitePool,
    email: &str,
    event_type: &str,
    event_id: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_EVENT)
        .bind(email)
        .bind(event_type)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_event_all_types(
    pool: &SqlitePool,
    email: &str,
    event_id: &str,
) -> sqlx::Result<u64> {
    let result = sqlx::query(SQL_DELETE_EVENT_ALL_TYPES)
        .bind(email)
        .bind(event_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
