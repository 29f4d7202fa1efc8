use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::events_repo::{self, EventUpsert};
use crate::models::StoredEventRow;
use crate::services::{required, ServiceError, ServiceResult};
use crate::util::{normalize_email, now_iso, parse_event_date};

/// An event as the client picked it from the listings API.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub event_id: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub date: Option<String>,
    pub raw_date: Option<String>,
    pub url: Option<String>,
}

/// Lists the user's saved events of one type ("interested", "attending"),
/// dropping anything that already happened first.
pub async fn list_events(
    pool: &SqlitePool,
    email: &str,
    event_type: Option<&str>,
) -> ServiceResult<Vec<StoredEventRow>> {
    let email = normalize_email(email);
    let event_type = required(event_type, "type required")?;

    prune_expired(pool, Some(&email), Utc::now()).await?;
    Ok(events_repo::list_events(pool, &email, &event_type).await?)
}

pub async fn save_event(
    pool: &SqlitePool,
    email: &str,
    event_type: Option<&str>,
    event: Option<EventInput>,
) -> ServiceResult<()> {
    let message = "type, eventId, name required";
    let event = event.unwrap_or_default();
    let event_type = required(event_type, message)?;
    let event_id = required(event.event_id.as_deref(), message)?;
    let name = required(event.name.as_deref(), message)?;
    let email = normalize_email(email);

    events_repo::upsert_event(
        pool,
        EventUpsert {
            email: &email,
            event_id: &event_id,
            event_type: &event_type,
            name: &name,
            city: event.city.as_deref().unwrap_or(""),
            date: event.date.as_deref().unwrap_or(""),
            raw_date: event.raw_date.as_deref().unwrap_or(""),
            url: event.url.as_deref().unwrap_or(""),
            created_at: &now_iso(),
        },
    )
    .await?;
    Ok(())
}

pub async fn delete_event(
    pool: &SqlitePool,
    email: &str,
    event_type: Option<&str>,
    event_id: Option<&str>,
) -> ServiceResult<()> {
    let (Some(event_type), Some(event_id)) = (
        event_type.map(str::trim).filter(|s| !s.is_empty()),
        event_id.map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(ServiceError::BadRequest(
            "type and eventId required".into(),
        ));
    };

    events_repo::delete_event(pool, &normalize_email(email), event_type, event_id).await?;
    Ok(())
}

/// Deletes stored events dated before `now`. Unparseable dates are kept.
/// With `email` set only that user's events are checked.
pub async fn prune_expired(
    pool: &SqlitePool,
    email: Option<&str>,
    now: DateTime<Utc>,
) -> ServiceResult<usize> {
    let mut removed = 0;
    for event in events_repo::list_dated_events(pool, email).await? {
        let Some(when) = parse_event_date(&event.raw_date) else {
            continue;
        };
        if when < now {
            removed += events_repo::delete_event_all_types(pool, &event.email, &event.event_id)
                .await? as usize;
        }
    }

    if removed > 0 {
        info!("📅 Pruned {} past events", removed);
    }
    Ok(removed)
}
