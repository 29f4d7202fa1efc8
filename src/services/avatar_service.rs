use serde::Serialize;
use serde_json::Value;
use sqlx::SqlitePool;
use tracing::warn;

use crate::database::avatar_repo;
use crate::services::{ServiceError, ServiceResult};
use crate::util::{normalize_email, now_iso};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarView {
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Avatars are opaque JSON owned by the client's renderer.
pub async fn load_avatar(pool: &SqlitePool, email: &str) -> ServiceResult<AvatarView> {
    let email = normalize_email(email);
    let Some(row) = avatar_repo::load_avatar(pool, &email).await? else {
        return Ok(AvatarView {
            data: None,
            updated_at: None,
        });
    };

    let data = match serde_json::from_str::<Value>(&row.data) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!("Stored avatar for {} is not valid JSON: {}", email, e);
            None
        }
    };

    Ok(AvatarView {
        data,
        updated_at: Some(row.updated_at),
    })
}

pub async fn save_avatar(pool: &SqlitePool, email: &str, data: Option<Value>) -> ServiceResult<()> {
    let data = data
        .filter(|v| !v.is_null())
        .ok_or_else(|| ServiceError::BadRequest("data required".into()))?;
    let email = normalize_email(email);
    avatar_repo::upsert_avatar(pool, &email, &data.to_string(), &now_iso()).await?;
    Ok(())
}
