use sqlx::SqlitePool;
use tracing::info;

use crate::database::{mitid_repo, user_repo};
use crate::models::UserSummary;
use crate::services::{required, user_service, ServiceError, ServiceResult};
use crate::util::{normalize_cpr, normalize_email, now_iso};

pub struct MitidRegistration<'a> {
    pub cpr: Option<&'a str>,
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
}

/// Mock e-ID lookup: CPR number to the account it was registered with.
pub async fn lookup(pool: &SqlitePool, cpr: &str) -> ServiceResult<UserSummary> {
    let cpr = normalize_cpr(cpr);
    if cpr.is_empty() {
        return Err(ServiceError::BadRequest("cpr required".into()));
    }

    let mapping = mitid_repo::load_mapping(pool, &cpr)
        .await?
        .ok_or_else(|| ServiceError::NotFound("not found".into()))?;

    user_repo::load_user(pool, &mapping.email)
        .await?
        .map(UserSummary::from)
        .ok_or_else(|| ServiceError::NotFound("not found".into()))
}

/// Binds a CPR number to an account, creating the account passwordless if
/// needed. A CPR number can be bound once.
pub async fn register(
    pool: &SqlitePool,
    registration: MitidRegistration<'_>,
) -> ServiceResult<UserSummary> {
    let message = "cpr, name, email required";
    let cpr = normalize_cpr(&required(registration.cpr, message)?);
    let name = required(registration.name, message)?;
    let email = normalize_email(&required(registration.email, message)?);

    if mitid_repo::load_mapping(pool, &cpr).await?.is_some() {
        return Err(ServiceError::Conflict("cpr exists".into()));
    }

    let user = user_service::upsert_passwordless(pool, &email, &name).await?;

    let mut conn = pool.acquire().await?;
    mitid_repo::insert_mapping(&mut conn, &cpr, &email, &now_iso()).await?;
    info!("🪪 Bound MitID account to {}", email);

    Ok(user)
}
