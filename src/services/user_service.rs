use sqlx::SqlitePool;
use tracing::info;

use crate::auth::{self, HashError};
use crate::database::user_repo::{self, NewUser};
use crate::models::UserSummary;
use crate::services::{required, ServiceError, ServiceResult};
use crate::util::{normalize_email, now_iso};

pub struct Credentials<'a> {
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub name: Option<&'a str>,
}

pub async fn register(
    pool: &SqlitePool,
    iterations: u32,
    creds: Credentials<'_>,
) -> ServiceResult<UserSummary> {
    let message = "name, email, password required";
    let name = required(creds.name, message)?;
    let email = normalize_email(&required(creds.email, message)?);
    let password = creds
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ServiceError::BadRequest(message.to_string()))?;

    create_account(pool, &email, &name, Some(password), iterations).await
}

/// Admin-created accounts may skip the password; those log in by name only.
pub async fn create_user_as_admin(
    pool: &SqlitePool,
    iterations: u32,
    creds: Credentials<'_>,
) -> ServiceResult<UserSummary> {
    let message = "name and email required";
    let name = required(creds.name, message)?;
    let email = normalize_email(&required(creds.email, message)?);
    let password = creds.password.filter(|p| !p.is_empty());

    create_account(pool, &email, &name, password, iterations).await
}

async fn create_account(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password: Option<&str>,
    iterations: u32,
) -> ServiceResult<UserSummary> {
    if user_repo::user_exists(pool, email).await? {
        return Err(ServiceError::Conflict("email exists".into()));
    }

    let hashed = match password {
        Some(p) => Some(hash_off_thread(p.to_string(), iterations).await?),
        None => None,
    };
    let created_at = now_iso();

    let mut conn = pool.acquire().await?;
    user_repo::insert_user(
        &mut conn,
        NewUser {
            email,
            name,
            password: hashed.as_deref(),
            created_at: &created_at,
        },
    )
    .await?;

    info!("👤 Created account {}", email);
    Ok(UserSummary {
        email: email.to_string(),
        name: name.to_string(),
        created_at,
    })
}

/// Password login, or passwordless login for accounts that never set one.
///
/// A passwordless login with a name creates the account on first use and
/// updates the display name afterwards.
pub async fn login(pool: &SqlitePool, creds: Credentials<'_>) -> ServiceResult<UserSummary> {
    let email = normalize_email(&required(creds.email, "email required")?);
    let user = user_repo::load_user(pool, &email).await?;

    if let Some(password) = creds.password.filter(|p| !p.is_empty()) {
        let Some(user) = user else {
            return Err(ServiceError::Unauthorized("invalid credentials".into()));
        };
        let Some(stored) = user.password.as_deref() else {
            return Err(ServiceError::Unauthorized("invalid credentials".into()));
        };
        if !auth::verify_password(password, stored) {
            return Err(ServiceError::Unauthorized("invalid credentials".into()));
        }
        return Ok(user.into());
    }

    if user.as_ref().is_some_and(|u| u.password.is_some()) {
        return Err(ServiceError::Unauthorized("password required".into()));
    }

    let name = required(creds.name, "name required")?;
    upsert_passwordless(pool, &email, &name).await
}

pub(crate) async fn upsert_passwordless(
    pool: &SqlitePool,
    email: &str,
    name: &str,
) -> ServiceResult<UserSummary> {
    let mut conn = pool.acquire().await?;
    if user_repo::update_name(&mut conn, email, name).await? == 0 {
        user_repo::insert_user(
            &mut conn,
            NewUser {
                email,
                name,
                password: None,
                created_at: &now_iso(),
            },
        )
        .await?;
    }
    drop(conn);

    get_user(pool, email).await
}

pub async fn get_user(pool: &SqlitePool, email: &str) -> ServiceResult<UserSummary> {
    let email = normalize_email(email);
    user_repo::load_user(pool, &email)
        .await?
        .map(UserSummary::from)
        .ok_or_else(|| ServiceError::NotFound("not found".into()))
}

pub async fn list_users(pool: &SqlitePool) -> ServiceResult<Vec<UserSummary>> {
    Ok(user_repo::list_users_by_name(pool).await?)
}

pub async fn list_users_for_admin(pool: &SqlitePool) -> ServiceResult<Vec<UserSummary>> {
    Ok(user_repo::list_users_newest_first(pool).await?)
}

/// Updates the display name and, when `new_email` differs, moves the account
/// and everything it owns to the new identity in one transaction.
pub async fn update_user(
    pool: &SqlitePool,
    old_email: &str,
    new_email: Option<&str>,
    name: Option<&str>,
) -> ServiceResult<UserSummary> {
    let old_email = normalize_email(old_email);
    let new_email = new_email
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| old_email.clone());
    let name = required(name, "name required")?;

    if !user_repo::user_exists(pool, &old_email).await? {
        return Err(ServiceError::NotFound("not found".into()));
    }

    if new_email == old_email {
        let mut conn = pool.acquire().await?;
        user_repo::update_name(&mut conn, &old_email, &name).await?;
    } else {
        if user_repo::user_exists(pool, &new_email).await? {
            return Err(ServiceError::Conflict("email already exists".into()));
        }
        let mut tx = pool.begin().await?;
        user_repo::rename_user(&mut tx, &old_email, &new_email, &name).await?;
        tx.commit().await?;
        info!("👤 Renamed account {} -> {}", old_email, new_email);
    }

    get_user(pool, &new_email).await
}

pub async fn delete_user(pool: &SqlitePool, email: &str) -> ServiceResult<()> {
    let email = normalize_email(email);
    let mut tx = pool.begin().await?;
    let removed = user_repo::delete_user_cascade(&mut tx, &email).await?;
    tx.commit().await?;
    info!("👤 Deleted account {} (rows={})", email, removed);
    Ok(())
}

async fn hash_off_thread(password: String, iterations: u32) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || auth::hash_password(&password, iterations))
        .await
        .map_err(|_| HashError)?
}
