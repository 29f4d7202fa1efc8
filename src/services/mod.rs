pub mod avatar_service;
pub mod event_service;
pub mod friendship_service;
pub mod location_service;
pub mod mitid_service;
pub mod progression_service;
pub mod suggestion_service;
pub mod user_service;

use thiserror::Error;

use crate::auth::HashError;
use crate::engine::EngineError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Hash(#[from] HashError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Trims `value` and fails with `message` when nothing is left.
pub(crate) fn required(value: Option<&str>, message: &str) -> ServiceResult<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ServiceError::BadRequest(message.to_string()))
}
