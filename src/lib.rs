pub mod auth;
pub mod config;
pub mod database;
pub mod engine;
pub mod models;
pub mod services;
pub mod util;
pub mod web;

use axum::Router;

use crate::config::AppConfig;
use crate::web::AppState;

/// Connects to the configured database and builds the full router.
pub async fn create_app(config: AppConfig) -> sqlx::Result<Router> {
    let pool = database::connect(&config.database_url).await?;
    Ok(web::router::build_router(AppState::new(pool, config)))
}
