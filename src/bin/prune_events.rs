use anyhow::Context;
use chrono::Utc;
use dotenvy::dotenv;

use eventmate::config::AppConfig;
use eventmate::database;
use eventmate::services::event_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();
    let pool = database::connect(&config.database_url)
        .await
        .context("cannot open database")?;

    let removed = event_service::prune_expired(&pool, None, Utc::now())
        .await
        .context("event pruning failed")?;
    println!("pruned {} past events", removed);
    Ok(())
}
