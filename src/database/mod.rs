pub mod avatar_repo;
pub mod events_repo;
pub mod friends_repo;
pub mod items_repo;
pub mod locations_repo;
pub mod mitid_repo;
pub mod requests_repo;
pub mod schema;
pub mod stats_repo;
pub mod user_repo;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Opens the pool and makes sure every table exists.
///
/// An in-memory database lives per connection, so it gets a single one.
pub async fn connect(database_url: &str) -> sqlx::Result<SqlitePool> {
    let in_memory = database_url.contains(":memory:");
    let mut options = SqlitePoolOptions::new().max_connections(if in_memory { 1 } else { 8 });
    if in_memory {
        options = options.idle_timeout(None).max_lifetime(None);
    }
    let pool = options
        .connect(database_url)
        .await?;
    schema::init_schema(&pool).await?;
    Ok(pool)
}
