use anyhow::Context;
use dotenvy::dotenv;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use eventmate::config::AppConfig;
use eventmate::create_app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("eventmate=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    info!("Connecting to database: {}", config.database_url);

    let host = config.host.clone();
    let port = config.port;
    let app = create_app(config)
        .await
        .context("cannot open database")?;

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("cannot parse host/port")?;

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback: SocketAddr = format!("{}:{}", host, port.saturating_add(1))
                .parse()
                .context("cannot parse fallback host/port")?;
            warn!("Cannot bind {}: {}. Trying {}", addr, e, fallback);
            tokio::net::TcpListener::bind(fallback)
                .await
                .context("cannot bind fallback port")?
        }
    };

    info!("🚀 Server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
