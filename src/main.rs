//! Entry point: load config, wire dependencies, and run the server.

use chatgate::auth::TokenVerifier;
use chatgate::config::Config;
use chatgate::db;
use chatgate::{create_app, AppState, PgUserStore, RoomHub};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db_pool = db::create_pool(&config.database_url)?;
    let state = AppState::new(
        TokenVerifier::new(&config.token),
        Arc::new(PgUserStore::new(db_pool)),
        RoomHub::new(),
        config.access_cookie_name.clone(),
    );

    let app = create_app(state, &config.static_dir);

    tracing::info!(
        addr = %config.server_addr,
        cookie = %config.access_cookie_name,
        static_dir = %config.static_dir.display(),
        "listening"
    );
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
