use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ornate_server::config::AppConfig;
use ornate_server::state::AppState;
use ornate_server::{build_router, database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ornate_server=info,tower_http=info,sea_orm=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = database::init_db(&config.database.url)
        .await
        .context("Failed to initialize database")?;
    info!("Database connection established");

    seed::ensure_indexes(&db).await?;
    if config.database.seed_demo {
        seed::seed_jewellery(&db)
            .await
            .context("Failed to seed demo catalog")?;
    }

    let images = common::storage::connect(&config.storage)
        .await
        .context("Failed to initialize image storage")?;
    info!(backend = ?config.storage.backend, "Image storage ready");

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        db,
        images,
        config,
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
