use std::sync::Arc;

use anyhow::Context;
use common::storage::{AssetStore, FilesystemAssetStore, InMemoryAssetStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tubely::config::{AppConfig, StorageBackend};
use tubely::database::init_db;
use tubely::repository::{InMemoryVideoRepository, SeaOrmVideoRepository, VideoRepository};
use tubely::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let videos: Arc<dyn VideoRepository> = if config.database.url.trim().is_empty() {
        warn!("No database URL configured; video records will not survive a restart");
        Arc::new(InMemoryVideoRepository::new())
    } else {
        let db = init_db(&config.database.url)
            .await
            .context("Failed to connect to database")?;
        info!("Database connected");
        Arc::new(SeaOrmVideoRepository::new(db))
    };

    let store: Arc<dyn AssetStore> = match config.storage.backend {
        StorageBackend::Filesystem => Arc::new(
            FilesystemAssetStore::new(
                config.storage.assets_root.clone(),
                config.server.base_url(),
            )
            .await
            .with_context(|| {
                format!(
                    "Failed to prepare assets root {}",
                    config.storage.assets_root.display()
                )
            })?,
        ),
        StorageBackend::Memory => Arc::new(InMemoryAssetStore::new()),
    };

    info!(
        backend = store.name(),
        max_upload_size = config.storage.max_upload_size,
        "Thumbnail storage ready"
    );

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, videos, store).context("Invalid storage config")?;
    let app = tubely::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutting down");
}
