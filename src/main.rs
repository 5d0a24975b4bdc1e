use anyhow::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tradle::{
    load_records,
    session::{start_cleanup_task, CleanupConfig},
    AppState, Catalog, GameConfig, GameService, InMemorySessionRepository, SessionService,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradle=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tradle game server");

    let config = GameConfig::from_env()?;

    let records = load_records(&config.data_path).context("Failed to load trade data")?;
    let catalog = Catalog::build(records).context("Failed to build country catalog")?;

    let game_service = Arc::new(GameService::new(Arc::new(catalog), &config));
    let session_repository = Arc::new(InMemorySessionRepository::new());
    let session_service = Arc::new(SessionService::new(
        game_service.clone(),
        session_repository,
        &config,
    ));

    tokio::spawn(start_cleanup_task(
        session_service.clone(),
        CleanupConfig::default(),
    ));

    let app = tradle::router(AppState::new(game_service, session_service));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
