use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use foodshare::api::HttpBackend;
use foodshare::auth::FileTokenStore;
use foodshare::client::{Controller, ControllerSettings};
use foodshare::config::{Cli, Config};
use foodshare::routes;
use foodshare::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse CLI args and load config
    let cli = Cli::parse();
    let data_dir = Config::data_dir(&cli);
    std::fs::create_dir_all(&data_dir)?;
    tracing::info!("Data directory: {}", data_dir.display());

    let config = Config::load(&cli)?;
    tracing::info!("Backend: {}", config.backend.base_url);

    let backend = HttpBackend::new(&config.backend.base_url, config.backend_timeout())?;
    let tokens = FileTokenStore::new(&data_dir);
    let controller = Controller::new(
        Arc::new(backend),
        Arc::new(tokens),
        ControllerSettings::from_config(&config),
    );

    // Startup loads: categories, stored session, food posts
    controller.init().await;

    let state = AppState {
        controller,
        config: config.clone(),
    };
    let app = routes::router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
