use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::llm::client::LlmClient;
use crate::llm::factory;
use crate::server::{urls, AppState};
use crate::store::SeaOrmStore;
use crate::util::redact_url_password;

pub async fn run(
    config_path: Option<String>,
    port_override: Option<u16>,
    model_override: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let mut config = Config::load_with_path(config_path)?;
    config.apply_env();

    // CLI flags beat config file and environment
    if let Some(port) = port_override {
        config.server.port = port;
    }
    if let Some(model) = model_override {
        info!("CLI override: model = {}", model);
        config.llm.model = model;
    }

    info!(
        "Completion provider: {} (model: {})",
        config.llm.provider, config.llm.model
    );
    let llm: Arc<dyn LlmClient> = Arc::from(factory::create_client(&config, dry_run)?);

    let database_url = config.resolve_database_url()?;
    info!("Connecting to database at {}", redact_url_password(&database_url));
    let store = SeaOrmStore::connect(&database_url)
        .await
        .context("failed to connect to database")?;
    store
        .migrate()
        .await
        .context("failed to run database migrations")?;

    let state = AppState::new(llm, Arc::new(store));
    let app = urls::router(state, &config.server)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("invalid listen address {}", config.server.host))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Backend running on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available: run until killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
