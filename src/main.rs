use tokio::net::TcpListener;
use tracing::info;
use masterprep::{config::Config, routes::create_router, utils::init_logger, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded: {:?}", config.server);
    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        tesseract = %config.ocr.tesseract_cmd,
        "Collaborators configured"
    );

    // Create shared state
    let state = AppState::from_config(config.clone())?;

    // Create router
    let app = create_router(state);

    // Start server
    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
