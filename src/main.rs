use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use linguistix::config::Config;
use linguistix::detection::LinguaDetector;
use linguistix::handler::TranslationHandler;
use linguistix::server::{create_router, AppState};
use linguistix::translation::LibreTranslateClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when the variables come from the environment)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("linguistix=info".parse()?)
        )
        .init();

    let config = Config::from_env()?;
    info!("Starting Linguistix ({})", config.environment);
    info!("Translation service: {}", config.translate_api_url);

    let detector = LinguaDetector::new(config.detection_min_confidence);
    let translator = LibreTranslateClient::new(&config)
        .context("Failed to build translation client")?;
    let handler = TranslationHandler::new(Arc::new(detector), Arc::new(translator));

    let app = create_router(AppState::new(handler));

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
