use std::sync::Arc;

use anyhow::Context;
use doctor_assistant::{
    config::Config,
    routes,
    services::groq::GroqClient,
    state::AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("doctor_assistant=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let client = GroqClient::new(config.api_key.clone(), config.base_url.clone(), config.timeout)
        .context("failed to build completion client")?;
    let state = Arc::new(AppState::new(Arc::new(client)));

    let app = routes::create_router(&config.frontend_dir).with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, frontend = %config.frontend_dir.display(), "Doctor assistant running");
    axum::serve(listener, app).await?;
    Ok(())
}
