use anyhow::Context;
use tracing_subscriber::EnvFilter;

use shopping_advisor_api::{
    api::{create_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with_target(true)
        .init();

    // Missing API keys end the process here.
    let config = Config::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Set SERPER_API_KEY and GEMINI_API_KEY in the environment or .env");
    })?;

    let state = AppState::from_config(&config).context("Failed to build API clients")?;
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(
        address = %address,
        gemini_model = %config.gemini_model,
        "Server listening"
    );

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
