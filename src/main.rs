use heridas_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Heridas service
///
/// Loads `.env` if present, resolves the configuration once and serves the REST API.
///
/// # Environment Variables
/// - `HERIDAS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `GEMINI_API_KEY` / `OPENAI_API_KEY`: provider credentials
/// - `GOOGLE_SHEET_ID`, `GOOGLE_CLIENT_EMAIL`, `GOOGLE_PRIVATE_KEY`: analysis log
/// - `GOOGLE_DRIVE_FOLDER_ID`: image archive
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, startup or serving fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(api_rest::log_filter()?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;
    tracing::info!(
        "++ Heridas starting (analysis log: {})",
        if config.log().is_configured() { "configured" } else { "not configured" }
    );
    api_rest::serve(&config).await
}
