//! Standalone REST API server binary.
//!
//! ## Purpose
//! Runs the REST API server on its own, without the workspace's `heridas-run` launcher.
//! Useful during development when iterating on the HTTP surface.

use heridas_core::CoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the Heridas REST API server
///
/// # Environment Variables
/// See `CoreConfig::from_lookup`; `HERIDAS_REST_ADDR` defaults to "0.0.0.0:3000".
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(api_rest::log_filter()?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CoreConfig::from_lookup(|key| std::env::var(key).ok())?;
    api_rest::serve(&config).await
}
