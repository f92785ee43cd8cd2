//! Linkify API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p linkify-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env` if present).

use linkify_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing(&TracingConfig::default()) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Linkify API Server...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        cloudinary = config.cloudinary.is_configured(),
        lemonsqueezy = config.lemonsqueezy.is_configured(),
        "Configuration loaded"
    );

    linkify_api::run(config).await?;

    Ok(())
}
