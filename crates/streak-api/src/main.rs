//! Solve Streak API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p streak-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use streak_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting Solve Streak API Server...");

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.api.port,
        memory_store = config.database.is_memory(),
        "Configuration loaded"
    );

    streak_api::run(config).await?;

    Ok(())
}
