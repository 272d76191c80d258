//! GranaApp engine server.
//!
//! Serves the calculators over HTTP. `GRANA_CONFIG_DIR` selects the
//! configuration directory and `GRANA_BIND_ADDR` the listen address;
//! `RUST_LOG` controls log verbosity.

use std::env;

use grana_engine::api::{AppState, create_router};
use grana_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config/grana";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("GRANA_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr = env::var("GRANA_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        app = %config.app().name,
        version = %config.app().version,
        "Configuration loaded"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("API listening on http://{bind_addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
