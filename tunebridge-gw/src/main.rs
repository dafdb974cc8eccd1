//! tunebridge-gw - Spotify playback gateway
//!
//! Proxies browser/voice-assistant requests to the Spotify Web API:
//! OAuth2 authorization-code exchange plus playback control (current song,
//! next, previous, pause/resume). One process-wide session; the access
//! token lives in memory for the lifetime of the process.

use anyhow::{Context, Result};
use tracing::{error, info};
use tunebridge_common::Settings;
use tunebridge_gw::spotify_client::SpotifyClient;
use tunebridge_gw::{build_router, AppState, LISTEN_PORT};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Tunebridge Gateway (tunebridge-gw) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    // Honor a local .env file before reading credentials
    if dotenvy::dotenv().is_ok() {
        info!("Loaded environment overrides from .env");
    }

    // Malformed configuration is the only condition that halts startup
    let settings = match Settings::from_env() {
        Ok(settings) => {
            info!("✓ Spotify credentials loaded (client id, secret, redirect URI)");
            settings
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let spotify = SpotifyClient::new().context("Failed to create Spotify client")?;

    // Create application state and router
    let state = AppState::new(settings, spotify);
    let app = build_router(state);

    // Start server on the fixed gateway port
    let addr = format!("127.0.0.1:{}", LISTEN_PORT);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind listen port")?;
    info!("tunebridge-gw listening on http://{}", addr);
    info!("Log in at http://{}/login", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
