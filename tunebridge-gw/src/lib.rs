//! tunebridge-gw library - Spotify playback gateway
//!
//! Translates a handful of fixed inbound HTTP paths into authenticated
//! Spotify Web API calls. The OAuth authorization-code exchange obtains a
//! bearer token held in an in-process session slot; the playback endpoints
//! require it.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use tunebridge_common::Settings;

pub mod api;
pub mod session;
pub mod spotify_client;

use session::Session;
use spotify_client::SpotifyClient;

/// Fixed listen port for the gateway
pub const LISTEN_PORT: u16 = 1337;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Spotify application credentials, resolved once at startup
    pub settings: Arc<Settings>,
    /// Process-wide session slot holding the most recent access token
    pub session: Session,
    /// Outbound Spotify client
    pub spotify: SpotifyClient,
}

impl AppState {
    /// Create new application state with an empty session
    pub fn new(settings: Settings, spotify: SpotifyClient) -> Self {
        Self {
            settings: Arc::new(settings),
            session: Session::new(),
            spotify,
        }
    }
}

/// Build application router
///
/// /login and /callback drive the authorization flow; the four playback
/// routes require a session token. Everything else falls through to the
/// uniform Not Found envelope.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/currentsong", get(api::current_song))
        .route("/next", get(api::skip_next))
        .route("/previous", get(api::skip_previous))
        .route("/pauseresume", get(api::pause_resume))
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
