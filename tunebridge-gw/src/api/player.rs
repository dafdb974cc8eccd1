//! Playback proxy handlers: /currentsong, /next, /previous, /pauseresume
//!
//! Every handler requires a session token and short-circuits with 401
//! before any outbound call when none is held. Upstream failures collapse
//! to an operation-specific generic 500 envelope; the detail is logged.

use std::time::Duration;

use axum::{extract::State, Json};
use tracing::error;
use tunebridge_common::api::{Envelope, TrackInfo};

use crate::api::ApiError;
use crate::session::Session;
use crate::spotify_client::CurrentlyPlaying;
use crate::AppState;

/// Pause after a skip before re-querying, giving the player time to settle
const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// GET /currentsong
pub async fn current_song(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    let token = require_token(&state.session).await?;

    let playing = state
        .spotify
        .currently_playing(&token)
        .await
        .map_err(|e| {
            error!("Currently-playing lookup failed: {}", e);
            ApiError::Upstream("Error retrieving song.")
        })?;

    Ok(Json(match track_info(playing) {
        Some(track) => Envelope::track(track),
        None => Envelope::ok("No song currently playing."),
    }))
}

/// GET /next
pub async fn skip_next(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    skip_and_requery(&state, SkipDirection::Next).await
}

/// GET /previous
pub async fn skip_previous(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    skip_and_requery(&state, SkipDirection::Previous).await
}

/// GET /pauseresume
///
/// Reads the player state and toggles: playing gets paused, anything else
/// (paused, or no active playback reported) gets a resume. The track is not
/// re-fetched after the toggle.
pub async fn pause_resume(State(state): State<AppState>) -> Result<Json<Envelope>, ApiError> {
    let token = require_token(&state.session).await?;

    let toggle_failed = |e: crate::spotify_client::SpotifyError| {
        error!("Playback toggle failed: {}", e);
        ApiError::Upstream("Error toggling playback.")
    };

    let playback = state
        .spotify
        .playback_state(&token)
        .await
        .map_err(toggle_failed)?;
    let is_playing = playback.map(|p| p.is_playing).unwrap_or(false);

    if is_playing {
        state.spotify.pause(&token).await.map_err(toggle_failed)?;
        Ok(Json(Envelope::ok("Playback paused.")))
    } else {
        state.spotify.resume(&token).await.map_err(toggle_failed)?;
        Ok(Json(Envelope::ok("Playback resumed.")))
    }
}

/// Which way a skip operation moves through the queue
enum SkipDirection {
    Next,
    Previous,
}

impl SkipDirection {
    /// Message when the re-query finds nothing playing
    fn idle_message(&self) -> &'static str {
        match self {
            SkipDirection::Next => "Skipped to next, but nothing is playing now.",
            SkipDirection::Previous => "Went to previous, but nothing is playing now.",
        }
    }

    /// Generic message for any upstream failure during the operation
    fn failure_message(&self) -> &'static str {
        match self {
            SkipDirection::Next => "Error skipping song.",
            SkipDirection::Previous => "Error going to previous song.",
        }
    }
}

/// Skip, wait out the settle delay, then report whatever is playing
async fn skip_and_requery(
    state: &AppState,
    direction: SkipDirection,
) -> Result<Json<Envelope>, ApiError> {
    let token = require_token(&state.session).await?;

    let skip_result = match direction {
        SkipDirection::Next => state.spotify.skip_next(&token).await,
        SkipDirection::Previous => state.spotify.skip_previous(&token).await,
    };
    if let Err(e) = skip_result {
        error!("Skip command failed: {}", e);
        return Err(ApiError::Upstream(direction.failure_message()));
    }

    // The player needs a moment to converge on the new track before the
    // currently-playing resource reflects it
    tokio::time::sleep(SETTLE_DELAY).await;

    let playing = state.spotify.currently_playing(&token).await.map_err(|e| {
        error!("Post-skip currently-playing lookup failed: {}", e);
        ApiError::Upstream(direction.failure_message())
    })?;

    Ok(Json(match track_info(playing) {
        Some(track) => Envelope::track(track),
        None => Envelope::ok(direction.idle_message()),
    }))
}

/// Session guard shared by all playback handlers
async fn require_token(session: &Session) -> Result<String, ApiError> {
    session.bearer().await.ok_or(ApiError::Unauthenticated)
}

/// Normalize a currently-playing reply into a track snapshot, if any
fn track_info(playing: Option<CurrentlyPlaying>) -> Option<TrackInfo> {
    let item = playing?.item?;
    Some(TrackInfo {
        artist: item.artist_names(),
        title: item.name,
    })
}
