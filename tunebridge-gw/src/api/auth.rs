//! Authorization flow handlers: /login and /callback
//!
//! /login forwards the user to the Spotify consent page with a random
//! anti-forgery state; /callback exchanges the returned code for an access
//! token and stores it in the session slot.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rand::{distributions::Alphanumeric, Rng};
use serde::Deserialize;
use tracing::{error, info};
use tunebridge_common::api::Envelope;

use crate::api::ApiError;
use crate::AppState;

/// Length of the anti-forgery state sent with the authorization request
const STATE_LENGTH: usize = 16;

/// Query parameters returned by the authorization server
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

/// GET /login
///
/// Responds with a 302 redirect to the Spotify authorization endpoint.
/// The state value is generated per attempt and not retained; the
/// authorization server echoes it back but the callback does not verify it.
pub async fn login(State(state): State<AppState>) -> Result<Response, ApiError> {
    let anti_forgery = random_state(STATE_LENGTH);

    let url = state
        .spotify
        .authorize_url(&state.settings, &anti_forgery)
        .map_err(|e| {
            error!("Failed to build authorization URL: {}", e);
            ApiError::Upstream("Failed to authenticate.")
        })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

/// GET /callback?code=...
///
/// Exchanges the authorization code for an access token. All exchange
/// failures collapse to the same generic 500 envelope; the upstream detail
/// is only logged.
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<Envelope>, ApiError> {
    let code = match query.code.as_deref() {
        Some(code) if !code.is_empty() => code,
        _ => return Err(ApiError::MissingCode),
    };

    match state.spotify.exchange_code(&state.settings, code).await {
        Ok(token) => {
            state.session.store(token).await;
            info!("Access token obtained; playback endpoints unlocked");
            Ok(Json(Envelope::ok(
                "Login successful! You can now use /currentsong, /next, /previous, /pauseresume.",
            )))
        }
        Err(e) => {
            error!("Token exchange failed: {}", e);
            Err(ApiError::Upstream("Failed to authenticate."))
        }
    }
}

/// Generate a random state string from the 62-symbol alphanumeric alphabet
fn random_state(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_state_has_requested_length_and_alphabet() {
        let state = random_state(STATE_LENGTH);
        assert_eq!(state.len(), 16);
        assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_states_differ() {
        // 62^16 values; a collision here means the generator is broken
        assert_ne!(random_state(STATE_LENGTH), random_state(STATE_LENGTH));
    }
}
