//! Spotify Web API client
//!
//! Wraps the two upstream services the gateway talks to: the accounts
//! service (authorization + token exchange) and the Web API player
//! endpoints. Base URLs are fields so tests can point the client at a mock
//! server.

use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tunebridge_common::Settings;

const ACCOUNTS_BASE_URL: &str = "https://accounts.spotify.com";
const API_BASE_URL: &str = "https://api.spotify.com";
const USER_AGENT: &str = "tunebridge/0.1.0";

/// OAuth scopes requested at login: read the current track, read playback
/// state, and control playback
const SCOPES: &str =
    "user-read-currently-playing user-read-playback-state user-modify-playback-state";

/// Spotify client errors
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Token endpoint response (only the access token is consumed)
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Currently-playing response; `item` is absent between tracks
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlaying {
    pub item: Option<TrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// Player state response; only `is_playing` is consumed
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
}

impl TrackItem {
    /// Contributing artist names joined with ", "
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Spotify API client
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http_client: reqwest::Client,
    accounts_base: String,
    api_base: String,
}

impl SpotifyClient {
    /// Create a client against the production Spotify endpoints
    pub fn new() -> Result<Self, SpotifyError> {
        Self::with_base_urls(ACCOUNTS_BASE_URL, API_BASE_URL)
    }

    /// Create a client against explicit base URLs (used by tests)
    pub fn with_base_urls(accounts_base: &str, api_base: &str) -> Result<Self, SpotifyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SpotifyError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            accounts_base: accounts_base.trim_end_matches('/').to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Build the authorization URL the user is redirected to at login
    pub fn authorize_url(&self, settings: &Settings, state: &str) -> Result<String, SpotifyError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/authorize", self.accounts_base),
            &[
                ("response_type", "code"),
                ("client_id", settings.client_id.as_str()),
                ("scope", SCOPES),
                ("redirect_uri", settings.redirect_uri.as_str()),
                ("state", state),
            ],
        )
        .map_err(|e| SpotifyError::InvalidUrl(e.to_string()))?;

        Ok(url.into())
    }

    /// Exchange an authorization code for an access token
    ///
    /// Server-to-server POST authenticated with HTTP Basic over the
    /// client id/secret pair.
    pub async fn exchange_code(
        &self,
        settings: &Settings,
        code: &str,
    ) -> Result<String, SpotifyError> {
        let params = [
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];

        let credentials = general_purpose::STANDARD.encode(format!(
            "{}:{}",
            settings.client_id, settings.client_secret
        ));

        let response = self
            .http_client
            .post(format!("{}/api/token", self.accounts_base))
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", credentials))
            .form(&params)
            .send()
            .await
            .map_err(|e| SpotifyError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpotifyError::ApiError(status.as_u16(), error_text));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::ParseError(e.to_string()))?;

        Ok(token.access_token)
    }

    /// Fetch the currently playing track
    ///
    /// Returns `None` when the player reports no content (nothing playing).
    pub async fn currently_playing(
        &self,
        token: &str,
    ) -> Result<Option<CurrentlyPlaying>, SpotifyError> {
        self.get_optional_json(&format!("{}/v1/me/player/currently-playing", self.api_base), token)
            .await
    }

    /// Fetch the player state (play/pause, device, progress)
    pub async fn playback_state(&self, token: &str) -> Result<Option<PlaybackState>, SpotifyError> {
        self.get_optional_json(&format!("{}/v1/me/player", self.api_base), token)
            .await
    }

    /// Skip to the next track in the queue
    pub async fn skip_next(&self, token: &str) -> Result<(), SpotifyError> {
        self.send_command(reqwest::Method::POST, "/v1/me/player/next", token)
            .await
    }

    /// Return to the previous track
    pub async fn skip_previous(&self, token: &str) -> Result<(), SpotifyError> {
        self.send_command(reqwest::Method::POST, "/v1/me/player/previous", token)
            .await
    }

    /// Pause playback on the active device
    pub async fn pause(&self, token: &str) -> Result<(), SpotifyError> {
        self.send_command(reqwest::Method::PUT, "/v1/me/player/pause", token)
            .await
    }

    /// Resume playback on the active device
    pub async fn resume(&self, token: &str) -> Result<(), SpotifyError> {
        self.send_command(reqwest::Method::PUT, "/v1/me/player/play", token)
            .await
    }

    /// GET a player resource that may legitimately be empty
    ///
    /// The player endpoints answer 204 with no body when there is no active
    /// playback; that is a successful "nothing" rather than an error.
    async fn get_optional_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<Option<T>, SpotifyError> {
        let response = self
            .http_client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SpotifyError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpotifyError::ApiError(status.as_u16(), error_text));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SpotifyError::NetworkError(e.to_string()))?;
        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| SpotifyError::ParseError(e.to_string()))
    }

    /// Issue a bodyless player command (skip, pause, play)
    async fn send_command(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
    ) -> Result<(), SpotifyError> {
        let response = self
            .http_client
            .request(method, format!("{}{}", self.api_base, path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SpotifyError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SpotifyError::ApiError(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            client_id: "client_123".to_string(),
            client_secret: "secret_456".to_string(),
            redirect_uri: "http://127.0.0.1:1337/callback".to_string(),
        }
    }

    #[test]
    fn authorize_url_includes_required_params() {
        let client = SpotifyClient::new().unwrap();
        let url = client
            .authorize_url(&test_settings(), "st4teV4lue16char")
            .unwrap();

        assert!(url.starts_with("https://accounts.spotify.com/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client_123"));
        assert!(url.contains("state=st4teV4lue16char"));
    }

    #[test]
    fn authorize_url_encodes_redirect_uri_and_scopes() {
        let client = SpotifyClient::new().unwrap();
        let url = client
            .authorize_url(&test_settings(), "state")
            .unwrap();

        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A1337%2Fcallback"));
        // Scopes are space-separated; either encoding of the separator is fine
        assert!(
            url.contains("scope=user-read-currently-playing+user-read-playback-state")
                || url.contains("scope=user-read-currently-playing%20user-read-playback-state")
        );
    }

    #[test]
    fn artist_names_joins_with_comma_and_space() {
        let item = TrackItem {
            name: "Song A".to_string(),
            artists: vec![
                ArtistRef { name: "X".to_string() },
                ArtistRef { name: "Y".to_string() },
            ],
        };
        assert_eq!(item.artist_names(), "X, Y");
    }

    #[test]
    fn artist_names_handles_single_and_empty_lists() {
        let solo = TrackItem {
            name: "Solo".to_string(),
            artists: vec![ArtistRef { name: "Only".to_string() }],
        };
        assert_eq!(solo.artist_names(), "Only");

        let none = TrackItem {
            name: "Orphan".to_string(),
            artists: vec![],
        };
        assert_eq!(none.artist_names(), "");
    }

    #[test]
    fn currently_playing_tolerates_null_item() {
        let playing: CurrentlyPlaying =
            serde_json::from_str(r#"{"item": null}"#).unwrap();
        assert!(playing.item.is_none());
    }

    #[test]
    fn playback_state_defaults_to_not_playing() {
        let state: PlaybackState = serde_json::from_str("{}").unwrap();
        assert!(!state.is_playing);
    }
}
