//! Configuration loading from the process environment
//!
//! All Spotify application credentials are read once at startup. A missing
//! or empty variable is a startup failure; the gateway never runs with
//! undefined credentials.

use crate::{Error, Result};

/// Environment variable holding the Spotify application client id
pub const ENV_CLIENT_ID: &str = "SPOTIFY_CLIENT_ID";
/// Environment variable holding the Spotify application client secret
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_CLIENT_SECRET";
/// Environment variable holding the registered OAuth redirect URI
pub const ENV_REDIRECT_URI: &str = "SPOTIFY_REDIRECT_URI";

/// Spotify application settings, resolved once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    /// OAuth client id registered with the Spotify developer dashboard
    pub client_id: String,
    /// OAuth client secret paired with the client id
    pub client_secret: String,
    /// Redirect URI the authorization server sends the user back to
    pub redirect_uri: String,
}

impl Settings {
    /// Load settings from the process environment
    ///
    /// Fails on the first missing or empty variable, naming it in the error.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client_id: require_var(ENV_CLIENT_ID)?,
            client_secret: require_var(ENV_CLIENT_SECRET)?,
            redirect_uri: require_var(ENV_REDIRECT_URI)?,
        })
    }
}

/// Read a required environment variable, rejecting empty values
fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} is not set", name))),
    }
}
