//! HTTP API handlers for tunebridge-gw

pub mod auth;
pub mod error;
pub mod health;
pub mod player;

pub use auth::{callback, login};
pub use error::{not_found, ApiError};
pub use health::health_routes;
pub use player::{current_song, pause_resume, skip_next, skip_previous};
