//! Shared HTTP API types
//!
//! Contains only plain serde types with no HTTP framework dependencies;
//! the gateway wraps these with Axum-specific responses.

pub mod types;

pub use types::{Envelope, Message, TrackInfo};
