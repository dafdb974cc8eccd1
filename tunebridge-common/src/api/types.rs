//! Response envelope and track snapshot types
//!
//! Every inbound endpoint replies with the same `{success, message}` shape,
//! whether the operation succeeded or failed. The message is either plain
//! text or a track snapshot; serde's untagged representation keeps the wire
//! format identical to `string | object`.

use serde::{Deserialize, Serialize};

/// Uniform response envelope returned by every endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    pub message: Message,
}

/// Envelope payload: plain text or a structured track snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Track(TrackInfo),
}

/// Snapshot of the currently playing track
///
/// Derived fresh from each upstream currently-playing response; the artist
/// field is the comma-joined list of contributing artist names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
}

impl Envelope {
    /// Success envelope carrying a text message
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Message::Text(message.into()),
        }
    }

    /// Success envelope carrying a track snapshot
    pub fn track(track: TrackInfo) -> Self {
        Self {
            success: true,
            message: Message::Track(track),
        }
    }

    /// Failure envelope carrying a text message
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Message::Text(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_envelope_serializes_as_plain_string_message() {
        let envelope = Envelope::ok("No song currently playing.");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": "No song currently playing."})
        );
    }

    #[test]
    fn track_envelope_serializes_as_object_message() {
        let envelope = Envelope::track(TrackInfo {
            title: "Song A".to_string(),
            artist: "X, Y".to_string(),
        });
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({"success": true, "message": {"title": "Song A", "artist": "X, Y"}})
        );
    }

    #[test]
    fn failure_envelope_is_not_successful() {
        let envelope = Envelope::fail("Not Found");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"success": false, "message": "Not Found"}));
    }

    #[test]
    fn envelope_round_trips_both_message_shapes() {
        let text: Envelope =
            serde_json::from_value(json!({"success": true, "message": "hello"})).unwrap();
        assert!(matches!(text.message, Message::Text(ref s) if s == "hello"));

        let track: Envelope = serde_json::from_value(
            json!({"success": true, "message": {"title": "t", "artist": "a"}}),
        )
        .unwrap();
        assert!(matches!(track.message, Message::Track(ref t) if t.title == "t"));
    }
}
