//! JSON text codec for Audiolink protocol messages.
//!
//! One message per text frame. The `"type"` field is the discriminator; the
//! codec resolves it against the closed [`MessageType`] mapping and then
//! structurally decodes the matching variant. A tag outside the mapping is a
//! protocol-version mismatch and surfaces as
//! [`ProtocolError::UnknownMessageType`], never silently ignored or
//! defaulted.
//!
//! Decoding is structural only: optional fields default to absent and no
//! grammar runs. The caller gets an [`Unvalidated`] message and must call
//! [`Unvalidated::validate`] before trusting it (see
//! [`crate::protocol::validate`]).

use serde_json::Value;
use thiserror::Error;

use crate::protocol::messages::{
    AudioCommandMessage, AudioListMessage, AudioMessage, AudioTrackMessage, AudiolinkMessage,
    MessageType,
};
use crate::protocol::validate::Unvalidated;

/// Errors that can occur while encoding or decoding a message frame.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Serialization failed.
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The frame is not valid JSON, or a known variant's payload fields are
    /// malformed (wrong types, unparsable range, bad UUID).
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The frame has no `"type"` field to dispatch on.
    #[error("message has no `type` field")]
    MissingMessageType,

    /// The `"type"` tag is not in the registered set: the peer speaks a
    /// newer (or different) protocol revision.
    #[error("unknown message type: {0:?}")]
    UnknownMessageType(String),
}

/// Serializes a message into a single JSON text frame.
///
/// # Errors
///
/// Returns [`ProtocolError::Encode`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use audiolink_core::{encode_message, AudioCommand, AudioCommandMessage, AudiolinkMessage};
///
/// let msg = AudiolinkMessage::Command(AudioCommandMessage::new(None, AudioCommand::Mute));
/// let frame = encode_message(&msg).unwrap();
/// assert_eq!(frame, r#"{"type":"audio-command","command":"mute"}"#);
/// ```
pub fn encode_message(message: &AudiolinkMessage) -> Result<String, ProtocolError> {
    serde_json::to_string(message).map_err(ProtocolError::Encode)
}

/// Decodes one message frame, returning it in the unvalidated state.
///
/// # Errors
///
/// Returns [`ProtocolError`] if the frame is malformed, has no `"type"`
/// field, or carries an unregistered tag.
///
/// # Examples
///
/// ```rust
/// use audiolink_core::{decode_message, AudiolinkMessage};
///
/// let frame = r#"{"type":"audio-list","action":"ADD","audioIds":["cave-drips"]}"#;
/// let msg = decode_message(frame).unwrap().validate().unwrap();
/// assert!(matches!(msg, AudiolinkMessage::List(_)));
/// ```
pub fn decode_message(text: &str) -> Result<Unvalidated<AudiolinkMessage>, ProtocolError> {
    let value: Value = serde_json::from_str(text).map_err(ProtocolError::Decode)?;
    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ProtocolError::MissingMessageType)?;
    let Some(message_type) = MessageType::from_tag(tag) else {
        tracing::debug!(tag, "rejected frame with unregistered message type");
        return Err(ProtocolError::UnknownMessageType(tag.to_owned()));
    };

    let message = match message_type {
        MessageType::Audio => {
            serde_json::from_value::<AudioMessage>(value).map(AudiolinkMessage::Audio)
        }
        MessageType::AudioCommand => {
            serde_json::from_value::<AudioCommandMessage>(value).map(AudiolinkMessage::Command)
        }
        MessageType::AudioList => {
            serde_json::from_value::<AudioListMessage>(value).map(AudiolinkMessage::List)
        }
        MessageType::AudioTrack => {
            serde_json::from_value::<AudioTrackMessage>(value).map(AudiolinkMessage::Track)
        }
    }
    .map_err(ProtocolError::Decode)?;

    Ok(Unvalidated::new(message))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
