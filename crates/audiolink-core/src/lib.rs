//! # audiolink-core
//!
//! Shared library for Audiolink containing the typed message protocol spoken
//! between the game-server plugin and the companion audio web service.
//!
//! Both processes link this crate; it has zero dependencies on transports,
//! audio playback, or either side's lifecycle. It defines:
//!
//! - **`protocol`** – The message envelope and its four variants (`audio`,
//!   `audio-command`, `audio-list`, `audio-track`), the JSON text codec with
//!   closed discriminator dispatch, and the two-phase validation lifecycle
//!   that separates trusted builder output from untrusted wire data.
//!
//! - **`domain`** – The field-level grammars: audio/track identifiers, delay
//!   ranges, and audio-file locations.
//!
//! - **`formatting`** – A reversible codec that smuggles arbitrary UTF-8
//!   through a channel restricted to styling-markup codes.
//!
//! # Sending and receiving
//!
//! A sender builds a message through its constructor or builder (validated
//! eagerly), encodes it, and hands the text to the transport:
//!
//! ```rust
//! use audiolink_core::{encode_message, AudioMessage, AudiolinkMessage, Identifier};
//!
//! let message = AudiolinkMessage::Audio(
//!     AudioMessage::builder(None)
//!         .audio(Identifier::new("cave-drips").unwrap())
//!         .build(),
//! );
//! let frame = encode_message(&message).unwrap();
//! # assert!(frame.contains("cave-drips"));
//! ```
//!
//! A receiver decodes text into an unvalidated message and must validate it
//! before trusting the payload:
//!
//! ```rust
//! use audiolink_core::{decode_message, AudiolinkMessage};
//!
//! let frame = r#"{"type":"audio-command","command":"unmute"}"#;
//! let message = decode_message(frame).unwrap().validate().unwrap();
//! assert!(matches!(message, AudiolinkMessage::Command(_)));
//! ```

pub mod domain;
pub mod formatting;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `audiolink_core::AudioMessage` instead of the full module path.
pub use domain::audio_file::{AudioFile, AudioFileError};
pub use domain::identifier::{validate_identifier, Identifier, IdentifierError};
pub use domain::range::Range;
pub use formatting::{decode_formatting_codes, encode_formatting_codes, FORMATTING_CHAR};
pub use protocol::codec::{decode_message, encode_message, ProtocolError};
pub use protocol::messages::{
    AudioCommand, AudioCommandMessage, AudioListMessage, AudioMessage, AudioMessageBuilder,
    AudioTrackMessage, AudioTrackMessageBuilder, AudiolinkMessage, ListAction, MessageType,
};
pub use protocol::validate::{Unvalidated, Validate, ValidationError};
