//! All Audiolink protocol message types.
//!
//! Every message on the wire is a single JSON object discriminated by its
//! `"type"` field, with payload fields flattened into the same object in
//! camelCase and absent optional fields omitted:
//!
//! ```json
//! {"type":"audio","id":"<uuid>","audioIds":["cave-drips"],"delayRange":{"min":2,"max":7}}
//! {"type":"audio-command","id":"<uuid>","command":"mute"}
//! {"type":"audio-list","action":"REPLACE","audioIds":["old-id","new-id"]}
//! {"type":"audio-track","id":"<uuid>","trackId":"night","defaultTrack":false,"repeating":true,"random":false,"fading":false}
//! ```
//!
//! The `id` field is the UUID of the subject the message concerns (a player
//! or world). It exists on `audio`, `audio-command`, and `audio-track`;
//! `audio-list` addresses the shared registry and carries none.
//!
//! Messages are immutable once constructed. The builders below are transient
//! accumulators that validate their inputs eagerly; messages arriving over
//! the wire skip the builders entirely and are validated lazily via
//! [`Validate`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::identifier::{validate_identifier, Identifier};
use crate::domain::range::Range;
use crate::protocol::validate::{Validate, ValidationError};

// ── Message type discriminators ───────────────────────────────────────────────

/// The closed set of message discriminators.
///
/// Each variant owns a fixed wire tag produced once per type; the tag is the
/// sole key used to decode untyped wire data. Unknown tags are rejected at
/// the codec boundary, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageType {
    Audio,
    AudioCommand,
    AudioList,
    AudioTrack,
}

impl MessageType {
    /// Every discriminator, in wire-registration order.
    pub const ALL: [MessageType; 4] = [
        MessageType::Audio,
        MessageType::AudioCommand,
        MessageType::AudioList,
        MessageType::AudioTrack,
    ];

    /// The wire tag for this discriminator.
    pub const fn tag(self) -> &'static str {
        match self {
            MessageType::Audio => "audio",
            MessageType::AudioCommand => "audio-command",
            MessageType::AudioList => "audio-list",
            MessageType::AudioTrack => "audio-track",
        }
    }

    /// Looks up a discriminator by wire tag.
    pub fn from_tag(tag: &str) -> Option<MessageType> {
        MessageType::ALL.into_iter().find(|t| t.tag() == tag)
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Top-level message enum ────────────────────────────────────────────────────

/// All valid Audiolink messages, discriminated by type.
///
/// Serialization is internally tagged: the variant's tag becomes the JSON
/// `"type"` field and the payload fields flatten into the same object.
/// Decoding goes through [`crate::protocol::codec::decode_message`], which
/// dispatches on the tag explicitly so unknown tags surface as a typed error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum AudiolinkMessage {
    /// A play instruction.
    #[serde(rename = "audio")]
    Audio(AudioMessage),

    /// A playback command (mute/unmute).
    #[serde(rename = "audio-command")]
    Command(AudioCommandMessage),

    /// A mutation of the shared set of known audio IDs.
    #[serde(rename = "audio-list")]
    List(AudioListMessage),

    /// A named playback track definition.
    #[serde(rename = "audio-track")]
    Track(AudioTrackMessage),
}

impl AudiolinkMessage {
    /// Returns the [`MessageType`] discriminator for this message.
    pub fn message_type(&self) -> MessageType {
        match self {
            AudiolinkMessage::Audio(_) => MessageType::Audio,
            AudiolinkMessage::Command(_) => MessageType::AudioCommand,
            AudiolinkMessage::List(_) => MessageType::AudioList,
            AudiolinkMessage::Track(_) => MessageType::AudioTrack,
        }
    }
}

impl Validate for AudiolinkMessage {
    fn validate(self) -> Result<Self, ValidationError> {
        Ok(match self {
            AudiolinkMessage::Audio(message) => AudiolinkMessage::Audio(message.validate()?),
            AudiolinkMessage::Command(message) => AudiolinkMessage::Command(message.validate()?),
            AudiolinkMessage::List(message) => AudiolinkMessage::List(message.validate()?),
            AudiolinkMessage::Track(message) => AudiolinkMessage::Track(message.validate()?),
        })
    }
}

// ── Audio message (play instruction) ──────────────────────────────────────────

/// `audio`: play the given audio sources for a subject.
///
/// An absent `audio_ids` set (not an empty one) means "nothing to play";
/// an absent `track_id` means the default track; an absent `delay_range`
/// means no transition delay. A zero (`0-0`) delay window is normalized to
/// absent and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_ids: Option<BTreeSet<Identifier>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track_id: Option<Identifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delay_range: Option<Range>,
}

impl AudioMessage {
    /// Starts building an audio message for the given subject.
    pub fn builder(id: Option<Uuid>) -> AudioMessageBuilder {
        AudioMessageBuilder {
            id,
            audio_ids: BTreeSet::new(),
            track_id: None,
            delay_range: None,
        }
    }

    /// UUID of the subject the audio is directed at.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Identifiers of the audio sources to play, or `None` if no audio
    /// should be played.
    pub fn audio_ids(&self) -> Option<&BTreeSet<Identifier>> {
        self.audio_ids.as_ref()
    }

    /// Identifier of the destination track (previously defined by an
    /// [`AudioTrackMessage`]), or `None` for the default track.
    pub fn track_id(&self) -> Option<&Identifier> {
        self.track_id.as_ref()
    }

    /// The min/max window in seconds for the delay between audio
    /// transitions, or `None` for no delay.
    pub fn delay_range(&self) -> Option<Range> {
        self.delay_range
    }
}

impl Validate for AudioMessage {
    fn validate(mut self) -> Result<Self, ValidationError> {
        if let Some(track_id) = &self.track_id {
            validate_identifier(track_id.as_str())?;
        }
        if let Some(audio_ids) = &self.audio_ids {
            for audio_id in audio_ids {
                validate_identifier(audio_id.as_str())?;
            }
        }
        // Wire normalizations: an empty set and a zero delay window are both
        // spelled "absent" internally.
        self.audio_ids = self.audio_ids.filter(|ids| !ids.is_empty());
        self.delay_range = self.delay_range.filter(|range| !range.is_zero());
        Ok(self)
    }
}

/// Transient accumulator for [`AudioMessage`].
///
/// Identifier inputs are [`Identifier`] values, so the grammar has already
/// rejected invalid text before it reaches the builder. Not intended to be
/// shared across threads; the finished message is.
#[derive(Debug)]
pub struct AudioMessageBuilder {
    id: Option<Uuid>,
    audio_ids: BTreeSet<Identifier>,
    track_id: Option<Identifier>,
    delay_range: Option<Range>,
}

impl AudioMessageBuilder {
    /// Adds one audio source.
    pub fn audio(mut self, audio_id: Identifier) -> Self {
        self.audio_ids.insert(audio_id);
        self
    }

    /// Adds several audio sources.
    pub fn audios(mut self, audio_ids: impl IntoIterator<Item = Identifier>) -> Self {
        self.audio_ids.extend(audio_ids);
        self
    }

    /// Sets the destination track.
    pub fn track(mut self, track_id: Identifier) -> Self {
        self.track_id = Some(track_id);
        self
    }

    /// Sets a fixed transition delay in seconds.
    pub fn delay(self, seconds: u32) -> Self {
        self.delay_range(Range::new(seconds, seconds))
    }

    /// Sets the transition delay window. A zero window means "no delay" and
    /// is stored as absent.
    pub fn delay_range(mut self, delay_range: Range) -> Self {
        self.delay_range = (!delay_range.is_zero()).then_some(delay_range);
        self
    }

    /// Finishes the message. The result is trusted by construction and never
    /// re-validated.
    pub fn build(self) -> AudioMessage {
        AudioMessage {
            id: self.id,
            audio_ids: (!self.audio_ids.is_empty()).then_some(self.audio_ids),
            track_id: self.track_id,
            delay_range: self.delay_range,
        }
    }
}

// ── Audio command message ─────────────────────────────────────────────────────

/// A playback command applied to a subject's audio as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioCommand {
    Mute,
    Unmute,
    // more may be added
}

impl fmt::Display for AudioCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AudioCommand::Mute => "mute",
            AudioCommand::Unmute => "unmute",
        })
    }
}

/// `audio-command`: apply an [`AudioCommand`] to a subject.
///
/// Unlike [`AudioMessage`], an absent command has no "no-op" reading:
/// validation requires it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioCommandMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    command: Option<AudioCommand>,
}

impl AudioCommandMessage {
    /// Creates a command message; valid by construction.
    pub fn new(id: Option<Uuid>, command: AudioCommand) -> Self {
        Self {
            id,
            command: Some(command),
        }
    }

    /// UUID of the subject the command applies to.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// The command, if present. Always present on constructed messages;
    /// possibly absent on decoded ones until validation rejects them.
    pub fn command(&self) -> Option<AudioCommand> {
        self.command
    }
}

impl Validate for AudioCommandMessage {
    fn validate(self) -> Result<Self, ValidationError> {
        if self.command.is_none() {
            return Err(ValidationError::MissingField("command"));
        }
        Ok(self)
    }
}

// ── Audio list message ────────────────────────────────────────────────────────

/// An action describing a modification to the shared set of known audio IDs.
///
/// The set itself lives in the web service's registry; this protocol only
/// validates the shape of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListAction {
    /// Add all of the audio IDs. Requires at least one ID.
    Add,
    /// Remove all of the audio IDs. Requires at least one ID.
    Remove,
    /// Remove the audio IDs *and* delete every reference to them elsewhere.
    /// Requires at least one ID.
    Delete,
    /// Replace every occurrence of the first audio ID with the second, then
    /// update the set accordingly. Requires exactly two IDs (old, then new).
    Replace,
}

impl ListAction {
    /// Minimum number of distinct audio IDs the action accepts.
    pub const fn min_ids(self) -> usize {
        match self {
            ListAction::Replace => 2,
            _ => 1,
        }
    }

    /// Maximum number of distinct audio IDs the action accepts, if bounded.
    pub const fn max_ids(self) -> Option<usize> {
        match self {
            ListAction::Replace => Some(2),
            _ => None,
        }
    }

    fn check_cardinality(self, found: usize) -> Result<(), ValidationError> {
        if found < self.min_ids() {
            return Err(ValidationError::TooFewAudioIds {
                action: self,
                min: self.min_ids(),
                found,
            });
        }
        if let Some(max) = self.max_ids() {
            if found > max {
                return Err(ValidationError::TooManyAudioIds {
                    action: self,
                    max,
                    found,
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for ListAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ListAction::Add => "ADD",
            ListAction::Remove => "REMOVE",
            ListAction::Delete => "DELETE",
            ListAction::Replace => "REPLACE",
        })
    }
}

/// `audio-list`: perform a [`ListAction`] over the named audio IDs.
///
/// The IDs are raw strings, deliberately not routed through the identifier
/// grammar: the list message mutates registry membership and must be able to
/// name entries however the registry spelled them. Order is preserved with
/// set semantics (duplicates collapse to their first occurrence) because
/// [`ListAction::Replace`] reads its two IDs positionally as old → new.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioListMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<ListAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    audio_ids: Option<Vec<String>>,
}

impl AudioListMessage {
    /// Creates a list message, checking the action's cardinality contract
    /// eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the (deduplicated) ID count violates
    /// the action's bounds.
    pub fn new(
        action: ListAction,
        audio_ids: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, ValidationError> {
        let audio_ids = dedup_preserving_order(audio_ids.into_iter().map(Into::into));
        action.check_cardinality(audio_ids.len())?;
        Ok(Self {
            action: Some(action),
            audio_ids: Some(audio_ids),
        })
    }

    /// The action to perform with [`audio_ids`](Self::audio_ids).
    pub fn action(&self) -> Option<ListAction> {
        self.action
    }

    /// The audio IDs to perform the action with, in positional order.
    pub fn audio_ids(&self) -> Option<&[String]> {
        self.audio_ids.as_deref()
    }
}

impl Validate for AudioListMessage {
    fn validate(mut self) -> Result<Self, ValidationError> {
        let audio_ids = self
            .audio_ids
            .take()
            .ok_or(ValidationError::MissingField("audioIds"))?;
        let action = self
            .action
            .ok_or(ValidationError::MissingField("action"))?;
        // Wire arrays may repeat an ID; collapse before counting so the
        // cardinality contract sees distinct entries.
        let audio_ids = dedup_preserving_order(audio_ids.into_iter());
        action.check_cardinality(audio_ids.len())?;
        self.audio_ids = Some(audio_ids);
        Ok(self)
    }
}

fn dedup_preserving_order(ids: impl Iterator<Item = String>) -> Vec<String> {
    let mut deduped: Vec<String> = Vec::new();
    for id in ids {
        if !deduped.contains(&id) {
            deduped.push(id);
        }
    }
    deduped
}

// ── Audio track message ───────────────────────────────────────────────────────

/// `audio-track`: define a named playback track for a subject and the flags
/// controlling how audio assigned to it plays.
///
/// The flags are independent; no mutual exclusion is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTrackMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    track_id: Option<Identifier>,
    #[serde(default)]
    default_track: bool,
    #[serde(default)]
    repeating: bool,
    #[serde(default)]
    random: bool,
    #[serde(default)]
    fading: bool,
}

impl AudioTrackMessage {
    /// Starts building a track definition for the given subject and track.
    pub fn builder(id: Option<Uuid>, track_id: Identifier) -> AudioTrackMessageBuilder {
        AudioTrackMessageBuilder {
            id,
            track_id,
            default_track: false,
            repeating: false,
            random: false,
            fading: false,
        }
    }

    /// UUID of the subject the track belongs to.
    pub fn id(&self) -> Option<Uuid> {
        self.id
    }

    /// Identifier of the track being defined. Always present on constructed
    /// messages; required by validation on decoded ones.
    pub fn track_id(&self) -> Option<&Identifier> {
        self.track_id.as_ref()
    }

    /// Whether this track is the subject's default destination.
    pub fn is_default_track(&self) -> bool {
        self.default_track
    }

    /// Whether audio on this track repeats.
    pub fn is_repeating(&self) -> bool {
        self.repeating
    }

    /// Whether audio on this track plays in random order.
    pub fn is_random(&self) -> bool {
        self.random
    }

    /// Whether transitions on this track crossfade.
    pub fn is_fading(&self) -> bool {
        self.fading
    }
}

impl Validate for AudioTrackMessage {
    fn validate(self) -> Result<Self, ValidationError> {
        let track_id = self
            .track_id
            .as_ref()
            .ok_or(ValidationError::MissingField("trackId"))?;
        validate_identifier(track_id.as_str())?;
        Ok(self)
    }
}

/// Transient accumulator for [`AudioTrackMessage`].
#[derive(Debug)]
pub struct AudioTrackMessageBuilder {
    id: Option<Uuid>,
    track_id: Identifier,
    default_track: bool,
    repeating: bool,
    random: bool,
    fading: bool,
}

impl AudioTrackMessageBuilder {
    /// Marks the track as the subject's default destination.
    pub fn default_track(mut self) -> Self {
        self.default_track = true;
        self
    }

    /// Marks the track as repeating.
    pub fn repeating(mut self) -> Self {
        self.repeating = true;
        self
    }

    /// Marks the track as playing in random order.
    pub fn random(mut self) -> Self {
        self.random = true;
        self
    }

    /// Marks the track as crossfading between transitions.
    pub fn fading(mut self) -> Self {
        self.fading = true;
        self
    }

    /// Finishes the message.
    pub fn build(self) -> AudioTrackMessage {
        AudioTrackMessage {
            id: self.id,
            track_id: Some(self.track_id),
            default_track: self.default_track,
            repeating: self.repeating,
            random: self.random,
            fading: self.fading,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
