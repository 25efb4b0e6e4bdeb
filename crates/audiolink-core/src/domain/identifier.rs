//! Identifier grammar for audio and track IDs.
//!
//! Identifiers name audio clips and playback tracks across both processes, so
//! both sides must agree on exactly what an identifier may look like: 3 to 50
//! characters, ASCII letters and digits plus `-` and `_`, nothing else.
//!
//! There are two entry points on purpose. [`Identifier::new`] is the eager,
//! fail-fast path used by message builders (trusted callers).
//! [`validate_identifier`] is the lazy path re-run over deserialized messages,
//! whose identifiers arrived over the wire and bypassed `new` entirely (serde
//! constructs the newtype transparently).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum identifier length in characters.
pub const MIN_LENGTH: usize = 3;

/// Maximum identifier length in characters.
pub const MAX_LENGTH: usize = 50;

/// Reasons an identifier can fail the grammar.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierError {
    /// The identifier is the empty string.
    #[error("identifier cannot be empty")]
    Empty,

    /// The identifier is shorter than [`MIN_LENGTH`] characters.
    #[error("identifier cannot be less than {0} characters")]
    TooShort(usize),

    /// The identifier is longer than [`MAX_LENGTH`] characters.
    #[error("identifier cannot be greater than {0} characters")]
    TooLong(usize),

    /// The identifier contains a character outside `[A-Za-z0-9_-]`.
    /// Carries the first offending character.
    #[error("identifier contains invalid character '{0}'")]
    InvalidChar(char),
}

/// Checks a string against the identifier grammar.
///
/// Pure function; the checks run in a fixed order (empty, too short, too
/// long, first invalid character) so the reported reason is deterministic.
pub fn validate_identifier(identifier: &str) -> Result<(), IdentifierError> {
    if identifier.is_empty() {
        return Err(IdentifierError::Empty);
    }
    let length = identifier.chars().count();
    if length < MIN_LENGTH {
        return Err(IdentifierError::TooShort(MIN_LENGTH));
    }
    if length > MAX_LENGTH {
        return Err(IdentifierError::TooLong(MAX_LENGTH));
    }
    for character in identifier.chars() {
        if !character.is_ascii_alphanumeric() && character != '-' && character != '_' {
            return Err(IdentifierError::InvalidChar(character));
        }
    }
    Ok(())
}

/// A validated audio or track identifier.
///
/// Serde is `transparent`: an `Identifier` serializes as its inner string and
/// deserializes from one *without* running the grammar. Deserialized
/// identifiers are therefore untrusted until the owning message passes its
/// validation phase, which re-runs [`validate_identifier`] over every one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Validates `identifier` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError`] describing the first grammar violation.
    pub fn new(identifier: impl Into<String>) -> Result<Self, IdentifierError> {
        let identifier = identifier.into();
        validate_identifier(&identifier)?;
        Ok(Self(identifier))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Identifier::new(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_identifier_is_accepted() {
        assert!(validate_identifier("abc").is_ok());
    }

    #[test]
    fn test_dashes_underscores_and_digits_are_accepted() {
        assert!(validate_identifier("a-b_1").is_ok());
        assert!(validate_identifier("cave_ambience-02").is_ok());
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        assert_eq!(validate_identifier(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_two_characters_is_too_short() {
        assert_eq!(validate_identifier("ab"), Err(IdentifierError::TooShort(MIN_LENGTH)));
    }

    #[test]
    fn test_fifty_characters_is_accepted() {
        let identifier = "a".repeat(50);
        assert!(validate_identifier(&identifier).is_ok());
    }

    #[test]
    fn test_fifty_one_characters_is_too_long() {
        let identifier = "a".repeat(51);
        assert_eq!(
            validate_identifier(&identifier),
            Err(IdentifierError::TooLong(MAX_LENGTH))
        );
    }

    #[test]
    fn test_space_is_reported_as_the_invalid_character() {
        assert_eq!(validate_identifier("a b"), Err(IdentifierError::InvalidChar(' ')));
    }

    #[test]
    fn test_first_invalid_character_wins() {
        // '!' appears before '?', so '!' must be the one reported
        assert_eq!(
            validate_identifier("abc!def?"),
            Err(IdentifierError::InvalidChar('!'))
        );
    }

    #[test]
    fn test_non_ascii_letter_is_rejected() {
        assert_eq!(validate_identifier("caña"), Err(IdentifierError::InvalidChar('ñ')));
    }

    #[test]
    fn test_new_returns_wrapped_identifier() {
        let identifier = Identifier::new("ambient-cave").unwrap();
        assert_eq!(identifier.as_str(), "ambient-cave");
        assert_eq!(identifier.to_string(), "ambient-cave");
    }

    #[test]
    fn test_new_propagates_grammar_errors() {
        assert_eq!(Identifier::new("no"), Err(IdentifierError::TooShort(MIN_LENGTH)));
    }

    #[test]
    fn test_from_str_parses_valid_identifiers() {
        let identifier: Identifier = "dungeon-boss".parse().unwrap();
        assert_eq!(identifier.as_str(), "dungeon-boss");
        assert!("a b".parse::<Identifier>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let identifier = Identifier::new("ambient-cave").unwrap();
        let json = serde_json::to_string(&identifier).unwrap();
        assert_eq!(json, "\"ambient-cave\"");

        // Deserialization deliberately skips the grammar; the two-phase
        // message validation re-checks it.
        let bad: Identifier = serde_json::from_str("\"!\"").unwrap();
        assert_eq!(bad.as_str(), "!");
        assert!(validate_identifier(bad.as_str()).is_err());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        assert_eq!(IdentifierError::Empty.to_string(), "identifier cannot be empty");
        assert_eq!(
            IdentifierError::TooShort(3).to_string(),
            "identifier cannot be less than 3 characters"
        );
        assert_eq!(
            IdentifierError::TooLong(50).to_string(),
            "identifier cannot be greater than 50 characters"
        );
        assert_eq!(
            IdentifierError::InvalidChar(' ').to_string(),
            "identifier contains invalid character ' '"
        );
    }
}
