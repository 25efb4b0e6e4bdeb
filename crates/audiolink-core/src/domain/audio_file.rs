//! Audio-file location grammar.
//!
//! An audio file is referenced either by a path relative to the web service's
//! audio root (`music/ambient/cave.mp3`), by a bare file name (`cave.mp3`),
//! or by a full URL to an externally hosted file over a secure scheme.
//!
//! Local locations are validated character by character rather than with a
//! single regex so that *every* invalid character can be collected and
//! reported in one joined, deterministic message: a user renaming an upload
//! should see all offending characters at once, not one per attempt.
//!
//! Error precedence for local locations: dot-structure violations in the file
//! name (leading dot, adjacent dots) reject immediately during the scan; then
//! all collected invalid characters are reported jointly; then the extension
//! shape (required, 1–8 alphanumeric characters) is checked.

use std::fmt;

use thiserror::Error;
use url::Url;

/// Maximum extension length in characters.
pub const MAX_EXTENSION_LENGTH: usize = 8;

/// Schemes allowed for externally hosted audio files.
const EXTERNAL_SCHEMES: [&str; 2] = ["https", "ftps"];

/// Punctuation allowed in path segments (besides ASCII alphanumerics).
const PATH_PUNCTUATION: [char; 2] = ['-', '_'];

/// Punctuation allowed in the file name before the extension dot.
const NAME_PUNCTUATION: [char; 10] = ['-', '_', '(', ')', '[', ']', '!', '~', '+', ' '];

/// Reasons an audio-file location can fail validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioFileError {
    /// The location is the empty string.
    #[error("audio file location cannot be empty")]
    Empty,

    /// A path segment is empty (leading slash or adjacent slashes).
    #[error("audio file path cannot contain empty segments")]
    EmptySegment,

    /// The terminal path segment (the file name) is empty.
    #[error("audio file name cannot be empty")]
    EmptyName,

    /// One or more characters are outside the allowed set. Carries every
    /// offending character, joined, in order of first occurrence.
    #[error("audio file location contains invalid characters: {0}")]
    InvalidChars(String),

    /// The file name starts with a dot.
    #[error("audio file name cannot begin with a dot")]
    LeadingDot,

    /// The file name contains two dots in a row.
    #[error("audio file name cannot contain adjacent dots")]
    AdjacentDots,

    /// The file name has no extension, or an empty one.
    #[error("audio file name must end with an extension")]
    MissingExtension,

    /// The extension exceeds [`MAX_EXTENSION_LENGTH`] characters.
    #[error("audio file extension cannot be longer than {0} characters")]
    ExtensionTooLong(usize),

    /// The location is not a syntactically valid URL.
    #[error("audio file URL is not valid: {0}")]
    InvalidUrl(String),

    /// The URL uses a scheme other than https or ftps.
    #[error("audio file URL scheme '{0}' is not allowed (use https or ftps)")]
    InsecureScheme(String),
}

/// A validated reference to a locally or externally hosted audio file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AudioFile {
    location: String,
}

impl AudioFile {
    /// Validates a location string, dispatching on its shape: anything with a
    /// scheme separator is treated as an external URL, everything else as a
    /// local path or file name.
    pub fn parse(location: &str) -> Result<AudioFile, AudioFileError> {
        if location.contains("://") {
            Self::external(location)
        } else {
            Self::local(location)
        }
    }

    /// Validates the URL of an externally hosted audio file.
    ///
    /// Only secure schemes (`https`, `ftps`) are accepted.
    pub fn external(location: &str) -> Result<AudioFile, AudioFileError> {
        let url =
            Url::parse(location).map_err(|error| AudioFileError::InvalidUrl(error.to_string()))?;
        if !EXTERNAL_SCHEMES.contains(&url.scheme()) {
            return Err(AudioFileError::InsecureScheme(url.scheme().to_owned()));
        }
        Ok(AudioFile {
            location: url.into(),
        })
    }

    /// Validates a path (relative to the web root) or bare file name.
    pub fn local(location: &str) -> Result<AudioFile, AudioFileError> {
        if location.is_empty() {
            return Err(AudioFileError::Empty);
        }

        // Offending characters across the whole location, in order of first
        // occurrence, reported jointly at the end of the scan.
        let mut invalid: Vec<char> = Vec::new();
        fn collect(c: char, invalid: &mut Vec<char>) {
            if !invalid.contains(&c) {
                invalid.push(c);
            }
        }

        let (directories, name) = match location.rsplit_once('/') {
            Some((directories, name)) => (Some(directories), name),
            None => (None, location),
        };

        if let Some(directories) = directories {
            for segment in directories.split('/') {
                if segment.is_empty() {
                    return Err(AudioFileError::EmptySegment);
                }
                for character in segment.chars() {
                    if !character.is_ascii_alphanumeric()
                        && !PATH_PUNCTUATION.contains(&character)
                    {
                        collect(character, &mut invalid);
                    }
                }
            }
        }

        if name.is_empty() {
            return Err(AudioFileError::EmptyName);
        }

        // File-name scan: track dot positions, splitting the name from its
        // extension at the final dot.
        let characters: Vec<char> = name.chars().collect();
        let mut last_dot: Option<usize> = None;
        for (position, &character) in characters.iter().enumerate() {
            if character == '.' {
                if position == 0 {
                    return Err(AudioFileError::LeadingDot);
                }
                if characters[position - 1] == '.' {
                    return Err(AudioFileError::AdjacentDots);
                }
                last_dot = Some(position);
            }
        }

        let name_end = last_dot.unwrap_or(characters.len());
        for &character in &characters[..name_end] {
            if character != '.'
                && !character.is_ascii_alphanumeric()
                && !NAME_PUNCTUATION.contains(&character)
            {
                collect(character, &mut invalid);
            }
        }
        if let Some(dot) = last_dot {
            for &character in &characters[dot + 1..] {
                if !character.is_ascii_alphanumeric() {
                    collect(character, &mut invalid);
                }
            }
        }

        if !invalid.is_empty() {
            let joined = invalid
                .iter()
                .map(|c| format!("'{c}'"))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AudioFileError::InvalidChars(joined));
        }

        match last_dot {
            None => Err(AudioFileError::MissingExtension),
            Some(dot) => {
                let extension_length = characters.len() - dot - 1;
                if extension_length == 0 {
                    Err(AudioFileError::MissingExtension)
                } else if extension_length > MAX_EXTENSION_LENGTH {
                    Err(AudioFileError::ExtensionTooLong(MAX_EXTENSION_LENGTH))
                } else {
                    Ok(AudioFile {
                        location: location.to_owned(),
                    })
                }
            }
        }
    }

    /// The validated location string.
    pub fn location(&self) -> &str {
        &self.location
    }
}

impl fmt::Display for AudioFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── File names ───────────────────────────────────────────────────────────

    #[test]
    fn test_simple_file_name_is_accepted() {
        assert!(AudioFile::local("track.mp3").is_ok());
    }

    #[test]
    fn test_name_without_extension_is_rejected() {
        assert_eq!(
            AudioFile::local("track"),
            Err(AudioFileError::MissingExtension)
        );
    }

    #[test]
    fn test_empty_extension_is_rejected() {
        assert_eq!(
            AudioFile::local("track."),
            Err(AudioFileError::MissingExtension)
        );
    }

    #[test]
    fn test_adjacent_dots_are_rejected() {
        assert_eq!(
            AudioFile::local("tr..ck.mp3"),
            Err(AudioFileError::AdjacentDots)
        );
    }

    #[test]
    fn test_leading_dot_is_rejected() {
        assert_eq!(
            AudioFile::local(".track.mp3"),
            Err(AudioFileError::LeadingDot)
        );
    }

    #[test]
    fn test_long_extension_is_rejected() {
        assert_eq!(
            AudioFile::local("track.toolongext123"),
            Err(AudioFileError::ExtensionTooLong(MAX_EXTENSION_LENGTH))
        );
    }

    #[test]
    fn test_extension_boundary_is_eight_characters() {
        assert!(AudioFile::local("track.flacflac").is_ok());
        assert_eq!(
            AudioFile::local("track.flacflacx"),
            Err(AudioFileError::ExtensionTooLong(MAX_EXTENSION_LENGTH))
        );
    }

    #[test]
    fn test_name_punctuation_is_accepted_before_extension() {
        assert!(AudioFile::local("My Track (remix) [v2]!~+.mp3").is_ok());
    }

    #[test]
    fn test_multiple_dots_split_at_the_last() {
        assert!(AudioFile::local("album.track.mp3").is_ok());
    }

    #[test]
    fn test_punctuation_in_extension_is_rejected() {
        assert_eq!(
            AudioFile::local("track.mp#"),
            Err(AudioFileError::InvalidChars("'#'".to_owned()))
        );
    }

    // ── Paths ────────────────────────────────────────────────────────────────

    #[test]
    fn test_relative_path_is_accepted() {
        assert!(AudioFile::local("music/ambient/cave_drips-01.mp3").is_ok());
    }

    #[test]
    fn test_adjacent_slashes_are_rejected() {
        assert_eq!(
            AudioFile::local("music//track.mp3"),
            Err(AudioFileError::EmptySegment)
        );
    }

    #[test]
    fn test_leading_slash_is_rejected() {
        assert_eq!(
            AudioFile::local("/music/track.mp3"),
            Err(AudioFileError::EmptySegment)
        );
    }

    #[test]
    fn test_trailing_slash_is_rejected() {
        assert_eq!(AudioFile::local("music/"), Err(AudioFileError::EmptyName));
    }

    #[test]
    fn test_empty_location_is_rejected() {
        assert_eq!(AudioFile::local(""), Err(AudioFileError::Empty));
    }

    #[test]
    fn test_all_invalid_characters_are_reported_jointly() {
        // '@' in the path, '#' in the name: both must appear, in order
        assert_eq!(
            AudioFile::local("mu@sic/tr#ck.mp3"),
            Err(AudioFileError::InvalidChars("'@', '#'".to_owned()))
        );
    }

    #[test]
    fn test_repeated_invalid_characters_are_reported_once() {
        assert_eq!(
            AudioFile::local("m@u@sic/track.mp3"),
            Err(AudioFileError::InvalidChars("'@'".to_owned()))
        );
    }

    #[test]
    fn test_path_segments_do_not_allow_name_punctuation() {
        // Parentheses are fine in a file name but not in a path segment
        assert_eq!(
            AudioFile::local("music(old)/track.mp3"),
            Err(AudioFileError::InvalidChars("'(', ')'".to_owned()))
        );
    }

    // ── External URLs ────────────────────────────────────────────────────────

    #[test]
    fn test_https_url_is_accepted() {
        let file = AudioFile::external("https://cdn.example.com/audio/track.mp3").unwrap();
        assert_eq!(file.location(), "https://cdn.example.com/audio/track.mp3");
    }

    #[test]
    fn test_ftps_url_is_accepted() {
        assert!(AudioFile::external("ftps://files.example.com/track.ogg").is_ok());
    }

    #[test]
    fn test_http_url_is_rejected() {
        assert_eq!(
            AudioFile::external("http://cdn.example.com/track.mp3"),
            Err(AudioFileError::InsecureScheme("http".to_owned()))
        );
    }

    #[test]
    fn test_non_url_is_rejected_by_external() {
        assert!(matches!(
            AudioFile::external("track.mp3"),
            Err(AudioFileError::InvalidUrl(_))
        ));
    }

    // ── Dispatch ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_routes_urls_to_external() {
        assert_eq!(
            AudioFile::parse("http://cdn.example.com/track.mp3"),
            Err(AudioFileError::InsecureScheme("http".to_owned()))
        );
        assert!(AudioFile::parse("https://cdn.example.com/track.mp3").is_ok());
    }

    #[test]
    fn test_parse_routes_everything_else_to_local() {
        assert!(AudioFile::parse("music/track.mp3").is_ok());
        assert_eq!(
            AudioFile::parse("music//track.mp3"),
            Err(AudioFileError::EmptySegment)
        );
    }
}
