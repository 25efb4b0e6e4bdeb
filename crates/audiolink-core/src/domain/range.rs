//! Inclusive integer interval used for randomized playback delays.
//!
//! Range strings originate from free-form configuration text, where an absent
//! or unusable value is common and not an error, so [`Range::parse`] is a
//! lenient syntactic parse returning `Option`. Constructing a [`Range`]
//! directly with inverted bounds, on the other hand, is a programmer error
//! and panics.
//!
//! On the wire a range may appear three ways, all accepted on read:
//!
//! ```json
//! {"min": 2, "max": 7}
//! "2-7"
//! 5
//! ```
//!
//! Encoding always emits the structured `{min,max}` object.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer};
use serde::Serialize;

/// An inclusive `min..=max` window of whole seconds.
///
/// The `0-0` window means "no delay"; callers that store an optional range
/// normalize it to absent rather than keeping a zero window around (see
/// [`Range::is_zero`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    min: u32,
    max: u32,
}

impl Range {
    /// Creates a range from explicit bounds.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`. This constructor is for trusted code building
    /// messages; values read from text go through [`Range::parse`] instead.
    pub fn new(min: u32, max: u32) -> Self {
        assert!(min <= max, "range min cannot be greater than max");
        Self { min, max }
    }

    /// Lower bound in seconds.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound in seconds.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Returns `true` for the `0-0` "no delay" window.
    pub fn is_zero(&self) -> bool {
        self.min == 0 && self.max == 0
    }

    /// Parses a range from text.
    ///
    /// Accepts a single non-negative integer (`"5"` → `5-5`) or two integers
    /// separated by `-` with optional surrounding whitespace (`" 2 - 7 "` →
    /// `2-7`). Any other shape (wrong token count, non-numeric token,
    /// inverted bounds) yields `None`.
    pub fn parse(text: &str) -> Option<Range> {
        let tokens: Vec<&str> = text.trim().split('-').collect();
        match tokens.as_slice() {
            [value] => {
                let seconds = value.trim().parse::<u32>().ok()?;
                Some(Range {
                    min: seconds,
                    max: seconds,
                })
            }
            [low, high] => {
                let min = low.trim().parse::<u32>().ok()?;
                let max = high.trim().parse::<u32>().ok()?;
                (min <= max).then_some(Range { min, max })
            }
            _ => None,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

impl<'de> Deserialize<'de> for Range {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // The three read-compatible wire representations.
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum WireRange {
            Bounds { min: u32, max: u32 },
            Seconds(u32),
            Text(String),
        }

        match WireRange::deserialize(deserializer)? {
            WireRange::Bounds { min, max } => {
                if min > max {
                    return Err(de::Error::custom("range min cannot be greater than max"));
                }
                Ok(Range { min, max })
            }
            WireRange::Seconds(seconds) => Ok(Range {
                min: seconds,
                max: seconds,
            }),
            WireRange::Text(text) => Range::parse(&text)
                .ok_or_else(|| de::Error::custom(format!("invalid range string: {text:?}"))),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
