//! Server version model
//!
//! Dotted numeric versions (`"3"`, `"3.4"`, `"2021.2"`, `"7.1.3"`) as advertised by
//! the server root document. Parsing is tolerant: malformed input is an expected
//! outcome reported as `None`, never a panic.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

const MAX_SEGMENTS: usize = 3;

/// A `major.minor[.patch]` version with a total order.
///
/// A missing patch compares as `0`, so `3.4` and `3.4.0` are equal.
#[derive(Debug, Clone, Copy)]
pub struct SemanticVersion {
    major: u32,
    minor: u32,
    patch: Option<u32>,
}

impl SemanticVersion {
    /// Build a threshold version at compile time.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Parse a server-supplied version string, returning `None` on anything
    /// outside the accepted grammar.
    pub fn parse(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> Option<u32> {
        self.patch
    }

    fn key(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch.unwrap_or(0))
    }
}

/// Why a version string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionParseError {
    #[error("version string is empty")]
    Empty,

    #[error("version '{input}' has {count} segments (at most 3 allowed)")]
    TooManySegments { input: String, count: usize },

    #[error("version '{input}' has an empty segment")]
    EmptySegment { input: String },

    #[error("version '{input}' has a non-numeric segment '{segment}'")]
    NonNumeric { input: String, segment: String },

    #[error("version '{input}' has a segment out of range: '{segment}'")]
    OutOfRange { input: String, segment: String },
}

fn parse_segment(input: &str, segment: &str) -> Result<u32, VersionParseError> {
    if segment.is_empty() {
        return Err(VersionParseError::EmptySegment {
            input: input.to_string(),
        });
    }
    // u32::from_str accepts a leading '+', which the grammar does not
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VersionParseError::NonNumeric {
            input: input.to_string(),
            segment: segment.to_string(),
        });
    }
    segment
        .parse::<u32>()
        .map_err(|_| VersionParseError::OutOfRange {
            input: input.to_string(),
            segment: segment.to_string(),
        })
}

impl FromStr for SemanticVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let segments: Vec<&str> = s.split('.').collect();
        if segments.len() > MAX_SEGMENTS {
            return Err(VersionParseError::TooManySegments {
                input: s.to_string(),
                count: segments.len(),
            });
        }

        let mut numbers = Vec::with_capacity(segments.len());
        for segment in &segments {
            numbers.push(parse_segment(s, segment)?);
        }

        Ok(Self {
            major: numbers[0],
            minor: numbers.get(1).copied().unwrap_or(0),
            patch: numbers.get(2).copied(),
        })
    }
}

impl PartialEq for SemanticVersion {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SemanticVersion {}

impl Hash for SemanticVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
