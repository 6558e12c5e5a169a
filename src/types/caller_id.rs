//! Caller identity type.
//!
//! `CallerId` identifies the user on whose behalf a tool executes. Every
//! side effect a tool performs is scoped to this identity.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A validated caller identifier.
///
/// Caller ids come from the hosting platform's session layer and are used
/// verbatim as the scoping key for context records. Validation rejects the
/// shapes that would corrupt a lookup key: empty strings, oversized values,
/// and whitespace or control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CallerId(String);

/// Error returned when attempting to create an invalid caller id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidCallerId {
    /// The id was empty.
    Empty,
    /// The id exceeded the maximum length.
    TooLong {
        /// The length of the rejected id
        len: usize,
    },
    /// The id contained a whitespace or control character.
    InvalidCharacter {
        /// The offending character
        ch: char,
    },
}

impl fmt::Display for InvalidCallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "caller id cannot be empty"),
            Self::TooLong { len } => {
                write!(
                    f,
                    "caller id length {len} exceeds maximum of {}",
                    CallerId::MAX_LEN
                )
            }
            Self::InvalidCharacter { ch } => {
                write!(f, "caller id contains invalid character {ch:?}")
            }
        }
    }
}

impl std::error::Error for InvalidCallerId {}

impl CallerId {
    /// Maximum accepted length in bytes.
    pub const MAX_LEN: usize = 128;

    /// Parses a caller id from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCallerId` if the string is empty, longer than
    /// [`CallerId::MAX_LEN`], or contains whitespace/control characters.
    pub fn parse(s: &str) -> Result<Self, InvalidCallerId> {
        if s.is_empty() {
            return Err(InvalidCallerId::Empty);
        }
        if s.len() > Self::MAX_LEN {
            return Err(InvalidCallerId::TooLong { len: s.len() });
        }
        if let Some(ch) = s.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(InvalidCallerId::InvalidCharacter { ch });
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CallerId {
    type Err = InvalidCallerId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for CallerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for CallerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CallerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
