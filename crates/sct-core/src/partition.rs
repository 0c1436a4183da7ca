//! # Partition Extractor
//!
//! The two digits immediately left of the check digit form the partition
//! identifier. The right-hand digit encodes the component type; the
//! left-hand digit is the namespace-type flag (`0` for short-format core
//! identifiers, `1` for extended identifiers carrying a namespace).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Inputs of this length or shorter have no partition position.
const PARTITION_GUARD_LENGTH: usize = 4;

/// The kind of terminology component an SCTID refers to.
///
/// Derived from the partition digit, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentType {
    /// Partition digit `0`.
    Concept,
    /// Partition digit `1`.
    Description,
    /// Partition digit `2`.
    Relationship,
    /// No partition digit, a digit outside `0..=2`, or a rejected identifier.
    Unknown,
}

impl ComponentType {
    /// Map a partition digit to its component type.
    pub fn from_partition_digit(digit: Option<char>) -> Self {
        match digit {
            Some('0') => Self::Concept,
            Some('1') => Self::Description,
            Some('2') => Self::Relationship,
            _ => Self::Unknown,
        }
    }

    /// The partition digit encoding this component type, if any.
    pub fn partition_digit(self) -> Option<char> {
        match self {
            Self::Concept => Some('0'),
            Self::Description => Some('1'),
            Self::Relationship => Some('2'),
            Self::Unknown => None,
        }
    }

    /// Lowercase name, as used in messages and CLI arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Description => "description",
            Self::Relationship => "relationship",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The component-type digit of `sctid`: the second-to-last character.
///
/// Returns `None` for absent input or inputs of four characters or fewer.
/// The input is not otherwise validated.
pub fn partition_digit<'a>(sctid: impl Into<Option<&'a str>>) -> Option<char> {
    let s = sctid.into()?;
    if s.chars().count() <= PARTITION_GUARD_LENGTH {
        return None;
    }
    s.chars().rev().nth(1)
}
