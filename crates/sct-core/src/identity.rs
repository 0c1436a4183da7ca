//! # Identifier Newtype
//!
//! [`Sctid`] is an owned identifier that passed every validation stage at
//! construction. Once built it cannot hold a malformed value, so consumers
//! can take `&Sctid` instead of re-validating strings.
//!
//! ## Layout
//!
//! Read right to left: one check digit, two partition digits, then (for
//! extended identifiers only) a seven-digit namespace, then the item
//! identifier.
//!
//! ```text
//! short:     <item><flag=0><type><check>
//! extended:  <item><namespace:7><flag=1><type><check>
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classify::diagnose;
use crate::error::ValidationError;
use crate::partition::ComponentType;

/// Width of the namespace field in extended identifiers.
const NAMESPACE_DIGITS: usize = 7;

/// A validated SNOMED CT identifier.
///
/// Serializes as a JSON string. Deserialization validates, so a document
/// containing a malformed identifier fails to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sctid(String);

impl Sctid {
    /// Parse and validate an identifier of any known component type.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first failing stage.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        diagnose(s.as_str())?;
        Ok(Self(s))
    }

    /// Parse and require a specific component type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::WrongComponentType`] if the identifier is
    /// valid but of another type, or the first failing stage otherwise.
    pub fn parse_as(
        value: impl Into<String>,
        expected: ComponentType,
    ) -> Result<Self, ValidationError> {
        let s = value.into();
        crate::classify::validate_as(s.as_str(), expected)?;
        Ok(Self(s))
    }

    /// The identifier digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value. Eighteen digits always fit in a `u64`.
    pub fn as_u64(&self) -> u64 {
        self.0
            .bytes()
            .fold(0u64, |n, b| n * 10 + u64::from(b - b'0'))
    }

    /// The component type encoded by the partition digit.
    pub fn component_type(&self) -> ComponentType {
        ComponentType::from_partition_digit(self.0.chars().rev().nth(1))
    }

    /// The two partition digits, flag first.
    pub fn partition_id(&self) -> &str {
        let n = self.0.len();
        &self.0[n - 3..n - 1]
    }

    /// `true` if the namespace-type flag marks this as an extended identifier.
    pub fn is_extended(&self) -> bool {
        self.partition_id().starts_with('1')
    }

    /// The namespace of an extended identifier.
    ///
    /// `None` for short-format identifiers, and for extended identifiers too
    /// short to carry both a namespace and at least one item digit.
    pub fn namespace_id(&self) -> Option<u32> {
        self.namespace_str()?.parse().ok()
    }

    /// The item identifier: every digit left of the namespace (extended) or
    /// the partition (short format).
    pub fn item_id(&self) -> &str {
        let end = self.0.len() - 3;
        match self.namespace_str() {
            Some(_) => &self.0[..end - NAMESPACE_DIGITS],
            None => &self.0[..end],
        }
    }

    fn namespace_str(&self) -> Option<&str> {
        if !self.is_extended() {
            return None;
        }
        let end = self.0.len() - 3;
        if end <= NAMESPACE_DIGITS {
            return None;
        }
        Some(&self.0[end - NAMESPACE_DIGITS..end])
    }
}

impl fmt::Display for Sctid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Sctid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Sctid {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Sctid> for String {
    fn from(id: Sctid) -> Self {
        id.0
    }
}

impl AsRef<str> for Sctid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
