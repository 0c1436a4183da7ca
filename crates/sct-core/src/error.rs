//! # Validation Errors
//!
//! Structured rejection reasons for SNOMED CT identifiers, built with
//! `thiserror`.
//!
//! The boolean predicates in [`crate::classify`] never surface these: every
//! rejection collapses to `false` or [`ComponentType::Unknown`]. The
//! diagnostic entry points ([`crate::diagnose`], [`crate::Sctid::parse`])
//! return them so that callers can tell an operator *why* an identifier was
//! refused.
//!
//! [`ComponentType::Unknown`]: crate::ComponentType::Unknown

use thiserror::Error;

use crate::ComponentType;

/// Why a candidate string was rejected as an SCTID.
///
/// Variants are listed in stage order: the first failing stage determines
/// which variant is reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No input was supplied.
    #[error("SCTID is absent")]
    Absent,

    /// The input was the empty string.
    #[error("SCTID is empty")]
    Empty,

    /// Length outside the inclusive range 6..=18.
    #[error("invalid SCTID length {len} (expected 6 to 18 digits)")]
    InvalidLength {
        /// Length of the rejected input, in bytes.
        len: usize,
    },

    /// A character other than an ASCII decimal digit was found.
    #[error("invalid SCTID character at position {position} (expected ASCII digits only)")]
    NonDigit {
        /// Zero-based byte offset of the first offending character.
        position: usize,
    },

    /// The partition digit does not name a known component type.
    #[error("unknown SCTID partition digit '{digit}'")]
    UnknownPartition {
        /// The digit found at the partition position.
        digit: char,
    },

    /// The partition digit names a different component type than required.
    #[error("SCTID identifies a {found}, expected a {expected}")]
    WrongComponentType {
        /// The component type the caller asked for.
        expected: ComponentType,
        /// The component type the partition digit encodes.
        found: ComponentType,
    },

    /// The Verhoeff accumulator did not reduce to zero.
    #[error("SCTID check digit mismatch")]
    ChecksumMismatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_mismatch_names_check_digit() {
        assert_eq!(ValidationError::ChecksumMismatch.to_string(), "SCTID check digit mismatch");
    }

    #[test]
    fn invalid_length_reports_length() {
        let err = ValidationError::InvalidLength { len: 19 };
        let msg = format!("{err}");
        assert!(msg.contains("19"));
        assert!(msg.contains("6 to 18"));
    }

    #[test]
    fn non_digit_reports_position() {
        let err = ValidationError::NonDigit { position: 3 };
        assert!(format!("{err}").contains("position 3"));
    }

    #[test]
    fn unknown_partition_reports_digit() {
        let err = ValidationError::UnknownPartition { digit: '7' };
        assert!(format!("{err}").contains("'7'"));
    }

    #[test]
    fn wrong_component_type_names_both() {
        let err = ValidationError::WrongComponentType {
            expected: ComponentType::Concept,
            found: ComponentType::Description,
        };
        let msg = format!("{err}");
        assert!(msg.contains("description"));
        assert!(msg.contains("concept"));
    }
}
