//! # Classifier
//!
//! Composes the three stages into per-type predicates and a generic
//! classification. Stages run in order (format, partition, checksum) and
//! the first failure decides the outcome. Nothing here panics or errors:
//! a rejected identifier is `false` or [`ComponentType::Unknown`].
//!
//! [`diagnose`] and [`validate_as`] report the rejection reason for callers
//! that need more than a boolean.

use crate::error::ValidationError;
use crate::format::check_format;
use crate::partition::{partition_digit, ComponentType};
use crate::verhoeff::accumulate;

/// `true` if `sctid` is a well-formed, checksum-valid concept identifier.
pub fn is_valid_concept_id_format<'a>(sctid: impl Into<Option<&'a str>>) -> bool {
    validate_as(sctid, ComponentType::Concept).is_ok()
}

/// `true` if `sctid` is a well-formed, checksum-valid description identifier.
pub fn is_valid_description_id_format<'a>(sctid: impl Into<Option<&'a str>>) -> bool {
    validate_as(sctid, ComponentType::Description).is_ok()
}

/// `true` if `sctid` is a well-formed, checksum-valid relationship identifier.
pub fn is_valid_relationship_id_format<'a>(sctid: impl Into<Option<&'a str>>) -> bool {
    validate_as(sctid, ComponentType::Relationship).is_ok()
}

/// The component type `sctid` identifies, or [`ComponentType::Unknown`] if
/// it is rejected by any stage.
pub fn classify<'a>(sctid: impl Into<Option<&'a str>>) -> ComponentType {
    diagnose(sctid).unwrap_or(ComponentType::Unknown)
}

/// Classify `sctid`, reporting the first failing stage on rejection.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first stage that rejects the input.
pub fn diagnose<'a>(sctid: impl Into<Option<&'a str>>) -> Result<ComponentType, ValidationError> {
    let s = check_format(sctid.into())?;
    let component = match ComponentType::from_partition_digit(partition_digit(s)) {
        ComponentType::Unknown => {
            // Well-formed input is at least six digits long.
            let digit = partition_digit(s).unwrap_or('?');
            return Err(ValidationError::UnknownPartition { digit });
        }
        known => known,
    };
    if accumulate(s) != Some(0) {
        return Err(ValidationError::ChecksumMismatch);
    }
    Ok(component)
}

/// Validate `sctid` as an identifier of the given component type.
///
/// The partition check runs before the checksum, so an identifier of the
/// wrong type reports [`ValidationError::WrongComponentType`] even if its
/// check digit is also wrong.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first stage that rejects the input.
/// Asking for [`ComponentType::Unknown`] always fails.
pub fn validate_as<'a>(
    sctid: impl Into<Option<&'a str>>,
    expected: ComponentType,
) -> Result<(), ValidationError> {
    let s = check_format(sctid.into())?;
    let digit = partition_digit(s);
    let found = ComponentType::from_partition_digit(digit);
    if found == ComponentType::Unknown {
        return Err(ValidationError::UnknownPartition {
            digit: digit.unwrap_or('?'),
        });
    }
    if found != expected {
        return Err(ValidationError::WrongComponentType { expected, found });
    }
    if accumulate(s) != Some(0) {
        return Err(ValidationError::ChecksumMismatch);
    }
    Ok(())
}
