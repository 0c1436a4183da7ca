//! # Format Matcher
//!
//! Structural check for SCTIDs: a string of ASCII decimal digits whose
//! length lies in `6..=18`. Leading zeros are allowed; signs, whitespace and
//! every other character are not.
//!
//! The check is a single bounded scan rather than a regular expression.

use crate::error::ValidationError;

/// Minimum SCTID length in digits.
pub const MIN_LENGTH: usize = 6;

/// Maximum SCTID length in digits.
pub const MAX_LENGTH: usize = 18;

/// Returns `true` if `sctid` is present, non-empty, all ASCII digits, and
/// between [`MIN_LENGTH`] and [`MAX_LENGTH`] digits long.
pub fn is_well_formed<'a>(sctid: impl Into<Option<&'a str>>) -> bool {
    check_format(sctid.into()).is_ok()
}

/// Stage-one validation with a reason on failure.
///
/// Length is checked before character class, so a 40-character string of
/// letters reports [`ValidationError::InvalidLength`].
pub(crate) fn check_format(sctid: Option<&str>) -> Result<&str, ValidationError> {
    let s = sctid.ok_or(ValidationError::Absent)?;
    if s.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&s.len()) {
        return Err(ValidationError::InvalidLength { len: s.len() });
    }
    if let Some(position) = s.bytes().position(|b| !b.is_ascii_digit()) {
        return Err(ValidationError::NonDigit { position });
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_minimum_and_maximum_lengths() {
        assert!(is_well_formed("100005"));
        assert!(is_well_formed("123456789012345013"));
    }

    #[test]
    fn accepts_leading_zeros() {
        assert!(is_well_formed("000000"));
        assert!(is_well_formed("0012345009"));
    }

    #[test]
    fn rejects_absent_and_empty() {
        assert!(!is_well_formed(None));
        assert!(!is_well_formed(""));
        assert_eq!(check_format(None), Err(ValidationError::Absent));
        assert_eq!(check_format(Some("")), Err(ValidationError::Empty));
    }

    #[test]
    fn rejects_out_of_range_lengths() {
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567890123456789"));
        assert_eq!(
            check_format(Some("12345")),
            Err(ValidationError::InvalidLength { len: 5 })
        );
    }

    #[test]
    fn rejects_signs_whitespace_and_letters() {
        assert!(!is_well_formed("-138875005"));
        assert!(!is_well_formed("+138875005"));
        assert!(!is_well_formed(" 138875005"));
        assert!(!is_well_formed("138875005\n"));
        assert!(!is_well_formed("1388a5005"));
        assert_eq!(
            check_format(Some("1388a5005")),
            Err(ValidationError::NonDigit { position: 4 })
        );
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digits are Unicode digits but not ASCII.
        assert!(!is_well_formed("١٢٣٤٥٦٧"));
        // Full-width digits.
        assert!(!is_well_formed("１２３４５６"));
    }

    proptest! {
        #[test]
        fn digit_strings_accepted_iff_length_in_range(s in "[0-9]{1,30}") {
            let expected = (MIN_LENGTH..=MAX_LENGTH).contains(&s.len());
            prop_assert_eq!(is_well_formed(s.as_str()), expected);
        }

        #[test]
        fn boundary_lengths_always_rejected(s in "([0-9]{5}|[0-9]{19})") {
            prop_assert!(!is_well_formed(s.as_str()));
        }

        #[test]
        fn any_non_digit_rejected(
            prefix in "[0-9]{0,9}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,9}",
        ) {
            let s = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_well_formed(s.as_str()));
        }
    }
}
