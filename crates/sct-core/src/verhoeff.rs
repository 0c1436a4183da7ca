//! # Checksum Verifier
//!
//! Verhoeff check-digit verification over the dihedral group D5.
//!
//! Digits are consumed right to left, starting with the check digit itself.
//! Position `i` permutes its digit through `P[i % 8]` and folds it into the
//! accumulator with the group operation `D`. A sequence is valid exactly
//! when the accumulator ends at the identity, `0`.
//!
//! The scheme catches every single-digit substitution and every adjacent
//! transposition, which a plain digit sum does not.

use crate::format::is_well_formed;

/// Cayley table of D5: `D[a][b]` is the group product of `a` and `b`.
const D: [[u8; 10]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 2, 3, 4, 0, 6, 7, 8, 9, 5],
    [2, 3, 4, 0, 1, 7, 8, 9, 5, 6],
    [3, 4, 0, 1, 2, 8, 9, 5, 6, 7],
    [4, 0, 1, 2, 3, 9, 5, 6, 7, 8],
    [5, 9, 8, 7, 6, 0, 4, 3, 2, 1],
    [6, 5, 9, 8, 7, 1, 0, 4, 3, 2],
    [7, 6, 5, 9, 8, 2, 1, 0, 4, 3],
    [8, 7, 6, 5, 9, 3, 2, 1, 0, 4],
    [9, 8, 7, 6, 5, 4, 3, 2, 1, 0],
];

/// Position permutations. Row 0 is the identity and row `k` applies the
/// base permutation `k` times, so the check digit passes through unchanged.
const P: [[u8; 10]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9],
    [1, 5, 7, 6, 2, 8, 3, 0, 9, 4],
    [5, 8, 0, 3, 7, 9, 6, 1, 4, 2],
    [8, 9, 1, 6, 0, 4, 3, 5, 2, 7],
    [9, 4, 5, 3, 1, 2, 6, 8, 7, 0],
    [4, 2, 8, 6, 5, 7, 3, 9, 0, 1],
    [2, 7, 9, 3, 8, 0, 6, 4, 1, 5],
    [7, 0, 4, 6, 9, 1, 3, 2, 5, 8],
];

/// Fold a digit sequence into its final Verhoeff accumulator.
///
/// Works on any length, including sequences too short to be SCTIDs.
/// Returns `None` if a non-digit byte is present.
pub fn accumulate(digits: &str) -> Option<u8> {
    digits
        .bytes()
        .rev()
        .enumerate()
        .try_fold(0u8, |c, (i, b)| {
            if !b.is_ascii_digit() {
                return None;
            }
            let permuted = P[i % 8][usize::from(b - b'0')];
            Some(D[usize::from(c)][usize::from(permuted)])
        })
}

/// Returns `true` if `sctid` is well formed and its trailing check digit
/// satisfies the Verhoeff scheme.
///
/// Inputs rejected by [`is_well_formed`] are never checksum-valid.
pub fn checksum_valid<'a>(sctid: impl Into<Option<&'a str>>) -> bool {
    match sctid.into() {
        Some(s) if is_well_formed(s) => accumulate(s) == Some(0),
        _ => false,
    }
}
