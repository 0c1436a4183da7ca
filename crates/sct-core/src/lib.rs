#![deny(missing_docs)]

//! # sct-core -- SNOMED CT Identifier Validation
//!
//! Validates and classifies SNOMED CT identifiers (SCTIDs). Every function
//! is pure and synchronous: no I/O, no shared mutable state, no allocation
//! on the predicate paths. The lookup tables are `const` and safe to use
//! from any number of threads.
//!
//! ## Stages
//!
//! 1. **[`format`]**: 6 to 18 ASCII decimal digits.
//! 2. **[`partition`]**: the second-to-last digit selects the
//!    [`ComponentType`].
//! 3. **[`verhoeff`]**: the trailing check digit satisfies the Verhoeff
//!    scheme.
//! 4. **[`classify`]**: composes the stages into the per-type predicates
//!    and [`classify()`](classify::classify).
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sct-*` crates.
//! - No `unsafe` code.
//! - Predicates never panic and never return errors; rejection is `false`
//!   or [`ComponentType::Unknown`]. Reasons are available through
//!   [`diagnose`] and [`Sctid::parse`].
//!
//! ```
//! use sct_core::{classify, is_valid_concept_id_format, ComponentType};
//!
//! assert!(is_valid_concept_id_format("138875005"));
//! assert_eq!(classify("100014"), ComponentType::Description);
//! assert_eq!(classify(None), ComponentType::Unknown);
//! ```

pub mod classify;
pub mod error;
pub mod format;
pub mod identity;
pub mod partition;
pub mod verhoeff;

// Re-export primary types at crate root for ergonomic imports.
pub use classify::{
    classify, diagnose, is_valid_concept_id_format, is_valid_description_id_format,
    is_valid_relationship_id_format, validate_as,
};
pub use error::ValidationError;
pub use format::{is_well_formed, MAX_LENGTH, MIN_LENGTH};
pub use identity::Sctid;
pub use partition::{partition_digit, ComponentType};
pub use verhoeff::checksum_valid;
