//! # Reference Identifier Tests
//!
//! Exercises the public API against identifiers published in the SNOMED CT
//! International Edition, plus synthetic extended-namespace identifiers
//! whose check digits were computed independently.
//!
//! If these tests fail, identifiers that terminology servers accept would be
//! rejected here (or the reverse).

use std::thread;

use sct_core::{
    classify, diagnose, is_valid_concept_id_format, is_valid_description_id_format,
    is_valid_relationship_id_format, ComponentType, Sctid, ValidationError,
};

// ---------------------------------------------------------------------------
// Vector 1: International Edition concepts
// ---------------------------------------------------------------------------

const CORE_CONCEPTS: &[&str] = &[
    "138875005",          // SNOMED CT Concept (root)
    "404684003",          // Clinical finding
    "116680003",          // Is a
    "900000000000207008", // SNOMED CT core module
    "900000000000509007", // United States of America English language reference set
    "900000000000003001", // Fully specified name
];

#[test]
fn international_concepts_are_concepts() {
    for id in CORE_CONCEPTS {
        assert!(is_valid_concept_id_format(*id), "{id}");
        assert!(!is_valid_description_id_format(*id), "{id}");
        assert!(!is_valid_relationship_id_format(*id), "{id}");
        assert_eq!(classify(*id), ComponentType::Concept);
    }
}

// ---------------------------------------------------------------------------
// Vector 2: Extended identifiers
// ---------------------------------------------------------------------------

#[test]
fn extended_identifiers_classify_by_type_digit() {
    let cases = [
        ("11000003104", ComponentType::Concept),
        ("11000003115", ComponentType::Description),
        ("11000003127", ComponentType::Relationship),
    ];
    for (id, expected) in cases {
        assert_eq!(classify(id), expected, "{id}");
        let parsed = Sctid::parse(id).unwrap();
        assert!(parsed.is_extended());
        assert_eq!(parsed.namespace_id(), Some(1_000_003));
    }
}

// ---------------------------------------------------------------------------
// Vector 3: Rejections, one per stage
// ---------------------------------------------------------------------------

#[test]
fn each_stage_reports_its_own_rejection() {
    assert_eq!(diagnose(None), Err(ValidationError::Absent));
    assert_eq!(diagnose(""), Err(ValidationError::Empty));
    assert_eq!(diagnose("12345"), Err(ValidationError::InvalidLength { len: 5 }));
    assert_eq!(
        diagnose("1234567890123456789"),
        Err(ValidationError::InvalidLength { len: 19 })
    );
    assert_eq!(diagnose("13887500X"), Err(ValidationError::NonDigit { position: 8 }));
    assert_eq!(
        diagnose("100033"),
        Err(ValidationError::UnknownPartition { digit: '3' })
    );
    assert_eq!(diagnose("138875006"), Err(ValidationError::ChecksumMismatch));
}

#[test]
fn owned_and_borrowed_inputs_are_accepted() {
    let owned = String::from("138875005");
    let maybe: Option<String> = Some(owned.clone());
    assert!(is_valid_concept_id_format(owned.as_str()));
    assert!(is_valid_concept_id_format(maybe.as_deref()));
    assert!(!is_valid_concept_id_format(None::<&str>));
}

// ---------------------------------------------------------------------------
// Concurrency: predicates share only immutable tables
// ---------------------------------------------------------------------------

#[test]
fn concurrent_classification_is_consistent() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..1_000)
                    .map(|_| {
                        (
                            classify("138875005"),
                            classify("100014"),
                            classify("100022"),
                            classify("12345"),
                        )
                    })
                    .all(|r| {
                        r == (
                            ComponentType::Concept,
                            ComponentType::Description,
                            ComponentType::Relationship,
                            ComponentType::Unknown,
                        )
                    })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
