#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Class-scoped vs batch-fatal classification
// ============================================================================

#[test_case(GenError::UnknownClass("X".into()), true ; "unknown class")]
#[test_case(
    GenError::ConfigCycle { class: "A".into(), chain: vec!["A".into(), "A".into()] },
    true
    ; "config cycle"
)]
#[test_case(
    GenError::InvalidReference { class: "A".into(), reference: "B".into() },
    true
    ; "invalid reference"
)]
#[test_case(GenError::render("A", "missing default"), true ; "template render")]
#[test_case(GenError::Config("bad".into()), false ; "config")]
#[test_case(GenError::io("x", std::io::Error::other("disk")), false ; "io")]
fn GenError___variant___reports_scope(error: GenError, class_scoped: bool) {
    assert_eq!(error.is_class_scoped(), class_scoped);
}

#[test_case(GenError::UnknownClass("X".into()), 1 ; "unknown class code")]
#[test_case(GenError::ConfigCycle { class: "A".into(), chain: vec![] }, 2 ; "config cycle code")]
#[test_case(GenError::InvalidReference { class: "A".into(), reference: "B".into() }, 3 ; "invalid reference code")]
#[test_case(GenError::render("A", "m"), 4 ; "template render code")]
#[test_case(GenError::Config("c".into()), 5 ; "config code")]
#[test_case(GenError::io("p", std::io::Error::other("e")), 6 ; "io code")]
fn GenError___variant___maps_to_code(error: GenError, expected: u32) {
    assert_eq!(error.error_code(), expected);
}
