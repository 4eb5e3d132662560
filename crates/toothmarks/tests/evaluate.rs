//! Integration tests for template evaluation.

use std::sync::Arc;
use std::thread;

use toothmarks::parser::parse_rule;
use toothmarks::{
    Arch, Dentition, EvaluateError, JawAttributes, LandmarkTemplate, Side, SubstitutionContext,
};

fn jaw(dentition: Dentition, arch: Arch) -> JawAttributes {
    JawAttributes::builder().dentition(dentition).arch(arch).build()
}

// =============================================================================
// Rule substitution
// =============================================================================

#[test]
fn test_rule_substitution() {
    let context = SubstitutionContext::new(jaw(Dentition::Adult, Arch::Lower), Some(Side::Right));

    let apply = |rule: &str| context.apply(&parse_rule(rule).unwrap()).unwrap();
    assert_eq!(apply("hello world"), ["Hello world"]);
    assert_eq!(apply("(a)(s)(1-2)"), ["LR1", "LR2"]);
    assert_eq!(apply("(a)(s)(3-5,8)"), ["LR3", "LR4", "LR5", "LR8"]);
    assert_eq!(apply("(A) (S) canine"), ["Lower right canine"]);
    assert_eq!(apply("(-3,7-)"), ["1", "2", "3", "7", "8"]);
}

#[test]
fn test_primary_teeth_are_lettered() {
    let context = SubstitutionContext::new(jaw(Dentition::Primary, Arch::Upper), Some(Side::Left));

    let apply = |rule: &str| context.apply(&parse_rule(rule).unwrap()).unwrap();
    assert_eq!(apply("(s)(4-)"), ["LD", "LE"]);
    assert_eq!(apply("(-)"), ["A", "B", "C", "D", "E"]);
}

#[test]
fn test_capitalization_skips_capitals() {
    let context = SubstitutionContext::new(jaw(Dentition::Adult, Arch::Upper), None);

    let apply = |rule: &str| context.apply(&parse_rule(rule).unwrap()).unwrap();
    // Already-capitalized names pass through unchanged.
    assert_eq!(apply("UR4 cusp"), ["UR4 cusp"]);
    // Non-letters are neither lowercase nor uppercased.
    assert_eq!(apply("3rd molar"), ["3rd molar"]);
    assert_eq!(apply("gumline"), ["Gumline"]);
}

#[test]
fn test_range_splices_between_text() {
    let context = SubstitutionContext::new(jaw(Dentition::Adult, Arch::Upper), None);
    let rule = parse_rule("tip of (1-2) crown").unwrap();
    assert_eq!(
        context.apply(&rule).unwrap(),
        ["Tip of 1 crown", "Tip of 2 crown"]
    );
}

#[test]
fn test_wildcard_arch_is_an_error() {
    let context = SubstitutionContext::new(JawAttributes::wildcard(), Some(Side::Left));
    let err = context.apply(&parse_rule("(a)3").unwrap()).unwrap_err();
    assert!(matches!(err, EvaluateError::ArchUnspecified { .. }));
}

#[test]
fn test_wildcard_dentition_cannot_expand_ranges() {
    let attributes = JawAttributes::builder().arch(Arch::Upper).build();
    let context = SubstitutionContext::new(attributes, None);
    let err = context.apply(&parse_rule("(1-3)").unwrap()).unwrap_err();
    assert!(matches!(err, EvaluateError::DentitionUnspecified { .. }));
}

#[test]
fn test_side_tag_without_side_is_an_error() {
    let context = SubstitutionContext::new(jaw(Dentition::Adult, Arch::Upper), None);
    let err = context.apply(&parse_rule("(s)3").unwrap()).unwrap_err();
    assert!(matches!(err, EvaluateError::SideUnspecified { .. }));
}

// =============================================================================
// Branch selection
// =============================================================================

#[test]
fn test_first_declared_matching_branch_wins() {
    let template = LandmarkTemplate::from_text(
        "upper:\n  - 'From the upper branch'\nany:\n  - 'From the any branch'\n",
    )
    .unwrap();

    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Upper)).unwrap(),
        ["From the upper branch"]
    );
    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Lower)).unwrap(),
        ["From the any branch"]
    );
}

#[test]
fn test_declaration_order_breaks_overlap_ties() {
    // Both branches match an upper query; the first declared wins.
    let template = LandmarkTemplate::from_text(
        "any:\n  - 'Declared first'\nupper:\n  - 'Declared second'\n",
    )
    .unwrap();
    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Upper)).unwrap(),
        ["Declared first"]
    );
}

#[test]
fn test_concrete_branch_rejects_wildcard_query() {
    // Branch filters must not claim more than the query specifies.
    let template = LandmarkTemplate::from_text("upper:\n  - 'One'").unwrap();
    let query = JawAttributes::builder().dentition(Dentition::Adult).build();
    let err = template.evaluate(query).unwrap_err();
    match err {
        EvaluateError::LandmarksUndefined { attributes } => assert_eq!(attributes, query),
        other => panic!("expected LandmarksUndefined, got {other:?}"),
    }
}

#[test]
fn test_landmarks_undefined_names_the_query() {
    let template = LandmarkTemplate::from_text("upper:\n  - 'One'").unwrap();
    let err = template.evaluate(jaw(Dentition::Adult, Arch::Lower)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no landmarks defined for dentition=adult, arch=lower"
    );
}

// =============================================================================
// Mirrored assembly
// =============================================================================

#[test]
fn test_symmetric_rules_mirror_around_midline() {
    let template = LandmarkTemplate::from_text(
        "lower:\n  - '(a)(s)(1,3,5)'\n  - 'The middle'\n",
    )
    .unwrap();
    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Lower)).unwrap(),
        ["LL5", "LL3", "LL1", "The middle", "LR1", "LR3", "LR5"]
    );
}

#[test]
fn test_symmetric_rule_list_reverses_on_the_left() {
    let template =
        LandmarkTemplate::from_text("- '(a)(s)1'\n- '(a)(s)2'\n- 'Mid'\n").unwrap();
    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Upper)).unwrap(),
        ["UL2", "UL1", "Mid", "UR1", "UR2"]
    );
}

#[test]
fn test_asymmetric_rules_keep_forward_order() {
    let template = LandmarkTemplate::from_text(
        "upper:\n  - 'Something on the left'\n  - '(a)R(1-4)'\n",
    )
    .unwrap();
    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Upper)).unwrap(),
        ["Something on the left", "UR1", "UR2", "UR3", "UR4"]
    );
}

#[test]
fn test_primary_full_arch() {
    let template = LandmarkTemplate::from_text("- '(a)(s)(-)'").unwrap();
    assert_eq!(
        template.evaluate(jaw(Dentition::Primary, Arch::Upper)).unwrap(),
        ["ULE", "ULD", "ULC", "ULB", "ULA", "URA", "URB", "URC", "URD", "URE"]
    );
}

#[test]
fn test_adult_and_primary_scopes_diverge() {
    let template = LandmarkTemplate::from_text(
        "adult:\n  - '(a)(s)(6-)'\nprimary:\n  - '(a)(s)(4-)'\n",
    )
    .unwrap();
    assert_eq!(
        template.evaluate(jaw(Dentition::Adult, Arch::Lower)).unwrap(),
        ["LL8", "LL7", "LL6", "LR6", "LR7", "LR8"]
    );
    assert_eq!(
        template.evaluate(jaw(Dentition::Primary, Arch::Lower)).unwrap(),
        ["LLE", "LLD", "LRD", "LRE"]
    );
}

// =============================================================================
// Purity
// =============================================================================

#[test]
fn test_evaluate_is_idempotent() {
    let template = LandmarkTemplate::from_text("- '(a)(s)(1-3)'\n- 'Mid'").unwrap();
    let query = jaw(Dentition::Adult, Arch::Upper);
    let first = template.evaluate(query).unwrap();
    let second = template.evaluate(query).unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn test_template_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LandmarkTemplate>();
}

#[test]
fn test_evaluate_from_shared_reference() {
    let template = Arc::new(LandmarkTemplate::from_text("- '(a)(s)(1-3)'").unwrap());
    let query = jaw(Dentition::Adult, Arch::Upper);
    let expected = template.evaluate(query).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let template = Arc::clone(&template);
            thread::spawn(move || template.evaluate(query).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
