//! Integration tests for scope tree expansion.

use toothmarks::parser::{LoadError, parse_document};
use toothmarks::{Arch, Dentition, JawAttributes};

// =============================================================================
// Flattening
// =============================================================================

#[test]
fn test_root_sequence_is_wildcard_branch() {
    let document = parse_document("- '(a)(s)(-)'").unwrap();
    assert_eq!(document.branches.len(), 1);
    assert_eq!(document.branches[0].filter, JawAttributes::wildcard());
    assert_eq!(document.branches[0].rules.len(), 1);
}

#[test]
fn test_nested_scopes_accumulate() {
    let text = "\
primary:
  upper:
    - 'One'
";
    let document = parse_document(text).unwrap();
    assert_eq!(document.branches.len(), 1);
    assert_eq!(
        document.branches[0].filter,
        JawAttributes::wildcard()
            .with_dentition(Dentition::Primary)
            .with_arch(Arch::Upper)
    );
}

#[test]
fn test_any_narrows_nothing() {
    let document = parse_document("any:\n  - 'One'").unwrap();
    assert_eq!(document.branches[0].filter, JawAttributes::wildcard());
}

#[test]
fn test_branches_keep_declaration_order() {
    let text = "\
upper:
  - 'First'
lower:
  - 'Second'
any:
  - 'Third'
";
    let document = parse_document(text).unwrap();
    let filters: Vec<_> = document
        .branches
        .iter()
        .map(|branch| branch.filter.arch())
        .collect();
    assert_eq!(filters, vec![Some(Arch::Upper), Some(Arch::Lower), None]);
}

#[test]
fn test_rules_keep_declaration_order() {
    let document = parse_document("- 'One'\n- 'Two'\n- 'Three'").unwrap();
    let sources: Vec<_> = document.branches[0]
        .rules
        .iter()
        .map(|rule| rule.source.as_str())
        .collect();
    assert_eq!(sources, vec!["One", "Two", "Three"]);
}

// =============================================================================
// Metadata keys
// =============================================================================

#[test]
fn test_name_and_description_captured() {
    let text = "\
name: Orthodontic points
description: Landmarks for bracket placement.
any:
  - 'One'
";
    let document = parse_document(text).unwrap();
    assert_eq!(document.name.as_deref(), Some("Orthodontic points"));
    assert_eq!(
        document.description.as_deref(),
        Some("Landmarks for bracket placement.")
    );
    assert_eq!(document.branches.len(), 1);
}

#[test]
fn test_metadata_keys_are_not_scope_keys() {
    let document = parse_document("name: Points\nupper:\n  - 'One'").unwrap();
    assert_eq!(document.branches.len(), 1);
    assert_eq!(document.branches[0].filter.arch(), Some(Arch::Upper));
}

// =============================================================================
// Invalid keys
// =============================================================================

#[test]
fn test_invalid_key_at_root() {
    let err = parse_document("cake:\n  - 'foo'\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("'cake'"), "{message}");
    assert!(
        message.contains("'adult', 'primary', 'upper', 'lower', 'any'"),
        "{message}"
    );
    assert!(!message.contains("located at"), "{message}");
}

#[test]
fn test_invalid_key_reports_full_path() {
    let text = "\
primary:
  upper:
    cake:
      - 'foo'
";
    let err = parse_document(text).unwrap_err();
    match &err {
        LoadError::InvalidKey { key, path, .. } => {
            assert_eq!(key, "cake");
            assert_eq!(path, &["primary".to_string(), "upper".to_string()]);
        }
        other => panic!("expected InvalidKey, got {other:?}"),
    }
    assert!(
        err.to_string().contains("located at primary->upper->cake"),
        "{err}"
    );
}

#[test]
fn test_invalid_key_suggests_close_match() {
    let err = parse_document("uper:\n  - 'foo'").unwrap_err();
    match &err {
        LoadError::InvalidKey { suggestion, .. } => {
            assert_eq!(suggestion.as_deref(), Some("upper"));
        }
        other => panic!("expected InvalidKey, got {other:?}"),
    }
    assert!(err.to_string().contains("Did you mean 'upper'?"), "{err}");
}

#[test]
fn test_unrelated_key_gets_no_suggestion() {
    let err = parse_document("cake:\n  - 'foo'").unwrap_err();
    match err {
        LoadError::InvalidKey { suggestion, .. } => assert_eq!(suggestion, None),
        other => panic!("expected InvalidKey, got {other:?}"),
    }
}

// =============================================================================
// Shape violations
// =============================================================================

#[test]
fn test_scalar_leaf_rejected() {
    let err = parse_document("primary: eggs").unwrap_err();
    match &err {
        LoadError::UnexpectedShape { path, actual } => {
            assert_eq!(path, &["primary".to_string()]);
            assert_eq!(*actual, "a string");
        }
        other => panic!("expected UnexpectedShape, got {other:?}"),
    }
    assert!(
        err.to_string()
            .contains("value at primary should be a list of landmarks, not a string"),
        "{err}"
    );
}

#[test]
fn test_scalar_root_rejected() {
    let err = parse_document("eggs").unwrap_err();
    match err {
        LoadError::UnexpectedShape { path, .. } => assert!(path.is_empty()),
        other => panic!("expected UnexpectedShape, got {other:?}"),
    }
}

#[test]
fn test_non_string_rule_rejected() {
    let err = parse_document("upper:\n  - 3").unwrap_err();
    match err {
        LoadError::NotAString { path, actual } => {
            assert_eq!(path, vec!["upper".to_string()]);
            assert_eq!(actual, "a number");
        }
        other => panic!("expected NotAString, got {other:?}"),
    }
}

#[test]
fn test_empty_rule_list_rejected() {
    let err = parse_document("upper: []").unwrap_err();
    match err {
        LoadError::EmptyRules { path } => assert_eq!(path, vec!["upper".to_string()]),
        other => panic!("expected EmptyRules, got {other:?}"),
    }
}

#[test]
fn test_rule_errors_surface_at_load() {
    let err = parse_document("upper:\n  - '(5-3)'").unwrap_err();
    assert!(matches!(err, LoadError::DescendingRange { .. }));
}

#[test]
fn test_unparseable_document() {
    let err = parse_document("upper: [unclosed").unwrap_err();
    assert!(matches!(err, LoadError::Document { .. }));
}
