//! Scope tree expansion.
//!
//! A template document is a nested YAML structure: mappings whose keys are
//! scope keys (plus the `name`/`description` metadata keys) and whose leaves
//! are lists of rule strings. Expansion walks the tree depth-first in
//! document order, narrowing a [`JawAttributes`] filter per scope key, and
//! flattens it into an ordered list of branches. Document order is what
//! makes branch selection deterministic: evaluation picks the first branch
//! whose filter matches.

use serde_yaml::Value;

use super::ast::RuleTemplate;
use super::error::{LoadError, suggest_key};
use super::rule::parse_rule;
use crate::types::{JawAttributes, ScopeKey};

/// A flattened branch: the scope filter accumulated along one path through
/// the tree, and the rules declared at its leaf.
#[derive(Debug, Clone)]
pub struct ScopedRules {
    pub filter: JawAttributes,
    pub rules: Vec<RuleTemplate>,
}

/// A fully parsed template document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Branches in tree traversal order.
    pub branches: Vec<ScopedRules>,
}

/// Parse a template document from text.
pub fn parse_document(text: &str) -> Result<ParsedDocument, LoadError> {
    let root: Value = serde_yaml::from_str(text).map_err(|e| {
        let (line, column) = e
            .location()
            .map_or((1, 1), |loc| (loc.line(), loc.column()));
        LoadError::Document {
            message: e.to_string(),
            line,
            column,
        }
    })?;

    let mut document = ParsedDocument::default();
    let mut path = Vec::new();
    expand_node(&root, JawAttributes::wildcard(), &mut path, &mut document)?;
    Ok(document)
}

/// Recursively expand one node, appending flattened branches to `document`.
fn expand_node(
    node: &Value,
    filter: JawAttributes,
    path: &mut Vec<String>,
    document: &mut ParsedDocument,
) -> Result<(), LoadError> {
    match node {
        Value::Mapping(mapping) => {
            for (key, sub_node) in mapping {
                let key = match key.as_str() {
                    Some(key) => key,
                    None => {
                        return Err(LoadError::InvalidKey {
                            key: render_scalar(key),
                            path: path.clone(),
                            suggestion: None,
                        });
                    }
                };
                if key == "name" || key == "description" {
                    capture_metadata(key, sub_node, path, document);
                    continue;
                }
                let Some(scope_key) = ScopeKey::parse(key) else {
                    return Err(LoadError::InvalidKey {
                        key: key.to_string(),
                        path: path.clone(),
                        suggestion: suggest_key(key),
                    });
                };
                path.push(key.to_string());
                expand_node(sub_node, scope_key.refine(filter), path, document)?;
                path.pop();
            }
            Ok(())
        }

        Value::Sequence(elements) => {
            if elements.is_empty() {
                return Err(LoadError::EmptyRules { path: path.clone() });
            }
            let mut rules = Vec::with_capacity(elements.len());
            for element in elements {
                let Some(source) = element.as_str() else {
                    return Err(LoadError::NotAString {
                        path: path.clone(),
                        actual: shape_name(element),
                    });
                };
                rules.push(parse_rule(source)?);
            }
            document.branches.push(ScopedRules { filter, rules });
            Ok(())
        }

        other => Err(LoadError::UnexpectedShape {
            path: path.clone(),
            actual: shape_name(other),
        }),
    }
}

/// Record a `name`/`description` value. Only root-level metadata is kept;
/// deeper occurrences are skipped, like any other metadata key.
fn capture_metadata(key: &str, value: &Value, path: &[String], document: &mut ParsedDocument) {
    if !path.is_empty() {
        return;
    }
    let Some(text) = value.as_str() else {
        return;
    };
    if key == "name" {
        document.name = Some(text.to_string());
    } else {
        document.description = Some(text.to_string());
    }
}

/// Human-readable shape of a YAML node, for error messages.
fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Render a non-string mapping key for an error message.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => format!("{other:?}"),
    }
}
