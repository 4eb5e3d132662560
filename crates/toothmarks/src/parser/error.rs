//! Load-time error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ScopeKey;

/// An error raised while loading a template document.
///
/// Everything here is detected at load time; a successfully constructed
/// template can only fail at evaluation time with an
/// [`EvaluateError`](crate::EvaluateError). Apart from [`LoadError::Io`] and
/// [`LoadError::InvalidKey`], every variant is a shape violation in the
/// document: a malformed YAML stream, a leaf that is not a list of strings,
/// or a rule whose parenthesized groups do not parse.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a template file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid YAML.
    #[error("invalid template document: {message}")]
    Document {
        message: String,
        line: usize,
        column: usize,
    },

    /// An unrecognized scope key in the template tree.
    #[error(
        "'{key}'{} is not a valid key. Each key must be one of {}.{}",
        located_at(path, key),
        valid_keys(),
        did_you_mean(suggestion)
    )]
    InvalidKey {
        key: String,
        /// Keys traversed to reach the bad one, outermost first.
        path: Vec<String>,
        /// Closest valid key, when one is plausibly a typo for it.
        suggestion: Option<String>,
    },

    /// A value where a nested mapping or a list of rules was required.
    #[error("value at {} should be a list of landmarks, not {actual}", render_path(path))]
    UnexpectedShape { path: Vec<String>, actual: &'static str },

    /// A rule list element that is not a string.
    #[error("rule at {} should be a string, not {actual}", render_path(path))]
    NotAString { path: Vec<String>, actual: &'static str },

    /// A branch whose rule list is empty.
    #[error("branch at {} defines no rules", render_path(path))]
    EmptyRules { path: Vec<String> },

    /// A rule with more than one range expression.
    #[error("rule '{rule}' contains more than one range expression")]
    MultipleRanges { rule: String },

    /// A range chunk that is neither an index nor a `low-high` span.
    #[error("invalid range chunk '{chunk}' in rule '{rule}'")]
    InvalidChunk { chunk: String, rule: String },

    /// A span whose bounds are explicitly descending, e.g. `5-3`.
    #[error("descending range '{chunk}' in rule '{rule}'")]
    DescendingRange { chunk: String, rule: String },

    /// A tooth index outside 1..=26.
    #[error("tooth index {index} out of range in rule '{rule}'")]
    IndexOutOfRange { index: u64, rule: String },
}

fn located_at(path: &[String], key: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" (located at {}->{})", path.join("->"), key)
    }
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        "the template root".to_string()
    } else {
        path.join("->")
    }
}

fn valid_keys() -> String {
    let quoted: Vec<String> = ScopeKey::ALL
        .iter()
        .map(|key| format!("'{key}'"))
        .collect();
    quoted.join(", ")
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(key) => format!(" Did you mean '{key}'?"),
        None => String::new(),
    }
}

/// Closest valid scope key within a small edit distance, for typo hints.
pub(crate) fn suggest_key(key: &str) -> Option<String> {
    let max_distance = if key.len() <= 3 { 1 } else { 2 };
    ScopeKey::ALL
        .iter()
        .map(|candidate| (strsim::levenshtein(key, candidate.as_str()), candidate))
        .filter(|(distance, _)| (1..=max_distance).contains(distance))
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.as_str().to_string())
}
