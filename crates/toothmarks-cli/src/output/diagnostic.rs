//! Miette diagnostic wrapper for template load errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use std::path::Path;
use thiserror::Error;

use toothmarks::LoadError;

/// A miette-compatible diagnostic for template load errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(toothmarks::template))]
pub struct TemplateDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TemplateDiagnostic {
    /// Create a diagnostic from a LoadError with source context.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let (span, help) = match err {
            LoadError::Document { line, column, .. } => {
                (offset_span(content, *line, *column), None)
            }
            LoadError::InvalidKey { key, suggestion, .. } => (
                find_span(content, key),
                suggestion
                    .as_ref()
                    .map(|candidate| format!("did you mean '{}'?", candidate)),
            ),
            LoadError::UnexpectedShape { path, .. }
            | LoadError::NotAString { path, .. }
            | LoadError::EmptyRules { path } => (
                path.last().map_or_else(
                    || (0, 0).into(),
                    |key| find_span(content, key),
                ),
                None,
            ),
            LoadError::MultipleRanges { rule }
            | LoadError::InvalidChunk { rule, .. }
            | LoadError::DescendingRange { rule, .. }
            | LoadError::IndexOutOfRange { rule, .. } => (find_span(content, rule), None),
            LoadError::Io { .. } => ((0, 0).into(), None),
        };

        TemplateDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span,
            message: err.to_string(),
            help,
        }
    }
}

/// Span covering the first occurrence of `needle`, or the file start.
fn find_span(content: &str, needle: &str) -> SourceSpan {
    match content.find(needle) {
        Some(offset) => (offset, needle.len()).into(),
        None => (0, 0).into(),
    }
}

/// Convert a 1-based line:column position to a byte-offset span.
fn offset_span(content: &str, line: usize, column: usize) -> SourceSpan {
    // Sum of (line_length + 1) for lines before the error line, plus column.
    let offset = content
        .lines()
        .take(line.saturating_sub(1))
        .map(|l| l.len() + 1)
        .sum::<usize>()
        + column.saturating_sub(1);

    // Clamp offset to content length to avoid miette panic on out-of-bounds
    let offset = offset.min(content.len());
    (offset, 1).into()
}
