//! Evaluation error types.

use thiserror::Error;

use crate::types::JawAttributes;

/// An error raised while evaluating a loaded template.
#[derive(Debug, Error)]
pub enum EvaluateError {
    /// No branch matches the queried attributes.
    ///
    /// This is a semantic miss, not a defect: a template that only defines
    /// upper-jaw landmarks is expected to produce this for a lower-jaw
    /// query. Callers should present it as "no landmarks defined for this
    /// case" rather than treat it as a bug.
    #[error("no landmarks defined for {attributes}")]
    LandmarksUndefined { attributes: JawAttributes },

    /// A rule substitutes the arch, but the query left it wildcard.
    #[error("rule '{rule}' requires an arch, but the query does not specify one")]
    ArchUnspecified { rule: String },

    /// A rule expands a tooth range, but the query left the dentition
    /// stage wildcard so the range bounds and numbering are unknown.
    #[error("rule '{rule}' requires a dentition stage, but the query does not specify one")]
    DentitionUnspecified { rule: String },

    /// A side tag was substituted with no side in scope.
    ///
    /// Rule partitioning keeps side-referencing rules away from the
    /// neutral context, so reaching this indicates a caller applied a
    /// context directly to a rule it does not fit.
    #[error("rule '{rule}' substitutes a side, but no side is in scope")]
    SideUnspecified { rule: String },
}
