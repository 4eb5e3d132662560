//! Loaded landmark templates and their evaluation.

use std::fs;
use std::path::Path;

use super::context::SubstitutionContext;
use super::error::EvaluateError;
use crate::parser::{LoadError, RuleTemplate, ScopedRules, parse_document};
use crate::types::{JawAttributes, Side};

/// A loaded landmark template.
///
/// Construction flattens the scope tree once; the result is immutable, so a
/// template can be shared freely across threads and evaluated repeatedly.
/// `evaluate` allocates only its output.
///
/// # Example
///
/// ```
/// use toothmarks::{Arch, Dentition, JawAttributes, LandmarkTemplate};
///
/// let template = LandmarkTemplate::from_text(
///     "upper:\n  - '(a)(s)(1-2)'\nlower:\n  - The midline\n",
/// )?;
/// let lower = JawAttributes::builder()
///     .dentition(Dentition::Adult)
///     .arch(Arch::Lower)
///     .build();
/// assert_eq!(template.evaluate(lower)?, ["The midline"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct LandmarkTemplate {
    name: Option<String>,
    description: Option<String>,
    branches: Vec<ScopedRules>,
}

impl LandmarkTemplate {
    /// Load a template from text.
    pub fn from_text(text: &str) -> Result<Self, LoadError> {
        let document = parse_document(text)?;
        Ok(Self {
            name: document.name,
            description: document.description,
            branches: document.branches,
        })
    }

    /// Load a template from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_text(&text)
    }

    /// The template's `name` metadata, if present.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The template's `description` metadata, if present.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The flattened branches, in declaration order.
    pub fn branches(&self) -> &[ScopedRules] {
        &self.branches
    }

    /// Produce the ordered landmark names for a jaw.
    ///
    /// The first declared branch whose filter matches wins. Its
    /// side-referencing rules are evaluated for the left side (reversed, so
    /// the sequence walks in from the back of the left quadrant), then the
    /// remaining rules with no side in scope, then the side-referencing
    /// rules again for the right side in declaration order. The output
    /// therefore mirrors around the midline, reading like the jaw itself.
    pub fn evaluate(&self, attributes: JawAttributes) -> Result<Vec<String>, EvaluateError> {
        let branch = self
            .branches
            .iter()
            .find(|branch| branch.filter.matches(&attributes, true))
            .ok_or(EvaluateError::LandmarksUndefined { attributes })?;

        let (symmetric, asymmetric): (Vec<&RuleTemplate>, Vec<&RuleTemplate>) = branch
            .rules
            .iter()
            .partition(|rule| rule.references_side());

        let left = SubstitutionContext::new(attributes, Some(Side::Left));
        let neutral = SubstitutionContext::new(attributes, None);
        let right = SubstitutionContext::new(attributes, Some(Side::Right));

        let mut landmarks = Vec::new();
        for rule in symmetric.iter().rev() {
            let mut names = left.apply(rule)?;
            names.reverse();
            landmarks.append(&mut names);
        }
        for rule in &asymmetric {
            landmarks.append(&mut neutral.apply(rule)?);
        }
        for rule in &symmetric {
            landmarks.append(&mut right.apply(rule)?);
        }
        Ok(landmarks)
    }
}
