//! Per-side rule substitution.

use super::error::EvaluateError;
use super::range::expand;
use crate::parser::{RuleTemplate, Segment, TagKind};
use crate::types::{Arch, Dentition, JawAttributes, Side};

/// Substitution state for one evaluation pass over a rule.
///
/// A context binds the queried attributes to an optional side. Evaluation
/// builds three of them per query (left, right and neutral) and routes each
/// rule to the contexts that fit it: side-referencing rules to left and
/// right, everything else to neutral.
///
/// # Example
///
/// ```
/// use toothmarks::{Arch, Dentition, JawAttributes, Side, SubstitutionContext};
/// use toothmarks::parser::parse_rule;
///
/// let attributes = JawAttributes::builder()
///     .dentition(Dentition::Adult)
///     .arch(Arch::Lower)
///     .build();
/// let context = SubstitutionContext::new(attributes, Some(Side::Right));
///
/// let rule = parse_rule("(a)(s)(1-2)")?;
/// assert_eq!(context.apply(&rule)?, ["LR1", "LR2"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionContext {
    dentition: Option<Dentition>,
    arch: Option<Arch>,
    side: Option<Side>,
}

impl SubstitutionContext {
    /// Create a context for the given attributes and side. `None` is the
    /// neutral context used for rules that do not reference a side.
    pub fn new(attributes: JawAttributes, side: Option<Side>) -> Self {
        Self {
            dentition: attributes.dentition(),
            arch: attributes.arch(),
            side,
        }
    }

    /// Apply a rule, producing one landmark name per range token (or a
    /// single name when the rule has no range expression).
    ///
    /// The first character of each produced name is uppercased only when it
    /// is lowercase, so free-text rules become sentence-cased while names
    /// beginning with a tooth code pass through unchanged.
    pub fn apply(&self, rule: &RuleTemplate) -> Result<Vec<String>, EvaluateError> {
        // The rule parser admits at most one range expression, so the rule
        // splits into the text before it and the text after it.
        let mut head = String::new();
        let mut tail = String::new();
        let mut range = None;
        for segment in &rule.segments {
            let target = if range.is_some() { &mut tail } else { &mut head };
            match segment {
                Segment::Literal(text) => target.push_str(text),
                Segment::Tag(tag) => target.push_str(self.tag_value(*tag, rule)?),
                Segment::Range(expr) => range = Some(expr),
            }
        }

        let names = match range {
            None => vec![head],
            Some(expr) => {
                let dentition = self.dentition.ok_or_else(|| {
                    EvaluateError::DentitionUnspecified {
                        rule: rule.source.clone(),
                    }
                })?;
                expand(expr, dentition.tooth_count())
                    .into_iter()
                    .map(|index| format!("{head}{}{tail}", render_index(index, dentition)))
                    .collect()
            }
        };

        Ok(names.into_iter().map(capitalize_first).collect())
    }

    fn tag_value(&self, tag: TagKind, rule: &RuleTemplate) -> Result<&'static str, EvaluateError> {
        match tag {
            TagKind::ArchCode => self.require_arch(rule).map(Arch::code),
            TagKind::ArchWord => self.require_arch(rule).map(Arch::word),
            TagKind::SideCode => self.require_side(rule).map(Side::code),
            TagKind::SideWord => self.require_side(rule).map(Side::word),
        }
    }

    fn require_arch(&self, rule: &RuleTemplate) -> Result<Arch, EvaluateError> {
        self.arch.ok_or_else(|| EvaluateError::ArchUnspecified {
            rule: rule.source.clone(),
        })
    }

    fn require_side(&self, rule: &RuleTemplate) -> Result<Side, EvaluateError> {
        self.side.ok_or_else(|| EvaluateError::SideUnspecified {
            rule: rule.source.clone(),
        })
    }
}

/// Render a tooth index: numbers for adult teeth, letters (1 -> A, 2 -> B)
/// for primary teeth.
fn render_index(index: u8, dentition: Dentition) -> String {
    match dentition {
        Dentition::Adult => index.to_string(),
        Dentition::Primary => char::from(b'@' + index).to_string(),
    }
}

/// Uppercase the first character if and only if it is lowercase.
fn capitalize_first(name: String) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_lowercase() => {
            first.to_uppercase().chain(chars).collect()
        }
        _ => name,
    }
}
