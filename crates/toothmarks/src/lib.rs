//! Declarative landmark-name templates for dental arches.
//!
//! A template is a small YAML document whose mapping keys scope rules to
//! particular (dentition, arch) combinations and whose leaf sequences hold
//! the rules themselves. Each rule is a string that may contain substitution
//! tags (`(a)`, `(A)`, `(s)`, `(S)`) and at most one tooth-number range
//! expression (`(1-3)`, `(-)`, `(3-5,8)`). Evaluating a template for a
//! concrete jaw produces the ordered list of landmark names, mirrored around
//! the midline so the output reads like a jaw-shaped row.
//!
//! # Example
//!
//! ```
//! use toothmarks::{Arch, Dentition, JawAttributes, LandmarkTemplate};
//!
//! let template = LandmarkTemplate::from_text("- '(a)(s)(1-3)'")?;
//! let attributes = JawAttributes::builder()
//!     .dentition(Dentition::Adult)
//!     .arch(Arch::Upper)
//!     .build();
//! assert_eq!(
//!     template.evaluate(attributes)?,
//!     ["UL3", "UL2", "UL1", "UR1", "UR2", "UR3"],
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod evaluator;
pub mod parser;
pub mod types;

pub use evaluator::{EvaluateError, LandmarkTemplate, SubstitutionContext};
pub use parser::{LoadError, RuleTemplate, ScopedRules};
pub use types::{Arch, Dentition, JawAttributes, ScopeKey, Side};
