//! Template document and rule parser.
//!
//! This module turns a YAML template document into flattened, pre-parsed
//! branches. All structural validation happens here, at load time: scope
//! keys are checked against the closed key set, leaves must be non-empty
//! lists of strings, and every rule string is parsed into a
//! [`RuleTemplate`] with its tags and range expression resolved.

pub mod ast;
pub mod error;
mod rule;
mod tree;

pub use ast::{RangeChunk, RangeExpr, RuleTemplate, Segment, TagKind};
pub use error::LoadError;
pub use rule::parse_rule;
pub use tree::{ParsedDocument, ScopedRules, parse_document};
