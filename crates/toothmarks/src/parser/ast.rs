//! Parsed representation of a single landmark rule.
//!
//! These types are public so external tooling can inspect a template's rules
//! without re-parsing the source strings.

/// A parsed rule string, split into literal text, substitution tags and at
/// most one tooth range expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTemplate {
    /// The rule exactly as written in the template document.
    pub source: String,
    pub segments: Vec<Segment>,
}

impl RuleTemplate {
    /// Whether the rule substitutes the side of the arch.
    ///
    /// Side-referencing rules are evaluated twice, once per side, and
    /// mirrored around the midline; all other rules are evaluated once with
    /// no side in scope.
    pub fn references_side(&self) -> bool {
        self.segments.iter().any(|segment| {
            matches!(segment, Segment::Tag(TagKind::SideCode | TagKind::SideWord))
        })
    }

    /// Whether the rule contains a tooth range expression.
    pub fn has_range(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Range(_)))
    }
}

/// A segment within a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, copied through unchanged.
    Literal(String),
    /// A substitution tag: `(a)`, `(A)`, `(s)` or `(S)`.
    Tag(TagKind),
    /// A tooth range expression: `(1-3)`, `(-)`, `(3-5,8)`.
    Range(RangeExpr),
}

/// The closed alphabet of substitution tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `(a)` - single-letter arch code (`U`/`L`).
    ArchCode,
    /// `(A)` - full arch word (`upper`/`lower`).
    ArchWord,
    /// `(s)` - single-letter side code (`L`/`R`).
    SideCode,
    /// `(S)` - full side word (`left`/`right`).
    SideWord,
}

impl TagKind {
    /// Look up the tag for a parenthesized group body.
    pub fn parse(body: &str) -> Option<Self> {
        match body {
            "a" => Some(TagKind::ArchCode),
            "A" => Some(TagKind::ArchWord),
            "s" => Some(TagKind::SideCode),
            "S" => Some(TagKind::SideWord),
            _ => None,
        }
    }
}

/// A comma-separated list of tooth indices and index spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeExpr {
    /// Chunks in declaration order.
    pub chunks: Vec<RangeChunk>,
}

/// One chunk of a range expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeChunk {
    /// A bare tooth index, e.g. the `8` in `(3-5,8)`.
    Index(u8),
    /// An inclusive span `low-high` where either bound may be omitted.
    ///
    /// An omitted low bound defaults to 1; an omitted high bound defaults to
    /// the tooth count of the dentition being evaluated.
    Span { low: Option<u8>, high: Option<u8> },
}
