//! Core attribute types describing a dental arch.
//!
//! `JawAttributes` is the value that both scopes a template branch and
//! selects one at evaluation time. Fields are `Option`s where `None` means
//! "wildcard": a branch filter leaves a field wildcard to apply to every
//! value of that field, and a query leaves a field wildcard when the caller
//! has not narrowed it.

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

/// The tooth set present in a jaw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dentition {
    /// Permanent (adult) teeth.
    Adult,
    /// Deciduous (baby) teeth.
    Primary,
}

impl Dentition {
    /// Number of tooth positions per quadrant, following the Palmer notation
    /// (8 permanent, 5 deciduous). This is the default upper bound for
    /// open-ended range expressions.
    pub fn tooth_count(self) -> u8 {
        match self {
            Dentition::Adult => 8,
            Dentition::Primary => 5,
        }
    }
}

impl fmt::Display for Dentition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dentition::Adult => write!(f, "adult"),
            Dentition::Primary => write!(f, "primary"),
        }
    }
}

/// One of the two dental arches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// The maxilla.
    Upper,
    /// The mandible.
    Lower,
}

impl Arch {
    /// Single-letter arch code as used in tooth names (`UL3`).
    pub fn code(self) -> &'static str {
        match self {
            Arch::Upper => "U",
            Arch::Lower => "L",
        }
    }

    /// Full arch word for free-text landmark names.
    pub fn word(self) -> &'static str {
        match self {
            Arch::Upper => "upper",
            Arch::Lower => "lower",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// Left or right half of an arch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Single-letter side code as used in tooth names (`UL3`).
    pub fn code(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    /// Full side word for free-text landmark names.
    pub fn word(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.word())
    }
}

/// An immutable (dentition, arch) combination with wildcard support.
///
/// Branch filters accumulate concrete fields as the scope tree is walked;
/// queries describe the jaw the caller wants landmarks for. `None` fields
/// are wildcards on both sides.
///
/// # Example
///
/// ```
/// use toothmarks::{Arch, Dentition, JawAttributes};
///
/// let query = JawAttributes::builder()
///     .dentition(Dentition::Adult)
///     .arch(Arch::Upper)
///     .build();
/// let filter = JawAttributes::wildcard().with_arch(Arch::Upper);
///
/// assert!(filter.matches(&query, true));
/// assert!(!filter.with_dentition(Dentition::Primary).matches(&query, true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct JawAttributes {
    dentition: Option<Dentition>,
    arch: Option<Arch>,
}

impl JawAttributes {
    /// The fully wildcarded value, matching every jaw. Scope tree traversal
    /// starts from this and narrows one field per scope key.
    pub fn wildcard() -> Self {
        Self { dentition: None, arch: None }
    }

    /// Get the dentition stage, if narrowed.
    pub fn dentition(&self) -> Option<Dentition> {
        self.dentition
    }

    /// Get the arch, if narrowed.
    pub fn arch(&self) -> Option<Arch> {
        self.arch
    }

    /// Return a copy with the dentition stage narrowed.
    pub fn with_dentition(self, dentition: Dentition) -> Self {
        Self { dentition: Some(dentition), ..self }
    }

    /// Return a copy with the arch narrowed.
    pub fn with_arch(self, arch: Arch) -> Self {
        Self { arch: Some(arch), ..self }
    }

    /// Test whether `self` (a filter) accepts `other` (a query).
    ///
    /// A wildcard field on `self` matches anything. A concrete field on
    /// `self` requires an equal concrete field on `other`; when `strict` is
    /// false a wildcard on `other` also satisfies it.
    pub fn matches(&self, other: &Self, strict: bool) -> bool {
        field_matches(self.dentition, other.dentition, strict)
            && field_matches(self.arch, other.arch, strict)
    }
}

fn field_matches<T: PartialEq>(ours: Option<T>, theirs: Option<T>, strict: bool) -> bool {
    match (ours, theirs) {
        (None, _) => true,
        (Some(_), None) => !strict,
        (Some(a), Some(b)) => a == b,
    }
}

impl fmt::Display for JawAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.dentition {
            Some(dentition) => write!(f, "dentition={dentition}")?,
            None => write!(f, "dentition=*")?,
        }
        match self.arch {
            Some(arch) => write!(f, ", arch={arch}"),
            None => write!(f, ", arch=*"),
        }
    }
}

/// A scope key in a template tree, narrowing which jaws a branch applies to.
///
/// The set is closed: every mapping key in a template (other than the
/// `name`/`description` metadata keys) must be one of these five.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKey {
    Adult,
    Primary,
    Upper,
    Lower,
    /// Applies to every jaw; narrows nothing.
    Any,
}

impl ScopeKey {
    /// Every valid scope key, in the order used for error messages.
    pub const ALL: [ScopeKey; 5] = [
        ScopeKey::Adult,
        ScopeKey::Primary,
        ScopeKey::Upper,
        ScopeKey::Lower,
        ScopeKey::Any,
    ];

    /// Look up a mapping key. Returns `None` for anything outside the set.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "adult" => Some(ScopeKey::Adult),
            "primary" => Some(ScopeKey::Primary),
            "upper" => Some(ScopeKey::Upper),
            "lower" => Some(ScopeKey::Lower),
            "any" => Some(ScopeKey::Any),
            _ => None,
        }
    }

    /// The key as it appears in a template document.
    pub fn as_str(self) -> &'static str {
        match self {
            ScopeKey::Adult => "adult",
            ScopeKey::Primary => "primary",
            ScopeKey::Upper => "upper",
            ScopeKey::Lower => "lower",
            ScopeKey::Any => "any",
        }
    }

    /// Narrow an accumulated branch filter by this key.
    pub fn refine(self, filter: JawAttributes) -> JawAttributes {
        match self {
            ScopeKey::Adult => filter.with_dentition(Dentition::Adult),
            ScopeKey::Primary => filter.with_dentition(Dentition::Primary),
            ScopeKey::Upper => filter.with_arch(Arch::Upper),
            ScopeKey::Lower => filter.with_arch(Arch::Lower),
            ScopeKey::Any => filter,
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
