//! Tooth range expansion.

use crate::parser::{RangeChunk, RangeExpr};

/// Expand a range expression into tooth indices.
///
/// Chunks contribute in declaration order; each span expands ascending and
/// inclusive. An omitted low bound defaults to 1, an omitted high bound to
/// `max_index` (the tooth count of the dentition being evaluated). A span
/// whose effective low bound exceeds `max_index` contributes nothing.
pub fn expand(range: &RangeExpr, max_index: u8) -> Vec<u8> {
    let mut indices = Vec::new();
    for chunk in &range.chunks {
        match chunk {
            RangeChunk::Index(index) => indices.push(*index),
            RangeChunk::Span { low, high } => {
                let low = low.unwrap_or(1);
                let high = high.unwrap_or(max_index);
                indices.extend(low..=high);
            }
        }
    }
    indices
}
