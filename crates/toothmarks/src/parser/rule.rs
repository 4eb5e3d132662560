//! Rule string parser using winnow.
//!
//! Splits a rule into literal text and parenthesized groups, then classifies
//! each group as a substitution tag or a tooth range expression. The tag
//! alphabet is fixed (`a`, `A`, `s`, `S`); a group body outside it must parse
//! as a range, and anything else is a load error naming the offending chunk.
//! An unmatched `(` or a stray `)` is plain literal text.

use winnow::combinator::{alt, delimited, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_while};

use super::ast::{RangeChunk, RangeExpr, RuleTemplate, Segment, TagKind};
use super::error::LoadError;

/// A raw segment before group bodies are classified.
enum RawSegment<'i> {
    Literal(char),
    Group(&'i str),
}

/// Parse a rule string into a [`RuleTemplate`].
pub fn parse_rule(source: &str) -> Result<RuleTemplate, LoadError> {
    let mut input = source;
    // The grammar accepts any string: unparseable parens fall back to
    // literal characters, so this cannot fail before classification.
    let raw: Vec<RawSegment> = repeat(0.., raw_segment)
        .parse_next(&mut input)
        .unwrap_or_default();

    let mut segments = Vec::new();
    let mut seen_range = false;
    for segment in raw {
        match segment {
            RawSegment::Literal(c) => push_literal(&mut segments, c),
            RawSegment::Group(body) => match TagKind::parse(body) {
                Some(tag) => segments.push(Segment::Tag(tag)),
                None => {
                    if seen_range {
                        return Err(LoadError::MultipleRanges {
                            rule: source.to_string(),
                        });
                    }
                    seen_range = true;
                    segments.push(Segment::Range(parse_range_body(body, source)?));
                }
            },
        }
    }

    Ok(RuleTemplate {
        source: source.to_string(),
        segments,
    })
}

/// Parse one segment: a parenthesized group, or any single literal character
/// (orphan parens included).
fn raw_segment<'i>(input: &mut &'i str) -> ModalResult<RawSegment<'i>> {
    alt((group.map(RawSegment::Group), any.map(RawSegment::Literal))).parse_next(input)
}

/// Parse a parenthesized group and return its body.
fn group<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited('(', take_while(1.., |c: char| c != '(' && c != ')'), ')').parse_next(input)
}

/// Append a character, merging into a trailing literal segment.
fn push_literal(segments: &mut Vec<Segment>, c: char) {
    if let Some(Segment::Literal(text)) = segments.last_mut() {
        text.push(c);
    } else {
        segments.push(Segment::Literal(c.to_string()));
    }
}

/// Parse the body of a range expression: comma-separated indices and spans.
fn parse_range_body(body: &str, rule: &str) -> Result<RangeExpr, LoadError> {
    let mut chunks = Vec::new();
    for chunk in body.split(',') {
        chunks.push(parse_chunk(chunk.trim(), rule)?);
    }
    Ok(RangeExpr { chunks })
}

/// Parse one chunk: a bare index, or `low-high` with either bound omitted.
fn parse_chunk(chunk: &str, rule: &str) -> Result<RangeChunk, LoadError> {
    if let Some((low, high)) = chunk.split_once('-') {
        let low = parse_bound(low, chunk, rule)?;
        let high = parse_bound(high, chunk, rule)?;
        if let (Some(low), Some(high)) = (low, high) {
            if low > high {
                return Err(LoadError::DescendingRange {
                    chunk: chunk.to_string(),
                    rule: rule.to_string(),
                });
            }
        }
        Ok(RangeChunk::Span { low, high })
    } else {
        Ok(RangeChunk::Index(parse_index(chunk, chunk, rule)?))
    }
}

/// Parse an optional span bound.
fn parse_bound(text: &str, chunk: &str, rule: &str) -> Result<Option<u8>, LoadError> {
    if text.is_empty() {
        Ok(None)
    } else {
        parse_index(text, chunk, rule).map(Some)
    }
}

/// Parse a tooth index, restricted to 1..=26 so the primary-dentition letter
/// mapping (1 -> A .. 26 -> Z) is always defined.
fn parse_index(text: &str, chunk: &str, rule: &str) -> Result<u8, LoadError> {
    let index: u64 = text.parse().map_err(|_| LoadError::InvalidChunk {
        chunk: chunk.to_string(),
        rule: rule.to_string(),
    })?;
    if !(1..=26).contains(&index) {
        return Err(LoadError::IndexOutOfRange {
            index,
            rule: rule.to_string(),
        });
    }
    Ok(index as u8)
}
