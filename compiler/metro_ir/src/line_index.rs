//! Byte offset to line/column conversion.
//!
//! The lexer stamps every token with both a byte span and a line/column span.
//! Building the table once per source keeps that O(log L) per token instead
//! of rescanning from the start of the file.

use crate::{LinePosition, LinePositionSpan, Span};

/// Byte offsets of every line start in a source text.
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[0] == 0`; `offsets[n]` is the byte after the n-th `\n`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            source
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .filter_map(|(i, _)| u32::try_from(i + 1).ok()),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let index = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(index).map_or(u32::MAX, |i| i + 1)
    }

    pub fn position(&self, source: &str, offset: u32) -> LinePosition {
        let line = self.line_from_offset(offset);
        let line_start = self
            .offsets
            .get((line - 1) as usize)
            .copied()
            .unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len());
        let chars = source.get(line_start..end).map_or(0, |s| s.chars().count());
        LinePosition::new(line, u32::try_from(chars).map_or(u32::MAX, |c| c + 1))
    }

    pub fn span_position(&self, source: &str, span: Span) -> LinePositionSpan {
        LinePositionSpan::new(
            self.position(source, span.start),
            self.position(source, span.end),
        )
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_offset() {
        let table = LineOffsetTable::build("line1\nline2\nline3");
        assert_eq!(table.line_count(), 3);
        assert_eq!(table.line_from_offset(0), 1);
        assert_eq!(table.line_from_offset(5), 1);
        assert_eq!(table.line_from_offset(6), 2);
        assert_eq!(table.line_from_offset(12), 3);
    }

    #[test]
    fn test_position() {
        let source = "abc\ndefgh\nij";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.position(source, 0), LinePosition::new(1, 1));
        assert_eq!(table.position(source, 7), LinePosition::new(2, 4));
        assert_eq!(table.position(source, 10), LinePosition::new(3, 1));
    }

    #[test]
    fn test_position_counts_characters() {
        let source = "αβγ\nδε";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.position(source, 4), LinePosition::new(1, 3));
        assert_eq!(table.position(source, 7), LinePosition::new(2, 1));
    }

    #[test]
    fn test_empty_source() {
        let table = LineOffsetTable::build("");
        assert_eq!(table.position("", 0), LinePosition::START);
        assert_eq!(
            table.span_position("", Span::point(0)),
            LinePositionSpan::new(LinePosition::START, LinePosition::START)
        );
    }
}
