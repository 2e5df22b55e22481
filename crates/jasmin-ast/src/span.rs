// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Source positions attached to program nodes by the parser.

use std::fmt;

/// Byte range of a node in the assembler source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Line index over a source file, used to turn spans into `line:col`.
#[derive(Debug, Clone)]
pub struct LineMap {
    /// Offset of the first byte of every line; always starts with 0.
    starts: Vec<usize>,
}

impl LineMap {
    pub fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        LineMap { starts }
    }

    /// 1-based `(line, col)` of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let idx = self.starts.partition_point(|&s| s <= offset).saturating_sub(1);
        (idx + 1, offset - self.starts[idx] + 1)
    }

    /// Text of a 1-based line, without its newline.
    pub fn line<'a>(&self, source: &'a str, line: usize) -> Option<&'a str> {
        let idx = line.checked_sub(1)?;
        let start = *self.starts.get(idx)?;
        let end = match self.starts.get(idx + 1) {
            Some(&next) => next - 1,
            None => source.len(),
        };
        source.get(start..end)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_display_and_len() {
        let span = Span::new(4, 9);
        assert_eq!(span.to_string(), "4..9");
        assert_eq!(span.len(), 5);
        assert!(Span::default().is_empty());
    }

    #[test]
    fn line_col_across_lines() {
        let src = ".class Foo\n  ldc 1\nreturn";
        let map = LineMap::new(src);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_col(0), (1, 1));
        assert_eq!(map.line_col(10), (1, 11)); // the newline itself
        assert_eq!(map.line_col(13), (2, 3));
        assert_eq!(map.line_col(19), (3, 1));
        assert_eq!(map.line(src, 2), Some("  ldc 1"));
        assert_eq!(map.line(src, 3), Some("return"));
        assert_eq!(map.line(src, 0), None);
        assert_eq!(map.line(src, 4), None);
    }

    #[test]
    fn trailing_newline_adds_empty_line() {
        let src = "nop\n";
        let map = LineMap::new(src);
        assert_eq!(map.line_count(), 2);
        assert_eq!(map.line(src, 2), Some(""));
    }
}
