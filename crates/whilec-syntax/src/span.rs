//! Source location tracking for tree nodes.
//!
//! A [`Span`] is a pair of byte offsets into the file a node was parsed
//! from. The checker never interprets spans; it copies them into the
//! diagnostics it produces so an external renderer can point at the source.
//!
//! # Examples
//!
//! ```
//! use whilec_syntax::span::Span;
//!
//! let left = Span::new(0, 10);
//! let right = Span::new(15, 25);
//! let merged = Span::merge(left, right);
//!
//! assert_eq!(merged.start, 0);
//! assert_eq!(merged.end, 25);
//! ```

use std::fmt;

/// A half-open byte range `start..end` in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character (0-indexed)
    pub start: usize,

    /// Byte offset one past the last character
    pub end: usize,
}

impl Span {
    /// Creates a span from byte offsets.
    ///
    /// ```
    /// use whilec_syntax::span::Span;
    ///
    /// let span = Span::new(10, 20);
    /// assert_eq!(span.len(), 10);
    /// ```
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-length span at `offset`.
    #[must_use]
    pub const fn point(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Covers both spans, from the start of `left` to the end of `right`.
    #[must_use]
    pub const fn merge(left: Span, right: Span) -> Self {
        Self {
            start: left.start,
            end: right.end,
        }
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the span has zero length.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Implemented by nodes that may remember where they came from.
///
/// Trees built programmatically (tests, generated code) carry no spans, so
/// the accessor is optional.
pub trait Spanned {
    /// Source span of this item, if known.
    fn span(&self) -> Option<Span>;
}

impl Spanned for Span {
    fn span(&self) -> Option<Span> {
        Some(*self)
    }
}

impl<T: Spanned> Spanned for Box<T> {
    fn span(&self) -> Option<Span> {
        (**self).span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(10, 20);
        assert_eq!(span.start, 10);
        assert_eq!(span.end, 20);
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::merge(Span::new(0, 10), Span::new(15, 25));
        assert_eq!(merged, Span::new(0, 25));
    }

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(10, 20).len(), 10);
        assert!(Span::point(7).is_empty());
        assert!(!Span::new(7, 8).is_empty());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(3, 9).to_string(), "3..9");
    }
}
