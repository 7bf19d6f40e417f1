use std::ops::{Add, Range};

/// A span of bytes inside a single query string
#[derive(Debug, Eq, PartialEq, Hash, Clone, Copy, Default)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    pub const EMPTY: Span = Span { start: 0, len: 0 };

    /// Creates a new `Span` from the starting byte and its length
    pub fn new(start: usize, len: usize) -> Self {
        Span { start, len }
    }

    /// Returns the start of this span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end of this span
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Returns the length of this span
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns, whether this span is empty
    ///
    /// Thanks, clippy.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Constructs a new span which ranges from the start of this span to the end of the other span
    pub fn until(&self, other: Span) -> Self {
        if self.start > other.end() {
            panic!("Span length must not be negative");
        }
        Span::new(self.start, other.end() - self.start)
    }

    /// Returns a tuple of the format (start_index, end_index)
    pub fn as_tuple(&self) -> (usize, usize) {
        (self.start, self.end())
    }

    /// Returns the byte range of this span, to be used for slicing the source
    pub fn as_slice(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Returns the text covered by this span, or an empty string if the span
    /// lies outside of `source`
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.as_slice()).unwrap_or_default()
    }

    /// Converts this byte span into character bounds, which is what
    /// `annotate_snippets` expects
    pub fn char_bounds(&self, source: &str) -> (usize, usize) {
        let start = source
            .get(..self.start)
            .map_or(self.start, |prefix| prefix.chars().count());
        let len = source
            .get(self.as_slice())
            .map_or(self.len, |inner| inner.chars().count());
        (start, start + len)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end.saturating_sub(range.start))
    }
}

impl Add<Span> for usize {
    type Output = Span;

    fn add(self, rhs: Span) -> Self::Output {
        Span::new(self + rhs.start, rhs.len)
    }
}
