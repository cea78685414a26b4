//! Source text positions and ranges.

use std::fmt;

// Re-export from text-size for compatibility
pub use text_size::TextRange;
pub use text_size::TextSize;

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes, not characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Get 1-indexed line number (for display and parser coordinates).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col + 1)
    }
}

/// Index for converting between byte offsets and line/column positions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of each line
    line_starts: Vec<TextSize>,
    text_len: TextSize,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self {
            line_starts,
            text_len: TextSize::of(text),
        }
    }

    /// Convert a byte offset to a line/column position.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        let line_start = self.line_starts.get(line).copied().unwrap_or_default();
        let col = offset.checked_sub(line_start).unwrap_or_default();

        LineCol {
            line: line as u32,
            col: col.into(),
        }
    }

    /// Convert a line/column position to a byte offset.
    ///
    /// Returns `None` for a line past the end of the text or a column past
    /// the end of its line. The column of a line's newline is still valid.
    pub fn offset(&self, line_col: LineCol) -> Option<TextSize> {
        let line = line_col.line as usize;
        let line_start = *self.line_starts.get(line)?;
        let line_end = match self.line_starts.get(line + 1) {
            Some(&next) => next - TextSize::of('\n'),
            None => self.text_len,
        };
        let offset = line_start.checked_add(TextSize::from(line_col.col))?;
        (offset <= line_end).then_some(offset)
    }

    /// Get the number of lines.
    pub fn len(&self) -> usize {
        self.line_starts.len()
    }

    /// Check if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.line_starts.is_empty()
    }
}

/// Position of a token as the parser reports it.
///
/// Lines are 1-based, columns 0-based, and `index` is the token's position in
/// the full token stream (trivia included). The index is stable for a fixed
/// input, which makes it usable for disambiguating labels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenPos {
    /// 1-indexed line number
    pub line: u32,
    /// 0-indexed column (in UTF-8 bytes)
    pub column: u32,
    /// Index into the token stream
    pub index: u32,
}

impl TokenPos {
    pub const fn new(line: u32, column: u32, index: u32) -> Self {
        Self { line, column, index }
    }
}

/// The first and last significant token of a syntax node.
///
/// `stop` is the position where the last token *starts*, not where it ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub start: TokenPos,
    pub stop: TokenPos,
}

impl SourceSpan {
    pub const fn new(start: TokenPos, stop: TokenPos) -> Self {
        Self { start, stop }
    }

    /// Whether `other` lies within this span, compared by token index.
    pub fn contains(&self, other: &SourceSpan) -> bool {
        self.start.index <= other.start.index && other.stop.index <= self.stop.index
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}..{}:{}",
            self.start.line, self.start.column, self.stop.line, self.stop.column
        )
    }
}
