//! Token-stream indices for syntax trees.

use text_size::TextSize;

/// Maps the start offset of a token to its position in the token stream.
///
/// Built once per tree from the start offsets of every token, trivia
/// included, in source order. Lookups are a binary search, the same way
/// [`LineIndex`](super::LineIndex) resolves lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenIndex {
    starts: Vec<TextSize>,
}

impl TokenIndex {
    /// Build from token start offsets, which must be in ascending order.
    pub fn from_starts(starts: impl IntoIterator<Item = TextSize>) -> Self {
        let starts: Vec<TextSize> = starts.into_iter().collect();
        debug_assert!(starts.windows(2).all(|w| w[0] <= w[1]));
        Self { starts }
    }

    /// Index of the first token starting at or after `offset`.
    pub fn index_of(&self, offset: TextSize) -> u32 {
        self.starts.partition_point(|&start| start < offset) as u32
    }

    /// Total number of tokens.
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}
