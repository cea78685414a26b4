//! Foundation types for the LPC toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`] - Lightweight file identifiers
//! - [`TextRange`], [`TextSize`] - Source positions
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`TokenPos`], [`SourceSpan`] - Parser-style token coordinates
//! - [`TokenIndex`] - Offset to token-stream index lookup
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod span;
mod token_index;

pub use file_id::FileId;
pub use span::{LineCol, LineIndex, SourceSpan, TextRange, TextSize, TokenPos};
pub use token_index::TokenIndex;

// Re-export text-size types for convenience
pub use text_size;
