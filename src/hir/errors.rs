//! Errors raised while turning one construct into symbols.
//!
//! These never reach the caller of [`build_symbols`](super::build_symbols).
//! The builder logs them, counts them in [`BuildStats`](super::BuildStats),
//! and keeps walking the construct's children.

use thiserror::Error;

use crate::syntax::SyntaxKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("{construct:?} is missing its {part}")]
    MissingPart {
        construct: SyntaxKind,
        part: &'static str,
    },

    #[error("{construct:?} has no significant tokens")]
    EmptySpan { construct: SyntaxKind },
}

impl BuildError {
    pub fn missing(construct: SyntaxKind, part: &'static str) -> Self {
        BuildError::MissingPart { construct, part }
    }

    /// The node kind the error was raised for.
    pub fn construct(&self) -> SyntaxKind {
        match self {
            BuildError::MissingPart { construct, .. } | BuildError::EmptySpan { construct } => {
                *construct
            }
        }
    }
}
