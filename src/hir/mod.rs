//! Semantic layer: symbols and scopes built from one file's syntax tree.
//!
//! [`build_symbols`] walks a [`Parse`](crate::syntax::Parse) once and returns
//! a [`FileSymbols`]: the file's [`SymbolTable`], its ordered [`Imports`], and
//! counters from the walk. Tables are immutable once built and are read by
//! the [`ide`](crate::ide) functions.

mod builder;
mod errors;
mod folding;
mod ids;
mod imports;
mod symbols;
mod table;
mod types;

pub use builder::{BuildStats, FileSymbols, SymbolBuilder, build_all, build_symbols};
pub use errors::BuildError;
pub use folding::FoldingRange;
pub use ids::SymbolId;
pub use imports::{ImportEntry, ImportKind, Imports};
pub use symbols::{BranchKind, IfBranches, ReferenceKind, Symbol, SymbolData, SymbolKind};
pub use table::SymbolTable;
pub use types::{ARRAY_MARKER, PrimitiveKind, ScriptType, resolve_primitive_type};
