//! Primitive type resolution.
//!
//! Maps the spelling of a primitive type keyword, with an optional trailing
//! array marker, to a [`ScriptType`]. Only `int`, `string` and `float` have a
//! concrete kind. Every other spelling (`object`, `mixed`, `mapping`,
//! `buffer`, ...) resolves to [`PrimitiveKind::Unresolved`] carrying the
//! spelling, so consumers can still display it.

use std::fmt;

use smol_str::SmolStr;

/// Marks an array type when it trails the keyword (`int *`).
pub const ARRAY_MARKER: char = '*';

/// Element kind of a primitive type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Int,
    String,
    Float,
    /// A spelling with no concrete kind, kept as written.
    Unresolved(SmolStr),
}

impl PrimitiveKind {
    pub fn from_spelling(spelling: &str) -> Self {
        match spelling {
            "int" => PrimitiveKind::Int,
            "string" => PrimitiveKind::String,
            "float" => PrimitiveKind::Float,
            other => PrimitiveKind::Unresolved(SmolStr::new(other)),
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, PrimitiveKind::Unresolved(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            PrimitiveKind::Int => "int",
            PrimitiveKind::String => "string",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Unresolved(spelling) => spelling,
        }
    }
}

/// Resolved type of a variable or parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScriptType {
    Primitive(PrimitiveKind),
    Array(PrimitiveKind),
}

impl ScriptType {
    /// Type of a parameter declared without a type keyword.
    pub fn untyped() -> Self {
        ScriptType::Primitive(PrimitiveKind::Unresolved(SmolStr::default()))
    }

    pub fn element(&self) -> &PrimitiveKind {
        match self {
            ScriptType::Primitive(kind) | ScriptType::Array(kind) => kind,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ScriptType::Array(_))
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptType::Primitive(kind) => f.write_str(kind.as_str()),
            ScriptType::Array(kind) => write!(f, "{} {}", kind.as_str(), ARRAY_MARKER),
        }
    }
}

/// Resolve a primitive type spelling such as `int`, `string *` or `mapping*`.
///
/// The array marker is stripped before the kind lookup.
pub fn resolve_primitive_type(spelling: &str) -> ScriptType {
    let spelling = spelling.trim();
    match spelling.strip_suffix(ARRAY_MARKER) {
        Some(base) => ScriptType::Array(PrimitiveKind::from_spelling(base.trim_end())),
        None => ScriptType::Primitive(PrimitiveKind::from_spelling(spelling)),
    }
}
