//! Dialect predicates resolved by the parser.

use std::fmt;

/// The two dialect predicates the parser evaluates while building a tree.
///
/// LPC has two historically divergent syntaxes, LDMud and FluffOS. The parser
/// resolves which one applies and shapes the tree accordingly; everything
/// downstream reacts to tree shape alone. The flags travel with the
/// [`Parse`](super::Parse) so consumers can report them, nothing in this
/// crate branches on them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DialectPredicates {
    pub ldmud: bool,
    pub fluffos: bool,
}

impl DialectPredicates {
    pub const LDMUD: Self = Self {
        ldmud: true,
        fluffos: false,
    };

    pub const FLUFFOS: Self = Self {
        ldmud: false,
        fluffos: true,
    };

    /// Display name of the resolved dialect.
    pub fn name(&self) -> &'static str {
        match (self.ldmud, self.fluffos) {
            (true, false) => "LDMud",
            (false, true) => "FluffOS",
            (true, true) => "mixed",
            (false, false) => "unspecified",
        }
    }
}

impl fmt::Display for DialectPredicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
