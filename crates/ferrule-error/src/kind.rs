//! Position of an error in the taxonomy.
//!
//! Kinds nest: every `System` error is also a `Domain` error, and every error is a
//! `Diagnostic`. Use [`Kind::is_a`] when deciding whether a handler applies.

use ferrule_common::bits;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Diagnostic,
    Domain,
    System,
}

impl Kind {
    /// True if an error of this kind may be handled as `other`.
    pub fn is_a(self, other: Kind) -> bool {
        self.lineage() & other.lineage() == other.lineage()
    }

    /// Number of refinements below `Diagnostic`.
    pub fn depth(self) -> u32 {
        bits::popcount(self.lineage()) - 1
    }

    /// One bit per kind this kind is a refinement of, itself included.
    fn lineage(self) -> u64 {
        match self {
            Kind::Diagnostic => 0b001,
            Kind::Domain => 0b011,
            Kind::System => 0b111,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Diagnostic => "diagnostic",
            Kind::Domain => "domain",
            Kind::System => "system",
        }
    }
}
