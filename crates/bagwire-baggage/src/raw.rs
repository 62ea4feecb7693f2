//! Raw (Untyped) Baggage
//!
//! The pass-through representation: the atom sequence exactly as received.
//! Useful for services that forward baggage without interpreting it; they
//! still participate in merging and truncation without understanding any
//! schema.

use std::any::Any;

use bagwire_core::atom::Atom;
use bagwire_core::{merge, overflow};

use crate::layer::{Baggage, BaggageLayer};

/// Baggage carried as its verbatim atom sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawBaggage {
    atoms: Vec<Atom>,
}

impl RawBaggage {
    pub fn new(atoms: Vec<Atom>) -> RawBaggage {
        RawBaggage { atoms }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn into_atoms(self) -> Vec<Atom> {
        self.atoms
    }

    /// Join this baggage with another branch of the same request.
    pub fn merge_with(self, other: RawBaggage) -> RawBaggage {
        RawBaggage::new(merge::merge(self.atoms, other.atoms))
    }

    /// Enforce a serialized-size budget, marking overflow if anything drops.
    pub fn trim_to_size(self, limit: usize) -> RawBaggage {
        RawBaggage::new(overflow::trim_to_size(self.atoms, limit))
    }

    pub fn has_overflowed(&self) -> bool {
        overflow::has_overflowed(&self.atoms)
    }
}

impl Baggage for RawBaggage {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<RawBaggage>()
    }
}

/// Layer for [`RawBaggage`]: wrap and unwrap are identity on the atoms.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawBaggageLayer;

impl BaggageLayer for RawBaggageLayer {
    type B = RawBaggage;

    fn wrap(&self, atoms: Vec<Atom>) -> Option<RawBaggage> {
        if atoms.is_empty() {
            None
        } else {
            Some(RawBaggage::new(atoms))
        }
    }

    fn atoms(&self, baggage: &RawBaggage) -> Vec<Atom> {
        baggage.atoms.clone()
    }
}
