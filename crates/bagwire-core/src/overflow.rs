//! Lossy Degradation: Truncation and Overflow Marking
//!
//! Baggage rides on every request, so it must never grow without bound. When
//! a payload exceeds its size budget the atom layer drops atoms from the end
//! (whole atoms only, never mid-atom) and appends the **overflow marker**,
//! the unique zero-length atom. Receivers that see the marker know the
//! payload is a truncated prefix of the original.
//!
//! The marker is zero-length by design: it sorts before every non-empty atom,
//! so after a lexicographic merge it remains the first atom at its position
//! and survives further merges.

use bytes::Bytes;

use crate::atom::{serialized_size, Atom};
use crate::varint;

/// The overflow marker: the unique zero-length atom.
pub fn overflow_marker() -> Atom {
    Atom::new(Bytes::new())
}

/// True iff `atom` is the overflow marker.
pub fn is_overflow_marker(atom: &Atom) -> bool {
    atom.is_overflow_marker()
}

/// True iff `atoms` records an overflow anywhere.
pub fn has_overflowed(atoms: &[Atom]) -> bool {
    atoms.iter().any(is_overflow_marker)
}

/// Truncate `atoms` so its serialized form fits in `limit` bytes.
///
/// Returns the input unchanged when it already fits. Otherwise keeps the
/// longest prefix of whole atoms that leaves room for the overflow marker's
/// one-byte frame, and appends the marker. A limit smaller than the marker
/// frame itself yields just the marker.
pub fn trim_to_size(atoms: Vec<Atom>, limit: usize) -> Vec<Atom> {
    if serialized_size(&atoms) <= limit {
        return atoms;
    }

    let budget = limit.saturating_sub(1);
    let mut kept = Vec::new();
    let mut size = 0;
    for atom in atoms {
        let framed = varint::encoded_length_u64(atom.len() as u64) + atom.len();
        if size + framed > budget {
            break;
        }
        size += framed;
        kept.push(atom);
    }
    // a marker that ends up trailing is subsumed by the one we append
    while kept.last().map_or(false, is_overflow_marker) {
        kept.pop();
    }
    kept.push(overflow_marker());
    kept
}
