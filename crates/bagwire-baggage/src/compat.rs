//! Compatibility Shims for Type-Erased Baggage
//!
//! Instrumentation code often holds a `&dyn Baggage` without knowing which
//! concrete layer produced it. These shims recover the concrete type, and
//! report a mismatch as a value rather than an error the request must absorb:
//! the strict variants return `Result<_, TypeMismatch>` so the caller decides
//! what to do; the `lossy` variants make the common choice of warning and
//! dropping the baggage while the request stays alive.

use tracing::warn;

use bagwire_core::atom::Atom;

use crate::layer::{Baggage, BaggageLayer};

/// A baggage handle was not an instance of the active layer's type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("incompatible baggage: expected {expected}, got {actual}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub actual: &'static str,
}

/// Downcast `baggage` to the layer's concrete type.
pub fn downcast<'a, L>(
    _layer: &L,
    baggage: &'a dyn Baggage,
) -> Result<&'a L::B, TypeMismatch>
where
    L: BaggageLayer,
{
    baggage
        .as_any()
        .downcast_ref::<L::B>()
        .ok_or_else(|| TypeMismatch {
            expected: std::any::type_name::<L::B>(),
            actual: baggage.type_name(),
        })
}

/// Atom sequence of a type-erased baggage handle.
pub fn atoms_of<L>(layer: &L, baggage: &dyn Baggage) -> Result<Vec<Atom>, TypeMismatch>
where
    L: BaggageLayer,
{
    Ok(layer.atoms(downcast(layer, baggage)?))
}

/// Like [`atoms_of`], but degrades: warns and returns `None` on mismatch.
/// Baggage is advisory; its loss never fails the carrying request.
pub fn atoms_of_lossy<L>(layer: &L, baggage: &dyn Baggage) -> Option<Vec<Atom>>
where
    L: BaggageLayer,
{
    match atoms_of(layer, baggage) {
        Ok(atoms) => Some(atoms),
        Err(mismatch) => {
            warn!(
                expected = mismatch.expected,
                actual = mismatch.actual,
                "dropping incompatible baggage"
            );
            None
        }
    }
}
