//! Baggage and BaggageLayer Traits

use std::any::Any;
use std::fmt::Debug;

use bytes::Bytes;

use bagwire_core::atom::Atom;

/// An opaque baggage instance attached to a request.
///
/// Type-erased handles (`&dyn Baggage`) flow through instrumentation code
/// that does not know the concrete representation; the [`crate::compat`]
/// shims recover it.
pub trait Baggage: Any + Debug {
    fn as_any(&self) -> &dyn Any;

    /// Concrete type name, for diagnostics when a downcast fails.
    fn type_name(&self) -> &'static str;
}

/// Converts between atom sequences and one concrete baggage type.
///
/// Implementations are stateless values handed to callers explicitly at
/// construction time; which layer is active is a caller decision, never a
/// runtime lookup.
pub trait BaggageLayer {
    type B: Baggage;

    /// Build baggage from a received atom sequence.
    ///
    /// An empty sequence means "no baggage" and yields `None`.
    fn wrap(&self, atoms: Vec<Atom>) -> Option<Self::B>;

    /// The atom sequence representing `baggage`, ready for framing.
    fn atoms(&self, baggage: &Self::B) -> Vec<Atom>;
}

/// Serialize baggage for transport. Total: absent baggage is empty bytes.
pub fn serialize_baggage<L: BaggageLayer>(layer: &L, baggage: Option<&L::B>) -> Bytes {
    match baggage {
        Some(baggage) => bagwire_core::serialize(&layer.atoms(baggage)),
        None => Bytes::new(),
    }
}

/// Parse transported bytes back into baggage.
///
/// Decode errors from the atom layer propagate; an empty or all-consumed
/// buffer yields `None` via the layer's [`BaggageLayer::wrap`].
pub fn deserialize_baggage<L: BaggageLayer>(
    layer: &L,
    data: Bytes,
) -> bagwire_core::Result<Option<L::B>> {
    let atoms = bagwire_core::deserialize(data)?;
    Ok(layer.wrap(atoms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawBaggage, RawBaggageLayer};
    use bagwire_core::Error;

    fn sample_atoms() -> Vec<Atom> {
        vec![
            Atom::copy_from_slice(&[0x81, 1]),
            Atom::copy_from_slice(b"payload"),
        ]
    }

    #[test]
    fn test_serialize_absent_baggage_is_empty() {
        let layer = RawBaggageLayer;
        assert_eq!(serialize_baggage(&layer, None).len(), 0);
    }

    #[test]
    fn test_roundtrip_through_wire() {
        let layer = RawBaggageLayer;
        let baggage = RawBaggage::new(sample_atoms());
        let bytes = serialize_baggage(&layer, Some(&baggage));
        let back = deserialize_baggage(&layer, bytes).unwrap();
        assert_eq!(back, Some(baggage));
    }

    #[test]
    fn test_deserialize_empty_is_none() {
        let layer = RawBaggageLayer;
        assert_eq!(deserialize_baggage(&layer, Bytes::new()).unwrap(), None);
    }

    #[test]
    fn test_decode_errors_propagate() {
        let layer = RawBaggageLayer;
        // length prefix promises 9 bytes, none follow
        let corrupt = Bytes::from_static(&[0x09]);
        let result = deserialize_baggage(&layer, corrupt);
        assert!(matches!(result, Err(Error::TruncatedAtom { .. })));
    }
}
