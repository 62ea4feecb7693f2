//! Atoms and Atom Sequence Framing
//!
//! An [`Atom`] is an immutable, opaque span of bytes, the unit of the wire
//! protocol. A baggage payload is an ordered `Vec<Atom>`; this module turns
//! that sequence into one contiguous buffer and back.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────────────────────┬─────────────┐
//! │ Length (unsigned lex-varint) │ Atom bytes  │  × N
//! └──────────────────────────┴─────────────┘
//! ```
//!
//! Each atom is framed by its own inline length prefix, so boundaries are
//! self-describing on a forward scan: no length table, no sequence header.
//! The empty sequence serializes to a zero-length buffer.
//!
//! ## Zero-Copy
//!
//! Atoms wrap [`Bytes`], so deserialization slices the input buffer without
//! copying; atoms share the backing allocation and stay valid independently
//! of the sequence they came from. Callers needing an owned copy use
//! [`Atom::copy_from_slice`].
//!
//! ## Failure Policy
//!
//! A buffer that ends mid-atom is a decode error carrying the offset and
//! remaining length, never a silently shortened sequence. (Degrading
//! gracefully on *type* mismatches is the adapter layer's job; malformed
//! bytes are always surfaced.)

use bytes::{Bytes, BytesMut};

use crate::error::{Error, Result};
use crate::prefix::{classify, AtomPrefix};
use crate::varint;

/// A single self-describing binary record: an opaque, immutable byte span.
///
/// Cheap to clone (refcounted). Ordering and equality are unsigned
/// lexicographic over the raw bytes, which is what the merge layer relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(Bytes);

impl Atom {
    pub fn new(bytes: Bytes) -> Atom {
        Atom(bytes)
    }

    /// Build an atom that owns a copy of `data`.
    pub fn copy_from_slice(data: &[u8]) -> Atom {
        Atom(Bytes::copy_from_slice(data))
    }

    pub fn bytes(&self) -> &Bytes {
        &self.0
    }

    pub fn into_bytes(self) -> Bytes {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The raw prefix byte, or `None` for the zero-length (overflow marker)
    /// atom, which has no prefix.
    pub fn prefix_byte(&self) -> Option<u8> {
        self.0.first().copied()
    }

    /// Decode the prefix fields of this atom's first byte.
    pub fn prefix(&self) -> Option<AtomPrefix> {
        self.prefix_byte().map(classify)
    }

    /// True iff this is the overflow marker, the unique zero-length atom.
    pub fn is_overflow_marker(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Atom {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Bytes> for Atom {
    fn from(bytes: Bytes) -> Atom {
        Atom(bytes)
    }
}

impl From<Vec<u8>> for Atom {
    fn from(bytes: Vec<u8>) -> Atom {
        Atom(Bytes::from(bytes))
    }
}

/// Exact number of bytes [`serialize`] will produce for `atoms`.
pub fn serialized_size(atoms: &[Atom]) -> usize {
    atoms
        .iter()
        .map(|atom| varint::encoded_length_u64(atom.len() as u64) + atom.len())
        .sum()
}

/// Flatten an atom sequence into one contiguous buffer.
///
/// Total: never fails. The empty sequence produces an empty buffer with no
/// header overhead.
pub fn serialize(atoms: &[Atom]) -> Bytes {
    if atoms.is_empty() {
        return Bytes::new();
    }
    let mut buf = BytesMut::with_capacity(serialized_size(atoms));
    for atom in atoms {
        varint::write_lex_u64(&mut buf, atom.len() as u64);
        buf.extend_from_slice(atom.as_ref());
    }
    buf.freeze()
}

/// Parse a buffer back into its atom sequence.
///
/// Atoms are zero-copy slices of `data`. A zero-length buffer yields the
/// empty sequence. Fails with [`Error::TruncatedAtom`] when the buffer ends
/// inside an atom's payload, or [`Error::BufferUnderrun`] when it ends
/// inside a length prefix.
pub fn deserialize(data: Bytes) -> Result<Vec<Atom>> {
    let mut atoms = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        let mut cursor = &data[pos..];
        let length = varint::read_lex_u64(&mut cursor)? as usize;
        pos = data.len() - cursor.len();

        let remaining = data.len() - pos;
        if length > remaining {
            return Err(Error::TruncatedAtom {
                offset: pos,
                length,
                remaining,
            });
        }
        atoms.push(Atom::new(data.slice(pos..pos + length)));
        pos += length;
    }
    Ok(atoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms_of(raw: &[&[u8]]) -> Vec<Atom> {
        raw.iter().map(|bytes| Atom::copy_from_slice(bytes)).collect()
    }

    #[test]
    fn test_serialize_empty_sequence() {
        assert_eq!(serialize(&[]).len(), 0);
        assert_eq!(serialized_size(&[]), 0);
    }

    #[test]
    fn test_deserialize_empty_buffer() {
        assert_eq!(deserialize(Bytes::new()).unwrap(), vec![]);
    }

    #[test]
    fn test_roundtrip_single_atom() {
        let atoms = atoms_of(&[b"hello"]);
        let buf = serialize(&atoms);
        assert_eq!(buf.len(), serialized_size(&atoms));
        assert_eq!(deserialize(buf).unwrap(), atoms);
    }

    #[test]
    fn test_roundtrip_several_atoms() {
        let atoms = atoms_of(&[b"a", b"", b"bb", b"\x00\x01\x02", b"longer atom payload"]);
        let buf = serialize(&atoms);
        assert_eq!(buf.len(), serialized_size(&atoms));
        assert_eq!(deserialize(buf).unwrap(), atoms);
    }

    #[test]
    fn test_roundtrip_zero_length_atoms_only() {
        // overflow markers are zero-length atoms; they must survive framing
        let atoms = vec![Atom::new(Bytes::new()), Atom::new(Bytes::new())];
        let buf = serialize(&atoms);
        assert_eq!(buf.as_ref(), &[0x00, 0x00]);
        assert_eq!(deserialize(buf).unwrap(), atoms);
    }

    #[test]
    fn test_roundtrip_atom_with_multibyte_length_prefix() {
        // 300 bytes pushes the length prefix to two bytes
        let big = vec![0xABu8; 300];
        let atoms = vec![Atom::from(big.clone()), Atom::copy_from_slice(b"x")];
        let buf = serialize(&atoms);
        assert_eq!(
            buf.len(),
            varint::encoded_length_u64(300) + 300 + 1 + 1
        );
        let decoded = deserialize(buf).unwrap();
        assert_eq!(decoded[0].as_ref(), big.as_slice());
        assert_eq!(decoded[1].as_ref(), b"x");
    }

    #[test]
    fn test_deserialize_is_zero_copy() {
        let atoms = atoms_of(&[b"payload"]);
        let buf = serialize(&atoms);
        let decoded = deserialize(buf.clone()).unwrap();
        // the decoded atom points into the serialized buffer
        let payload = &buf[buf.len() - 7..];
        assert_eq!(decoded[0].bytes().as_ptr(), payload.as_ptr());
    }

    #[test]
    fn test_truncated_payload_detected() {
        let atoms = atoms_of(&[b"hello world"]);
        let buf = serialize(&atoms);
        // cut inside the payload
        let cut = buf.slice(..buf.len() - 3);
        assert_eq!(
            deserialize(cut),
            Err(Error::TruncatedAtom {
                offset: 1,
                length: 11,
                remaining: 8,
            })
        );
    }

    #[test]
    fn test_every_mid_atom_cut_fails() {
        let atoms = atoms_of(&[b"first", b"second atom", b""]);
        let buf = serialize(&atoms);

        // offsets that land exactly between atoms decode to a valid shorter
        // sequence; every other cut must fail
        let mut boundaries = vec![0];
        let mut pos = 0;
        for atom in &atoms {
            pos += varint::encoded_length_u64(atom.len() as u64) + atom.len();
            boundaries.push(pos);
        }

        for cut in 0..buf.len() {
            let result = deserialize(buf.slice(..cut));
            if boundaries.contains(&cut) {
                let decoded = result.unwrap();
                assert!(decoded.len() < atoms.len());
                assert_eq!(decoded.as_slice(), &atoms[..decoded.len()]);
            } else {
                assert!(result.is_err(), "cut at {} did not fail", cut);
            }
        }
    }

    #[test]
    fn test_cut_inside_length_prefix() {
        // a 300-byte atom has a two-byte length prefix; cutting between its
        // bytes is an underrun, not a truncated payload
        let atoms = vec![Atom::from(vec![0u8; 300])];
        let buf = serialize(&atoms);
        assert!(matches!(
            deserialize(buf.slice(..1)),
            Err(Error::BufferUnderrun { .. })
        ));
    }

    #[test]
    fn test_truncation_error_reports_position() {
        let atoms = atoms_of(&[b"abc", b"defgh"]);
        let buf = serialize(&atoms);
        // keep "abc" whole, cut two bytes into "defgh"
        let cut = buf.slice(..4 + 1 + 2);
        match deserialize(cut) {
            Err(Error::TruncatedAtom {
                offset,
                length,
                remaining,
            }) => {
                assert_eq!(offset, 5);
                assert_eq!(length, 5);
                assert_eq!(remaining, 2);
            }
            other => panic!("expected TruncatedAtom, got {:?}", other),
        }
    }

    #[test]
    fn test_atom_accessors() {
        let atom = Atom::copy_from_slice(&[0x47, 1, 2]);
        assert_eq!(atom.len(), 3);
        assert!(!atom.is_empty());
        assert_eq!(atom.prefix_byte(), Some(0x47));
        let prefix = atom.prefix().unwrap();
        assert_eq!(prefix.atom_type, crate::prefix::AtomType::BagOpen);

        let empty = Atom::new(Bytes::new());
        assert!(empty.is_empty());
        assert_eq!(empty.prefix_byte(), None);
        assert!(empty.prefix().is_none());
    }

    #[test]
    fn test_atom_ordering_is_lexicographic() {
        let mut atoms = atoms_of(&[b"b", b"", b"aa", b"a", b"ab\xff"]);
        atoms.sort();
        let sorted: Vec<&[u8]> = atoms.iter().map(|a| a.as_ref()).collect();
        assert_eq!(
            sorted,
            vec![
                b"".as_slice(),
                b"a".as_slice(),
                b"aa".as_slice(),
                b"ab\xff".as_slice(),
                b"b".as_slice()
            ]
        );
    }
}
