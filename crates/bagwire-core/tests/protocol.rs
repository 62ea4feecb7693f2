//! End-to-end wire protocol tests: atoms built from real prefix bytes and
//! varint payloads, framed, degraded, merged, and parsed back.

use bytes::BytesMut;

use bagwire_core::atom::{deserialize, serialize, Atom};
use bagwire_core::overflow::{is_overflow_marker, trim_to_size};
use bagwire_core::prefix::{AtomType, BagOptions, HeaderType, Level};
use bagwire_core::{merge, varint};

/// A header atom naming an indexed field at `level`, index as lex-varint.
fn header_atom(level: u8, index: i32) -> Atom {
    let mut buf = BytesMut::new();
    buf.extend_from_slice(&[AtomType::Header.byte_value()
        | Level::new(level).unwrap().byte_value()
        | HeaderType::Indexed.byte_value()]);
    varint::write_lex_i32(&mut buf, index);
    Atom::new(buf.freeze())
}

fn data_atom(payload: &[u8]) -> Atom {
    let mut buf = BytesMut::new();
    buf.extend_from_slice(&[AtomType::Data.byte_value()]);
    buf.extend_from_slice(payload);
    Atom::new(buf.freeze())
}

fn bag_open_atom(level: u8, options: BagOptions) -> Atom {
    Atom::from(vec![AtomType::BagOpen.byte_value()
        | Level::new(level).unwrap().byte_value()
        | options.byte_value()])
}

#[test]
fn full_payload_roundtrip() {
    let atoms = vec![
        bag_open_atom(0, BagOptions::default()),
        header_atom(0, 1),
        data_atom(b"trace-id-bytes"),
        header_atom(1, 2),
        data_atom(b""),
        Atom::from(vec![AtomType::BagClose.byte_value()]),
    ];

    let wire = serialize(&atoms);
    let parsed = deserialize(wire).unwrap();
    assert_eq!(parsed, atoms);

    // structural classification survives the trip
    let first = parsed[0].prefix().unwrap();
    assert_eq!(first.atom_type, AtomType::BagOpen);
    assert_eq!(first.level.value(), 0);
    assert_eq!(parsed[2].prefix().unwrap().atom_type, AtomType::Data);
}

#[test]
fn header_atoms_sort_by_field_index() {
    // lex-varint indices make raw-byte comparison match numeric order,
    // including across encoded-length changes
    let indices = [-100, -1, 0, 1, 63, 64, 1000, 100_000];
    let encoded: Vec<Atom> = indices.iter().map(|&i| header_atom(3, i)).collect();
    let mut sorted = encoded.clone();
    sorted.sort();
    assert_eq!(sorted, encoded);
}

#[test]
fn joined_branches_share_common_atoms() {
    let common = vec![bag_open_atom(0, BagOptions::default()), header_atom(0, 1)];
    let mut left = common.clone();
    left.push(data_atom(b"left-event"));
    let mut right = common.clone();
    right.push(data_atom(b"right-event"));
    left.sort();
    right.sort();

    let joined = merge::merge(left, right);
    assert_eq!(joined.len(), common.len() + 2);
}

#[test]
fn oversized_payload_degrades_and_still_parses() {
    let atoms: Vec<Atom> = (0..50).map(|i| data_atom(&[i; 40])).collect();
    let full_size = serialize(&atoms).len();

    let trimmed = trim_to_size(atoms, full_size / 2);
    assert!(is_overflow_marker(trimmed.last().unwrap()));

    let wire = serialize(&trimmed);
    assert!(wire.len() <= full_size / 2);
    let parsed = deserialize(wire).unwrap();
    assert_eq!(parsed, trimmed);
}

#[test]
fn overflowed_bag_flag_survives_the_wire() {
    let options = BagOptions {
        overflowed: true,
        merge_children: false,
    };
    let atoms = vec![bag_open_atom(2, options)];
    let parsed = deserialize(serialize(&atoms)).unwrap();
    let prefix = parsed[0].prefix().unwrap();
    assert!(prefix.bag_options.overflowed);
    assert!(!prefix.bag_options.merge_children);
    assert_eq!(prefix.level.value(), 2);
}
