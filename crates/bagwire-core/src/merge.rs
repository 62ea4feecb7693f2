//! Lexicographic Merge of Atom Sequences
//!
//! When two branches of a request join, their baggage payloads are combined
//! by merging the two atom sequences under unsigned lexicographic order,
//! emitting atoms that appear in both exactly once. Because embedded
//! integers are lex-varint encoded, this byte-level merge respects their
//! numeric order without decoding anything.
//!
//! Both inputs are expected to be sorted the way the protocol produces them;
//! the merge is a single linear pass.

use std::cmp::Ordering;

use crate::atom::Atom;

/// Unsigned lexicographic comparison of raw byte spans.
///
/// `&[u8]`'s `Ord` is exactly this; the named function documents that the
/// protocol's canonical order is byte-wise and unsigned.
pub fn compare(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Merge two sorted atom sequences, dropping duplicates across the pair.
///
/// Atoms equal in both inputs appear once in the output; order is preserved.
pub fn merge(a: Vec<Atom>, b: Vec<Atom>) -> Vec<Atom> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    let mut next_a = a.next();
    let mut next_b = b.next();

    loop {
        match (next_a, next_b) {
            (Some(x), Some(y)) => match compare(x.as_ref(), y.as_ref()) {
                Ordering::Less => {
                    out.push(x);
                    next_a = a.next();
                    next_b = Some(y);
                }
                Ordering::Greater => {
                    out.push(y);
                    next_a = Some(x);
                    next_b = b.next();
                }
                Ordering::Equal => {
                    out.push(x);
                    next_a = a.next();
                    next_b = b.next();
                }
            },
            (Some(x), None) => {
                out.push(x);
                out.extend(a);
                return out;
            }
            (None, Some(y)) => {
                out.push(y);
                out.extend(b);
                return out;
            }
            (None, None) => return out,
        }
    }
}
