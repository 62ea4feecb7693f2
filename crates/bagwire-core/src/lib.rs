//! Atom-Layer Wire Protocol
//!
//! This crate implements the binary wire format for propagating "baggage",
//! cross-cutting causal metadata carried alongside a request through a
//! distributed call graph. It is independent of any tracing system, RPC
//! framework, or application payload.
//!
//! ## The Atom Model
//!
//! The unit of transport is the **atom**: an immutable, opaque span of bytes.
//! A baggage payload is an ordered sequence of atoms; the order encodes
//! nesting and sibling relationships in the higher-level baggage model. The
//! empty sequence is valid and means "no metadata".
//!
//! ## Layers
//!
//! - [`varint`] — signed and unsigned variable-length integer codecs whose
//!   byte-wise lexicographic order matches numeric order. This property lets
//!   sorted storage and comparison of *encoded* values match numeric
//!   comparison without decoding.
//! - [`prefix`] — the bit-packed header byte that tags each atom with its
//!   structural role (header / bag-open / bag-close / data), nesting level,
//!   header sub-type, and per-bag option flags.
//! - [`atom`] — the atom sequence and its framing: bulk serialize/deserialize
//!   of an atom list to/from one contiguous buffer.
//! - [`overflow`] — lossy degradation: when baggage grows past a size budget
//!   it is truncated at an atom boundary and marked, never failed.
//! - [`merge`] — lexicographic set-union of two atom sequences, used when two
//!   branches of a request join.
//!
//! ## Why Order Preservation Matters
//!
//! Baggage atoms from different branches of a request are merged by
//! lexicographic comparison of their raw bytes. Encoding embedded integers
//! (levels, indices, identifiers) so that byte order equals numeric order
//! means the merge never has to understand atom contents.
//!
//! ## Concurrency
//!
//! Everything here is pure and synchronous: no shared state, no I/O, no
//! blocking. Any function may be called concurrently on independent buffers.
//! Decoding is bounded work (at most 9 bytes per varint, one pass per
//! buffer).

pub mod atom;
pub mod error;
pub mod merge;
pub mod overflow;
pub mod prefix;
pub mod varint;

pub use atom::{deserialize, serialize, serialized_size, Atom};
pub use error::{Error, Result};
