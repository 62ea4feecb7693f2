//! Typed Baggage over the Atom Layer
//!
//! The atom layer (`bagwire-core`) deals in opaque byte records. This crate
//! is the adapter between those atom sequences and strongly-typed in-memory
//! baggage representations.
//!
//! ## Design
//!
//! - A [`BaggageLayer`] converts between `Vec<Atom>` and its concrete
//!   baggage type. The active layer is an explicit value passed by the
//!   caller; there is no runtime registry or name-based lookup.
//! - [`RawBaggage`] is the untyped pass-through implementation: the atom
//!   sequence carried verbatim, still mergeable and serializable.
//! - The [`compat`] shims bridge from type-erased `dyn Baggage` handles back
//!   to a concrete layer. A mismatch is a [`compat::TypeMismatch`] value,
//!   not a panic and not a decode error: baggage is advisory metadata, and
//!   losing it must never fail the request carrying it. The `lossy` variants
//!   log a warning and degrade to `None`.
//!
//! ## Failure Policy Split
//!
//! Malformed *bytes* (from `bagwire-core`) always propagate as hard errors;
//! they mean corruption or a protocol bug. Mismatched *types* are recovered
//! locally. Keeping those two failure modes apart is the point of this
//! crate's API shape.

pub mod compat;
pub mod layer;
pub mod raw;

pub use compat::TypeMismatch;
pub use layer::{deserialize_baggage, serialize_baggage, Baggage, BaggageLayer};
pub use raw::{RawBaggage, RawBaggageLayer};
