//! Error Types for the Atom Layer
//!
//! ## Error Categories
//!
//! ### Decode Errors
//! - `BufferUnderrun`: a varint declared more bytes than the cursor holds
//! - `TruncatedAtom`: a buffer ends mid-atom during sequence deserialization
//!
//! ### Codec Defects
//! - `InvalidLength`: an internal fixed-width read was asked for a byte count
//!   outside `[1, 8]`. Unreachable on well-formed input; surfaced rather than
//!   masked because it indicates a codec bug, not bad input.
//!
//! ### Domain Errors
//! - `InvalidLevel`: a caller-supplied nesting level is outside the range the
//!   prefix byte can represent
//!
//! ## Propagation Policy
//!
//! Decode errors always reach the immediate caller; corrupted wire data is
//! never silently coerced into an empty or partial result at this layer.
//! Graceful degradation (dropping incompatible baggage) belongs to the
//! adapter layer, which deals in *type* mismatches, not malformed bytes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("buffer underrun: need {needed} more bytes, {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },

    #[error("invalid fixed-width read of {0} bytes")]
    InvalidLength(usize),

    #[error("level {0} out of range")]
    InvalidLevel(u8),

    #[error("truncated atom at offset {offset}: length {length} exceeds {remaining} remaining bytes")]
    TruncatedAtom {
        offset: usize,
        length: usize,
        remaining: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
