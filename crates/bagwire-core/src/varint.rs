//! Order-Preserving Variable-Length Integer Encoding
//!
//! Two codecs live here, both with the same defining property: comparing two
//! encoded values byte-by-byte (unsigned, lexicographic) gives the same
//! answer as comparing the original numbers.
//!
//! ## Signed Lex-Varint
//!
//! Like an unsigned varint, but the first bit is a sign bit (`1` =
//! non-negative, `0` = negative), and the length prefix is a unary run of
//! bits *matching* the sign bit, so "more negative" always sorts lower:
//!
//! ```text
//! i64::MIN:  0000 0000 × 9
//! -65:       0011 1111  1011 1111
//! -64:       0100 0000
//! -1:        0111 1111
//! 0:         1000 0000
//! 19:        1001 0011
//! 63:        1011 1111
//! 64:        1100 0000  0100 0000
//! i64::MAX:  1111 1111 × 9
//! ```
//!
//! Negative values are encoded by transforming through `-(v + 1)` (which is
//! `!v`, so `i64::MIN` never overflows) and complementing every emitted byte.
//! Values in `[-2^6, 2^6)` use 1 byte; each further byte adds 7 bits of
//! magnitude, up to 9 bytes. The 8- and 9-byte forms share an all-zeros /
//! all-ones first byte; the high bit of the second byte distinguishes them.
//!
//! ## Unsigned Lex-Varint
//!
//! The length is a run of leading `1` bits: `0xxxxxxx` is 1 byte,
//! `10xxxxxx ...` is 2 bytes, and so on; a first byte of `0xFF` escapes to a
//! full 8-byte big-endian value. Used by the atom framing layer for length
//! prefixes, where lengths are naturally unsigned.
//!
//! ## Cursors
//!
//! Writers take `impl BufMut`, readers take `impl Buf`. Readers never panic
//! on short input: every read is preceded by a remaining-length check and
//! fails with [`Error::BufferUnderrun`].

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Error, Result};

/// Number of bytes [`write_lex_i32`] will emit for `value`.
///
/// Values in `[-2^6, 2^6)` use 1 byte; `[-2^13, -2^6)` and `[2^6, 2^13)` use
/// 2 bytes, and so on, up to 5 bytes.
pub fn encoded_length_i32(value: i32) -> usize {
    let magnitude = (if value < 0 { !value } else { value }) as u32;
    if magnitude & !0x3F == 0 {
        1
    } else if magnitude & !0x1FFF == 0 {
        2
    } else if magnitude & !0xF_FFFF == 0 {
        3
    } else if magnitude & !0x7FF_FFFF == 0 {
        4
    } else {
        5
    }
}

/// Number of bytes [`write_lex_i64`] will emit for `value`.
///
/// Same boundaries as [`encoded_length_i32`], continuing at each further
/// power of `2^7` up to 9 bytes.
pub fn encoded_length_i64(value: i64) -> usize {
    let magnitude = (if value < 0 { !value } else { value }) as u64;
    magnitude_length(magnitude)
}

/// Encoded length for an already sign-transformed magnitude.
fn magnitude_length(magnitude: u64) -> usize {
    if magnitude & !0x3F == 0 {
        1
    } else if magnitude & !0x1FFF == 0 {
        2
    } else if magnitude & !0xF_FFFF == 0 {
        3
    } else if magnitude & !0x7FF_FFFF == 0 {
        4
    } else if magnitude & !0x3_FFFF_FFFF == 0 {
        5
    } else if magnitude & !0x1FF_FFFF_FFFF == 0 {
        6
    } else if magnitude & !0xFFFF_FFFF_FFFF == 0 {
        7
    } else if magnitude & !0x7F_FFFF_FFFF_FFFF == 0 {
        8
    } else {
        9
    }
}

/// Write `value` as a lexicographically comparable signed varint.
///
/// Returns the number of bytes written.
pub fn write_lex_i32(buf: &mut impl BufMut, value: i32) -> usize {
    write_lex_i64(buf, value as i64)
}

/// Write `value` as a lexicographically comparable signed varint.
///
/// Returns the number of bytes written (1 to 9).
pub fn write_lex_i64(buf: &mut impl BufMut, value: i64) -> usize {
    let negate = value < 0;
    // -(value + 1), overflow-free for i64::MIN
    let magnitude = (if negate { !value } else { value }) as u64;
    let size = magnitude_length(magnitude);
    let mut remaining = size - 1;

    let mut b0: u8;
    if size == 9 {
        // Length escape: the first byte carries no magnitude bits at all.
        // The second byte's high bit marks the 9-byte form (the 8-byte form
        // shares the same escape byte with that bit clear).
        buf.put_u8(if negate { 0x00 } else { 0xFF });
        b0 = 0x80 | (magnitude >> 56) as u8;
        remaining -= 1;
    } else {
        b0 = (0xFFu16 << (8 - size)) as u8;
        let mask = !b0;
        b0 |= ((magnitude >> (8 * remaining)) as u8) & mask;
    }

    if negate {
        buf.put_u8(!b0);
        for i in (1..=remaining).rev() {
            buf.put_u8(!((magnitude >> (8 * (i - 1))) as u8));
        }
    } else {
        buf.put_u8(b0);
        for i in (1..=remaining).rev() {
            buf.put_u8((magnitude >> (8 * (i - 1))) as u8);
        }
    }
    size
}

/// Write `value` so that the lexicographic order of encodings is the
/// *reverse* of numeric order (for descending-sorted keys).
pub fn write_reverse_lex_i32(buf: &mut impl BufMut, value: i32) -> usize {
    write_reverse_lex_i64(buf, value as i64)
}

/// Write `value` so that the lexicographic order of encodings is the
/// *reverse* of numeric order (for descending-sorted keys).
pub fn write_reverse_lex_i64(buf: &mut impl BufMut, value: i64) -> usize {
    // -(value + 1); the transform happens before encoding, so the forward
    // codec's overflow handling covers the extremes symmetrically
    write_lex_i64(buf, !value)
}

/// Read a lexicographically comparable signed 32-bit varint (up to 5 bytes).
pub fn read_lex_i32(buf: &mut impl Buf) -> Result<i32> {
    Ok(read_lex_i64(buf)? as i32)
}

/// Read a lexicographically comparable signed 64-bit varint (up to 9 bytes).
///
/// Fails with [`Error::BufferUnderrun`] if the leading byte declares more
/// bytes than the cursor holds.
pub fn read_lex_i64(buf: &mut impl Buf) -> Result<i64> {
    let b0 = checked_u8(buf)?;
    let mut size = interpret_signed_size(b0);
    if size == 1 {
        return Ok(((b0 ^ 0x80) as i8) as i64);
    }

    // A clear sign bit means negative; complement back to the positive
    // structure before extracting length and magnitude bits.
    let negative = b0 & 0x80 == 0;
    let b0 = if negative { !b0 } else { b0 };

    let mut result: u64;
    if size == 8 {
        // Escape byte: 8- and 9-byte forms disambiguated by the next byte's
        // high bit.
        let b1 = checked_u8(buf)?;
        let b1 = if negative { !b1 } else { b1 };
        if b1 & 0x80 == 0 {
            size -= 1;
        }
        result = (b1 & 0x7F) as u64;
    } else {
        result = (b0 & (0xFFu16 >> (size + 1)) as u8) as u64;
    }

    result <<= 8 * (size - 1);
    result |= read_fixed_be(buf, size - 1, negative)?;
    if negative {
        Ok(-(result as i64) - 1)
    } else {
        Ok(result as i64)
    }
}

/// Read a signed 32-bit varint written by [`write_reverse_lex_i32`].
pub fn read_reverse_lex_i32(buf: &mut impl Buf) -> Result<i32> {
    Ok(read_reverse_lex_i64(buf)? as i32)
}

/// Read a signed 64-bit varint written by [`write_reverse_lex_i64`].
pub fn read_reverse_lex_i64(buf: &mut impl Buf) -> Result<i64> {
    // undo the -(value + 1) transform applied on the write path
    Ok(!read_lex_i64(buf)?)
}

/// Encode `value` into a freshly allocated buffer.
pub fn encode_i32(value: i32) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_length_i32(value));
    write_lex_i32(&mut buf, value);
    buf.freeze()
}

/// Encode `value` into a freshly allocated buffer.
pub fn encode_i64(value: i64) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_length_i64(value));
    write_lex_i64(&mut buf, value);
    buf.freeze()
}

/// Decode the byte count of a signed encoding from its leading byte.
///
/// Counts the unary run of bits matching the sign bit; the all-matching
/// pattern (8) stands for both the 8- and 9-byte forms, which the caller
/// disambiguates via the second byte.
fn interpret_signed_size(b0: u8) -> usize {
    let b = if b0 & 0x80 != 0 { !b0 } else { b0 };
    for i in 1..8 {
        if b & (0x80 >> i) != 0 {
            return i;
        }
    }
    8
}

/// Number of bytes [`write_lex_u32`] will emit for `value` (1 to 5).
pub fn encoded_length_u32(value: u32) -> usize {
    encoded_length_u64(value as u64)
}

/// Number of bytes [`write_lex_u64`] will emit for `value`.
///
/// Values below `2^7` use 1 byte; each further byte adds 7 bits, with a
/// 9-byte escape form for values of 57 bits and above.
pub fn encoded_length_u64(value: u64) -> usize {
    if value & !0x7F == 0 {
        1
    } else if value & !0x3FFF == 0 {
        2
    } else if value & !0x1F_FFFF == 0 {
        3
    } else if value & !0xFFF_FFFF == 0 {
        4
    } else if value & !0x7_FFFF_FFFF == 0 {
        5
    } else if value & !0x3FF_FFFF_FFFF == 0 {
        6
    } else if value & !0x1_FFFF_FFFF_FFFF == 0 {
        7
    } else if value & !0xFF_FFFF_FFFF_FFFF == 0 {
        8
    } else {
        9
    }
}

/// Write `value` as a lexicographically comparable unsigned varint.
pub fn write_lex_u32(buf: &mut impl BufMut, value: u32) -> usize {
    write_lex_u64(buf, value as u64)
}

/// Write `value` as a lexicographically comparable unsigned varint.
///
/// Returns the number of bytes written (1 to 9).
pub fn write_lex_u64(buf: &mut impl BufMut, value: u64) -> usize {
    let size = encoded_length_u64(value);
    if size == 9 {
        buf.put_u8(0xFF);
        buf.put_u64(value);
        return 9;
    }

    let remaining = size - 1;
    let prefix = if size == 1 {
        0
    } else {
        (0xFFu16 << (9 - size)) as u8
    };
    buf.put_u8(prefix | (value >> (8 * remaining)) as u8);
    for i in (1..=remaining).rev() {
        buf.put_u8((value >> (8 * (i - 1))) as u8);
    }
    size
}

/// Read a lexicographically comparable unsigned 32-bit varint (up to 5 bytes).
pub fn read_lex_u32(buf: &mut impl Buf) -> Result<u32> {
    Ok(read_lex_u64(buf)? as u32)
}

/// Read a lexicographically comparable unsigned 64-bit varint (up to 9 bytes).
pub fn read_lex_u64(buf: &mut impl Buf) -> Result<u64> {
    let b0 = checked_u8(buf)?;
    let size = interpret_unsigned_size(b0);
    if size == 1 {
        return Ok(b0 as u64);
    }
    if size == 9 {
        return read_fixed_be(buf, 8, false);
    }

    let mut result = (b0 & (0xFFu16 >> size) as u8) as u64;
    result <<= 8 * (size - 1);
    result |= read_fixed_be(buf, size - 1, false)?;
    Ok(result)
}

/// Decode the byte count of an unsigned encoding from its leading byte:
/// the run of leading `1` bits, plus one.
fn interpret_unsigned_size(b0: u8) -> usize {
    if b0 & 0x80 == 0 {
        return 1;
    }
    for i in 1..8 {
        if b0 & (0x80 >> i) == 0 {
            return i + 1;
        }
    }
    9
}

/// Read `num_bytes` big-endian bytes into a `u64`, complementing each byte
/// when decoding the negative branch of the signed codec.
///
/// `num_bytes` outside `[1, 8]` is a codec defect, reported as
/// [`Error::InvalidLength`].
fn read_fixed_be(buf: &mut impl Buf, num_bytes: usize, negative: bool) -> Result<u64> {
    if num_bytes == 0 || num_bytes > 8 {
        return Err(Error::InvalidLength(num_bytes));
    }
    if buf.remaining() < num_bytes {
        return Err(Error::BufferUnderrun {
            needed: num_bytes,
            remaining: buf.remaining(),
        });
    }
    let mut result = 0u64;
    for _ in 0..num_bytes {
        let b = buf.get_u8();
        let b = if negative { !b } else { b };
        result = (result << 8) | b as u64;
    }
    Ok(result)
}

fn checked_u8(buf: &mut impl Buf) -> Result<u8> {
    if !buf.has_remaining() {
        return Err(Error::BufferUnderrun {
            needed: 1,
            remaining: 0,
        });
    }
    Ok(buf.get_u8())
}
