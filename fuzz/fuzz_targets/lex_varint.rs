#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;

use bagwire_core::varint::{
    read_lex_i64, read_lex_u64, read_reverse_lex_i64, write_lex_i64, write_lex_u64,
};

fuzz_target!(|data: &[u8]| {
    // Decode arbitrary bytes as each varint flavor.
    // Exercises:
    // - Truncated encodings at every length (1-9 bytes)
    // - The 0x00/0xFF escape forms and the byte-2 marker bit
    // - Underrun reporting instead of panics
    //
    // Decoding is total over non-canonical (over-long) encodings, so the
    // checkable invariant is value-level: re-encoding a decoded value and
    // decoding again must give the same value, in at most as many bytes.
    let mut cursor = data;
    if let Ok(value) = read_lex_i64(&mut cursor) {
        let consumed = data.len() - cursor.len();
        let mut buf = BytesMut::new();
        write_lex_i64(&mut buf, value);
        assert!(buf.len() <= consumed);
        let mut reread = buf.as_ref();
        assert_eq!(read_lex_i64(&mut reread), Ok(value));
    }

    let mut cursor = data;
    if let Ok(value) = read_lex_u64(&mut cursor) {
        let consumed = data.len() - cursor.len();
        let mut buf = BytesMut::new();
        write_lex_u64(&mut buf, value);
        assert!(buf.len() <= consumed);
        let mut reread = buf.as_ref();
        assert_eq!(read_lex_u64(&mut reread), Ok(value));
    }

    let mut cursor = data;
    let _ = read_reverse_lex_i64(&mut cursor);
});
