#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use bagwire_core::atom::{deserialize, serialize, serialized_size};
use bagwire_core::prefix::classify;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary buffers to the atom sequence parser.
    // Exercises:
    // - Truncated length prefixes and payloads
    // - Huge declared lengths vs. short buffers
    // - Zero-length atoms
    let bytes = Bytes::copy_from_slice(data);

    if let Ok(atoms) = deserialize(bytes) {
        // Prefix classification is total over every leading byte
        for atom in &atoms {
            let _ = atom.prefix();
            if let Some(byte) = atom.prefix_byte() {
                let _ = classify(byte);
            }
        }

        // Length prefixes may arrive over-long, so compare sequences, not
        // bytes: reframing and reparsing must reproduce the same atoms
        let reframed = serialize(&atoms);
        assert_eq!(reframed.len(), serialized_size(&atoms));
        assert!(reframed.len() <= data.len());
        assert_eq!(deserialize(reframed), Ok(atoms));
    }
});
