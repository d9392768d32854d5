//! Byte/text boundary helpers
//!
//! Hex is the default interchange encoding for keys, signatures and
//! ciphertexts: lowercase on output, case-tolerant and even-length on
//! input. UTF-8 conversion goes through the standard library.

use crate::error::{Error, Result};

/// Decode a hex string into bytes
///
/// Accepts upper- and lowercase digits; rejects odd-length input and
/// non-hex characters.
pub fn hex_to_bytes(hex_str: &str) -> Result<Vec<u8>> {
    if hex_str.len() % 2 != 0 {
        return Err(Error::Encoding {
            context: "hex string",
            reason: "odd number of digits",
        });
    }
    hex::decode(hex_str).map_err(|_| Error::Encoding {
        context: "hex string",
        reason: "invalid hexadecimal digit",
    })
}

/// Encode bytes as lowercase hex
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
