//! Lenient hex decoding of node-supplied proof strings.

use alloy_primitives::hex::{self, FromHexError};

/// Decodes a hex string with an optional `0x` prefix. Odd-length input is left-padded with a
/// zero nibble.
pub fn safe_hex_decode(input: &str) -> Result<Vec<u8>, FromHexError> {
    let digits = input.strip_prefix("0x").unwrap_or(input);
    if digits.len() % 2 == 0 {
        hex::decode(digits)
    } else {
        hex::decode(format!("0{digits}"))
    }
}
