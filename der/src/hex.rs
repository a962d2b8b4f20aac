//! Conversions between bytes, hex strings and text.

use crate::error::{Error, Result};

/// Formats every byte as two lowercase hex digits.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    ::hex::encode(bytes)
}

/// Parses a hex string two digits at a time.
///
/// Either case is accepted. Fails with [`Error::MalformedHex`] on an odd
/// number of digits or a non-hex character.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    ::hex::decode(hex).map_err(|_| Error::MalformedHex)
}

/// Minimal hex digits of `n`, padded with a single `0` to an even count.
pub fn num_to_hex(n: usize) -> String {
    let digits = format!("{n:x}");
    if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits
    }
}

/// Hex of the UTF-8 bytes of `text`.
pub fn str_to_hex(text: &str) -> String {
    bytes_to_hex(text.as_bytes())
}

pub fn hex_to_str(hex: &str) -> Result<String> {
    let bytes = hex_to_bytes(hex)?;
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
}
