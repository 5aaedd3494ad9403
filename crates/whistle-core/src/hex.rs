//! Lowercase hex encoding for the fixed-size values in this crate.

use crate::error::CoreError;

/// Encode bytes as lowercase hex.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode exactly 32 bytes from a 64-character hex string.
///
/// Surrounding whitespace and a single `0x` prefix are accepted.
pub fn decode_32(hex: &str) -> Result<[u8; 32], CoreError> {
    let hex = hex.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);
    if hex.len() != 64 {
        return Err(CoreError::InvalidLength {
            expected: 64,
            actual: hex.len(),
        });
    }
    if let Some(pos) = hex.bytes().position(|b| !b.is_ascii_hexdigit()) {
        return Err(CoreError::InvalidHex(pos));
    }
    let mut out = [0u8; 32];
    for (i, pair) in hex.as_bytes().chunks(2).enumerate() {
        out[i] = (nibble(pair[0]) << 4) | nibble(pair[1]);
    }
    Ok(out)
}

fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}
