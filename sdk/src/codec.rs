//! Byte and string encodings shared by every other module.
//!
//! Hex is the lingua franca of the node API: addresses, public keys,
//! signatures and transaction ids all travel as lowercase hex. Decoding is
//! lenient about an `0x` prefix and strict about everything else.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::config::ADDRESS_LENGTH;
use crate::error::{SdkError, SdkResult};

fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Lowercase hex, two digits per byte, no prefix.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decodes hex with an optional `0x` prefix.
///
/// Odd-length input cannot describe whole bytes and is rejected before any
/// digit is looked at.
pub fn hex_to_bytes(s: &str) -> SdkResult<Vec<u8>> {
    let digits = strip_hex_prefix(s);
    if digits.len() % 2 != 0 {
        return Err(SdkError::Format(format!(
            "hex string has odd length {}",
            digits.len()
        )));
    }
    hex::decode(digits).map_err(|e| SdkError::Format(format!("invalid hex: {e}")))
}

/// Decodes hex into a fixed-size array, failing on any other length.
pub fn hex_to_array<const N: usize>(s: &str) -> SdkResult<[u8; N]> {
    let bytes = hex_to_bytes(s)?;
    bytes.as_slice().try_into().map_err(|_| {
        SdkError::Format(format!("expected {} bytes, got {}", N, bytes.len()))
    })
}

pub fn is_valid_hex(s: &str) -> bool {
    hex_to_bytes(s).is_ok()
}

/// An address is valid iff it decodes to exactly 32 bytes.
pub fn is_valid_address(s: &str) -> bool {
    hex_to_bytes(s).is_ok_and(|b| b.len() == ADDRESS_LENGTH)
}

/// Canonical form of an address: lowercase, no prefix.
pub fn normalize_address(s: &str) -> SdkResult<String> {
    let bytes: [u8; ADDRESS_LENGTH] = hex_to_array(s)
        .map_err(|_| SdkError::Validation(format!("invalid address: {s}")))?;
    Ok(bytes_to_hex(&bytes))
}

/// Concatenates `parts` in the given order and hashes the result with BLAKE3.
///
/// Order matters. Transaction ids and HD derivation both depend on it, and
/// sorting the parts would make unrelated inputs collide.
pub fn concat_and_hash(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    for part in parts {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}

/// Standard, padded base64.
pub fn bytes_to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn base64_to_bytes(s: &str) -> SdkResult<Vec<u8>> {
    STANDARD
        .decode(s)
        .map_err(|e| SdkError::Format(format!("invalid base64: {e}")))
}
