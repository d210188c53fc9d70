//! # Hashing
//!
//! BLAKE3 is the primary hash: addresses, transaction ids and HD child keys
//! all come out of it. SHA-256 is kept around for interoperability and
//! nothing in the RELYO wire format depends on it.

use sha2::{Digest, Sha256};

/// BLAKE3 digest of `data`.
///
/// ```
/// use relyo_sdk::crypto::blake3_hash;
///
/// assert_eq!(blake3_hash(b"RELYO").len(), 32);
/// ```
pub fn blake3_hash(data: &[u8]) -> [u8; 32] {
    *blake3::hash(data).as_bytes()
}

/// SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}
