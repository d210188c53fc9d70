//! # Digital Signatures
//!
//! Byte-level sign and verify. These are the entry points for data that
//! arrives off the wire as raw slices or hex strings rather than typed keys.
//!
//! ## The verification contract
//!
//! [`verify`] is a total predicate. Wrong lengths, bad hex, points that
//! aren't on the curve, or a signature that simply doesn't match all come
//! back as `false`. Nothing here panics and nothing here returns an error,
//! so validators can call it on attacker-controlled input without a second
//! thought.

use super::keys::{KeyPair, PublicKey, Signature};
use crate::codec::hex_to_bytes;
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};

/// Signs `message` with a raw 32-byte secret key.
///
/// ```
/// use relyo_sdk::crypto::{generate_keypair, sign, verify};
///
/// let kp = generate_keypair();
/// let sig = sign(b"hello", &kp.secret_key_bytes());
/// assert!(verify(&sig.to_bytes(), b"hello", kp.public_key().as_bytes()));
/// ```
pub fn sign(message: &[u8], secret_key: &[u8; SECRET_KEY_LENGTH]) -> Signature {
    KeyPair::from_secret_bytes(secret_key).sign(message)
}

/// `true` iff `signature` is a valid Ed25519 signature of `message` under
/// `public_key`. Never panics; malformed input is simply `false`.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> bool {
    let Ok(sig) = <[u8; SIGNATURE_LENGTH]>::try_from(signature) else {
        return false;
    };
    let Ok(pk) = <[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key) else {
        return false;
    };
    PublicKey::from_bytes(pk).verify(message, &Signature::from_bytes(sig))
}

/// [`verify`] for hex-encoded signature and key, as they appear in
/// transactions. Undecodable hex is `false`.
pub fn verify_hex(signature_hex: &str, message: &[u8], public_key_hex: &str) -> bool {
    match (hex_to_bytes(signature_hex), hex_to_bytes(public_key_hex)) {
        (Ok(sig), Ok(pk)) => verify(&sig, message, &pk),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::generate_keypair;

    #[test]
    fn sign_then_verify() {
        let kp = generate_keypair();
        let msg = b"RELYO_TX:a:b:1:1:0:0";
        let sig = sign(msg, &kp.secret_key_bytes());
        assert!(verify(&sig.to_bytes(), msg, kp.public_key().as_bytes()));
    }

    #[test]
    fn wrong_key_fails() {
        let kp = generate_keypair();
        let other = generate_keypair();
        let sig = sign(b"msg", &kp.secret_key_bytes());
        assert!(!verify(&sig.to_bytes(), b"msg", other.public_key().as_bytes()));
    }

    #[test]
    fn signatures_are_deterministic() {
        let secret = [9u8; 32];
        assert_eq!(sign(b"same", &secret), sign(b"same", &secret));
    }

    #[test]
    fn garbage_never_panics() {
        let kp = generate_keypair();
        let pk = kp.public_key();
        assert!(!verify(&[], b"msg", pk.as_bytes()));
        assert!(!verify(&[0u8; 64], b"msg", &[]));
        assert!(!verify(&[0xFF; 64], b"msg", &[0xFF; 32]));
        assert!(!verify(&[1u8; 65], b"msg", pk.as_bytes()));

        // Pseudo-random junk of assorted lengths.
        for n in 0..128u8 {
            let junk: Vec<u8> = (0..n).map(|i| i.wrapping_mul(31).wrapping_add(n)).collect();
            assert!(!verify(&junk, &junk, &junk));
        }
    }

    #[test]
    fn hex_variant_rejects_bad_hex() {
        let kp = generate_keypair();
        let sig = kp.sign(b"msg");
        assert!(verify_hex(&sig.to_hex(), b"msg", &kp.public_key().to_hex()));
        assert!(!verify_hex("zz", b"msg", &kp.public_key().to_hex()));
        assert!(!verify_hex(&sig.to_hex(), b"msg", "abc"));
    }
}
