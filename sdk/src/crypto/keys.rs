//! # Key Management
//!
//! Ed25519 keypairs and the address they map to.
//!
//! A RELYO account is identified by `BLAKE3(public_key)`, so a keypair,
//! its public key and its address are three views of the same secret. This
//! module owns the conversions between them.
//!
//! ## Security considerations
//!
//! - Secret keys are drawn from `OsRng` and zeroized on drop by
//!   `ed25519-dalek`.
//! - Key bytes are never logged. `Debug` on [`KeyPair`] prints the public
//!   half only.
//! - Error messages never echo secret material back, even when it is
//!   malformed.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use crate::codec::{bytes_to_hex, hex_to_array, hex_to_bytes};
use crate::config::{PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH};
use crate::crypto::hash::blake3_hash;
use crate::error::{SdkError, SdkResult};
use crate::types::Address;

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An Ed25519 signing key together with its public half.
///
/// Deliberately not `Serialize`. Exporting a secret goes through
/// [`KeyPair::secret_key_bytes`] or the wallet's export methods, never
/// through an accidental `serde_json::to_string`.
///
/// ```
/// use relyo_sdk::crypto::KeyPair;
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(b"RELYO_TX:...");
/// assert!(kp.public_key().verify(b"RELYO_TX:...", &sig));
/// ```
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Fresh keypair from the OS CSPRNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// In Ed25519 the 32-byte secret key is the seed, so every 32-byte
    /// value is a valid key.
    pub fn from_secret_bytes(secret: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(secret),
        }
    }

    /// Like [`from_secret_bytes`](Self::from_secret_bytes) but checks the length.
    pub fn from_secret_slice(secret: &[u8]) -> SdkResult<Self> {
        let arr: [u8; SECRET_KEY_LENGTH] = secret.try_into().map_err(|_| {
            SdkError::InvalidKey(format!(
                "secret key must be {} bytes, got {}",
                SECRET_KEY_LENGTH,
                secret.len()
            ))
        })?;
        Ok(Self::from_secret_bytes(&arr))
    }

    /// Loads a hex secret key, `0x` prefix optional.
    pub fn from_hex(secret_hex: &str) -> SdkResult<Self> {
        let bytes = hex_to_bytes(secret_hex)
            .map_err(|_| SdkError::InvalidKey("secret key is not valid hex".into()))?;
        Self::from_secret_slice(&bytes)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub fn address(&self) -> Address {
        derive_address(&self.public_key())
    }

    /// Raw secret key. Whoever holds these bytes owns the account.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes()
    }

    /// Ed25519 signature over `message`. Deterministic for a given key and
    /// message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key().to_hex())
    }
}

impl PartialEq for KeyPair {
    /// Compares public keys; secret bytes are never compared directly.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for KeyPair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// The public half of a keypair. 32 bytes, safe to share.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Wraps raw bytes without checking they are a curve point. Invalid
    /// points simply never verify anything.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(s: &str) -> SdkResult<Self> {
        hex_to_array(s).map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }

    pub fn to_address(&self) -> Address {
        derive_address(self)
    }

    /// `true` iff `signature` is valid for `message` under this key.
    /// Malformed keys yield `false`.
    ///
    /// Uses the standard RFC 8032 check, the same one RAINSONET nodes run,
    /// so anything a node accepts also verifies here. Small-order keys are
    /// not filtered out.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        verifying_key.verify(message, &sig).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> SdkResult<Self> {
        bytes.try_into().map(Self).map_err(|_| {
            SdkError::Format(format!(
                "signature must be {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            ))
        })
    }

    pub fn from_hex(s: &str) -> SdkResult<Self> {
        Self::from_slice(&hex_to_bytes(s)?)
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Capability functions
// ---------------------------------------------------------------------------

pub fn generate_keypair() -> KeyPair {
    KeyPair::generate()
}

/// Pure: the same secret always yields the same public key.
pub fn derive_public_key(secret: &[u8; SECRET_KEY_LENGTH]) -> PublicKey {
    KeyPair::from_secret_bytes(secret).public_key()
}

/// `BLAKE3(public_key)`. BLAKE3's native digest is already 32 bytes.
pub fn derive_address(public_key: &PublicKey) -> Address {
    Address::from_bytes(blake3_hash(public_key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_unique() {
        let a = KeyPair::generate();
        let b = KeyPair::generate();
        assert_ne!(a.public_key(), b.public_key());
        assert_ne!(a.address(), b.address());
    }

    #[test]
    fn derivation_is_deterministic() {
        let secret = [42u8; 32];
        let pk1 = derive_public_key(&secret);
        let pk2 = derive_public_key(&secret);
        assert_eq!(pk1, pk2);
        assert_eq!(derive_address(&pk1), derive_address(&pk2));
        assert_eq!(
            derive_address(&pk1).as_bytes(),
            &blake3_hash(pk1.as_bytes())
        );
    }

    #[test]
    fn hex_secret_round_trips() {
        let kp = KeyPair::generate();
        let hex_secret = hex::encode(kp.secret_key_bytes());
        let restored = KeyPair::from_hex(&format!("0x{hex_secret}")).unwrap();
        assert_eq!(kp, restored);
    }

    #[test]
    fn wrong_length_secret_is_invalid_key() {
        match KeyPair::from_hex(&"11".repeat(31)) {
            Err(SdkError::InvalidKey(msg)) => assert!(msg.contains("31")),
            other => panic!("expected InvalidKey, got {:?}", other),
        }
        assert!(matches!(
            KeyPair::from_hex("not hex"),
            Err(SdkError::InvalidKey(_))
        ));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let kp = KeyPair::from_secret_bytes(&[0xAB; 32]);
        let dbg = format!("{:?}", kp);
        assert!(!dbg.contains(&"ab".repeat(32)));
        assert!(dbg.contains(&kp.public_key().to_hex()));
    }

    #[test]
    fn signature_length_is_checked() {
        assert!(Signature::from_slice(&[0u8; 63]).is_err());
        assert!(Signature::from_slice(&[0u8; 64]).is_ok());
    }

    #[test]
    fn tampered_message_fails_verification() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"pay bob 10");
        assert!(kp.public_key().verify(b"pay bob 10", &sig));
        assert!(!kp.public_key().verify(b"pay bob 11", &sig));
    }

    #[test]
    fn verification_matches_node_rules_for_small_order_keys() {
        // Identity point as the key, identity R and s = 0: passes the
        // standard equation for every message, fails the strict one.
        let mut identity = [0u8; PUBLIC_KEY_LENGTH];
        identity[0] = 1;
        let mut sig = [0u8; SIGNATURE_LENGTH];
        sig[0] = 1;

        let pk = PublicKey::from_bytes(identity);
        let sig = Signature::from_bytes(sig);
        assert!(pk.verify(b"anything", &sig));

        let dalek_key = VerifyingKey::from_bytes(&identity).unwrap();
        let dalek_sig = ed25519_dalek::Signature::from_bytes(&sig.to_bytes());
        assert!(dalek_key.verify_strict(b"anything", &dalek_sig).is_err());
    }
}
