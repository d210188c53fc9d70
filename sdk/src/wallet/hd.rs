//! # Deterministic Wallets
//!
//! Many wallets from one seed, none of them stored.
//!
//! Child `i` gets the secret key `BLAKE3(seed || be32(i))`. The index is
//! appended big-endian and never mixed in any other way, so index `1` and
//! index `0x01000000` stay distinct and every implementation walks the
//! indices in the same order.
//!
//! This is a simple keyed hash, not BIP-32. Seeds and derived keys are not
//! interchangeable with any other HD wallet scheme.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::account::Wallet;
use crate::codec::{bytes_to_hex, concat_and_hash, hex_to_bytes};
use crate::config::MIN_HD_SEED_LENGTH;
use crate::crypto::keys::KeyPair;
use crate::error::{SdkError, SdkResult};

/// Seed holder that derives [`Wallet`]s on demand.
///
/// The seed is wiped from memory when the `HdWallet` is dropped.
///
/// ```
/// use relyo_sdk::wallet::HdWallet;
///
/// let hd = HdWallet::from_seed(&[7u8; 32]).unwrap();
/// let again = HdWallet::from_seed(&[7u8; 32]).unwrap();
/// assert_eq!(hd.derive_wallet(5).address(), again.derive_wallet(5).address());
/// ```
#[derive(Clone)]
pub struct HdWallet {
    seed: Zeroizing<Vec<u8>>,
}

impl HdWallet {
    /// Fails with [`SdkError::SeedLength`] for seeds under 32 bytes.
    pub fn from_seed(seed: &[u8]) -> SdkResult<Self> {
        if seed.len() < MIN_HD_SEED_LENGTH {
            return Err(SdkError::SeedLength {
                minimum: MIN_HD_SEED_LENGTH,
                actual: seed.len(),
            });
        }
        Ok(Self {
            seed: Zeroizing::new(seed.to_vec()),
        })
    }

    pub fn from_seed_hex(seed_hex: &str) -> SdkResult<Self> {
        let bytes = Zeroizing::new(hex_to_bytes(seed_hex)?);
        Self::from_seed(&bytes)
    }

    /// Fresh 32-byte seed from the OS RNG.
    pub fn generate() -> Self {
        let mut seed = Zeroizing::new(vec![0u8; MIN_HD_SEED_LENGTH]);
        OsRng.fill_bytes(&mut seed);
        Self { seed }
    }

    /// Hex of the seed, for backup. Anyone with it can derive every wallet.
    pub fn seed_hex(&self) -> String {
        bytes_to_hex(&self.seed)
    }

    /// Secret key of child `index`.
    fn child_secret(&self, index: u32) -> Zeroizing<[u8; 32]> {
        let index = index.to_be_bytes();
        Zeroizing::new(concat_and_hash(&[self.seed.as_slice(), &index[..]]))
    }

    /// Pure in `(seed, index)`: same inputs, same wallet, every time.
    pub fn derive_wallet(&self, index: u32) -> Wallet {
        Wallet::from_keypair(KeyPair::from_secret_bytes(&self.child_secret(index)))
    }

    /// Wallets `start..start + count`, in index order.
    ///
    /// Fails with [`SdkError::Validation`] if the range runs past `u32::MAX`.
    pub fn derive_wallets(&self, count: u32, start: u32) -> SdkResult<Vec<Wallet>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let last = start.checked_add(count - 1).ok_or_else(|| {
            SdkError::Validation(format!(
                "derivation range {start}+{count} exceeds the u32 index space"
            ))
        })?;
        Ok((start..=last).map(|i| self.derive_wallet(i)).collect())
    }
}

impl fmt::Debug for HdWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HdWallet(seed=<{} bytes>)", self.seed.len())
    }
}
