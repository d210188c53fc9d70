//! # Wallet
//!
//! A [`Wallet`] owns exactly one secret key for its whole life and is the
//! only thing in the SDK that produces signatures for its address.
//!
//! Address and public key are derived once, at construction, and cached.
//! They can't drift from the key because nothing can change the key.
//!
//! ## Secret handling
//!
//! The secret leaves the wallet only through [`Wallet::export_secret_key`],
//! [`Wallet::serialize`] and [`Wallet::save`], all explicit. `Debug` prints
//! the address and nothing else. Storing an exported secret safely is the
//! caller's problem.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::bytes_to_hex;
use crate::crypto::keys::{KeyPair, PublicKey, Signature};
use crate::error::{SdkError, SdkResult};
use crate::transaction::signing::sign_transaction;
use crate::transaction::types::{SignedTransaction, TransactionData, TransactionParams};
use crate::types::{Address, AmountInput};

/// On-disk / exported representation.
#[derive(Debug, Serialize, Deserialize)]
struct WalletJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secret_key: Option<String>,
}

/// A single-key account.
///
/// ```
/// use relyo_sdk::wallet::Wallet;
///
/// let alice = Wallet::create();
/// let bob = Wallet::create();
/// let tx = alice
///     .create_transaction(&bob.address().to_hex(), 1.0, 0.001, 0, None)
///     .unwrap();
/// assert_eq!(tx.data.from, alice.address().to_hex());
/// ```
#[derive(Clone)]
pub struct Wallet {
    keypair: KeyPair,
    address: Address,
    public_key: PublicKey,
}

impl Wallet {
    /// A brand new wallet with a random key.
    pub fn create() -> Self {
        Self::from_keypair(KeyPair::generate())
    }

    pub fn from_keypair(keypair: KeyPair) -> Self {
        let public_key = keypair.public_key();
        let address = public_key.to_address();
        Self {
            keypair,
            address,
            public_key,
        }
    }

    /// Restores a wallet from a hex secret key (32 bytes, `0x` optional).
    pub fn from_secret_key(secret_hex: &str) -> SdkResult<Self> {
        KeyPair::from_hex(secret_hex).map(Self::from_keypair)
    }

    /// Restores a wallet from the JSON produced by [`Wallet::serialize`].
    ///
    /// `secret_key` is required. When `address` is present it must match
    /// the key, which catches files that were hand-edited or mixed up.
    pub fn from_serialized(json: &str) -> SdkResult<Self> {
        let parsed: WalletJson = serde_json::from_str(json)?;
        let secret = parsed
            .secret_key
            .ok_or_else(|| SdkError::InvalidKey("serialized wallet has no secret_key".into()))?;
        let wallet = Self::from_secret_key(&secret)?;

        if let Some(addr) = parsed.address {
            let claimed: Address = addr.parse().map_err(|_| {
                SdkError::InvalidKey("serialized wallet has a malformed address".into())
            })?;
            if claimed != wallet.address {
                return Err(SdkError::InvalidKey(
                    "serialized wallet address does not match its secret key".into(),
                ));
            }
        }
        Ok(wallet)
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Hex secret key. Treat the return value like the money it controls.
    pub fn export_secret_key(&self) -> String {
        bytes_to_hex(&self.keypair.secret_key_bytes())
    }

    /// `{"address", "public_key", "secret_key"}` as JSON.
    pub fn serialize(&self) -> String {
        let json = WalletJson {
            address: Some(self.address.to_hex()),
            public_key: Some(self.public_key.to_hex()),
            secret_key: Some(self.export_secret_key()),
        };
        // A struct of three strings always serializes.
        serde_json::to_string_pretty(&json).unwrap_or_default()
    }

    /// Writes [`serialize`](Self::serialize) to `path`, owner-only on Unix.
    ///
    /// The permissions are in place before the first byte of the secret is
    /// written, also when an existing file is overwritten.
    pub fn save(&self, path: impl AsRef<Path>) -> SdkResult<()> {
        let path = path.as_ref();
        let mut file = open_private(path)?;
        file.write_all(self.serialize().as_bytes())?;
        file.sync_all()?;
        debug!(address = %self.address, path = %path.display(), "wallet saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> SdkResult<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_serialized(&json)
    }

    /// Signs a UTF-8 message and returns the hex signature.
    pub fn sign_message(&self, message: &str) -> String {
        self.sign_bytes(message.as_bytes()).to_hex()
    }

    pub fn sign_bytes(&self, bytes: &[u8]) -> Signature {
        self.keypair.sign(bytes)
    }

    /// Builds and signs a transfer from this wallet.
    ///
    /// `amount` and `fee` are either exact wei ([`crate::types::Amount`]) or
    /// RELYO as `f64`, which is rounded to wei. `timestamp` defaults to the
    /// current time in milliseconds.
    pub fn create_transaction(
        &self,
        to: &str,
        amount: impl Into<AmountInput>,
        fee: impl Into<AmountInput>,
        nonce: u64,
        timestamp: Option<u64>,
    ) -> SdkResult<SignedTransaction> {
        let to: Address = to
            .parse()
            .map_err(|_| SdkError::Validation(format!("invalid recipient address: {to}")))?;
        let amount = amount.into().to_wei()?;
        let fee = fee.into().to_wei()?;

        self.sign_params(&TransactionParams {
            to,
            amount,
            fee,
            nonce,
            timestamp,
        })
    }

    /// Signs parameters produced by a `TransactionBuilder`.
    pub fn sign_params(&self, params: &TransactionParams) -> SdkResult<SignedTransaction> {
        let timestamp = params.timestamp.unwrap_or_else(now_ms);
        let data = TransactionData {
            from: self.address.to_hex(),
            to: params.to.to_hex(),
            amount: params.amount.to_string(),
            fee: params.fee.to_string(),
            nonce: params.nonce,
            timestamp,
        };
        let tx = sign_transaction(data, &self.keypair);
        debug!(
            from = %self.address,
            to = %params.to,
            nonce = params.nonce,
            "transaction signed"
        );
        Ok(tx)
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wallet({})", self.address)
    }
}

#[cfg(unix)]
fn open_private(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies to new files.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

fn now_ms() -> u64 {
    u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
}
