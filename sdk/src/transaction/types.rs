//! Transaction data types.
//!
//! Fields that a verifier has to re-read byte for byte (addresses, amounts)
//! are kept as the strings that were signed. That way a transaction coming
//! back from the network, from disk or from a user can be validated as-is,
//! malformed parts included, without a lossy parse happening first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Address, Amount};

// ---------------------------------------------------------------------------
// TransactionData
// ---------------------------------------------------------------------------

/// The six public fields of a transfer. Everything that is signed and
/// everything that feeds the transaction id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionData {
    /// Sender address, lowercase hex.
    pub from: String,
    /// Recipient address, lowercase hex.
    pub to: String,
    /// Transfer amount in wei, decimal string.
    pub amount: String,
    /// Fee in wei, decimal string.
    pub fee: String,
    /// Per-sender sequence number. Replay protection.
    pub nonce: u64,
    /// Unix milliseconds.
    pub timestamp: u64,
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// [`TransactionData`] plus the signer's public key and signature.
///
/// Serializes flat, which is also the submission body the node expects:
/// `{from, to, amount, fee, nonce, timestamp, public_key, signature}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub data: TransactionData,
    /// Hex-encoded Ed25519 public key of the signer.
    pub public_key: String,
    /// Hex-encoded Ed25519 signature over the signing message.
    pub signature: String,
}

impl SignedTransaction {
    pub fn from_address(&self) -> &str {
        &self.data.from
    }

    pub fn to_address(&self) -> &str {
        &self.data.to
    }

    pub fn nonce(&self) -> u64 {
        self.data.nonce
    }
}

// ---------------------------------------------------------------------------
// TransactionParams
// ---------------------------------------------------------------------------

/// Everything a wallet needs to sign a transfer, already validated.
///
/// Produced by `TransactionBuilder::build`. `timestamp` is optional; the
/// signing wallet fills in the current time when it's absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParams {
    pub to: Address,
    pub amount: Amount,
    pub fee: Amount,
    pub nonce: u64,
    pub timestamp: Option<u64>,
}

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Status of a submitted transaction, as reported by the node.
///
/// The SDK never decides or caches this; it only relays what it is told.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Accepted into the mempool, not yet final.
    Pending,
    /// Included and executed.
    Confirmed,
    /// Rejected during execution.
    Failed,
    /// The node has no record of it, or no longer has one.
    Unknown,
}

impl TransactionStatus {
    /// `Confirmed` and `Failed` are final. The other two can still change.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
            Self::Failed => write!(f, "failed"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
