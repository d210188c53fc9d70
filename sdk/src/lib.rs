// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # RELYO SDK
//!
//! Client-side toolkit for the RAINSONET network: make keys, sign transfers,
//! check them, and talk to a node without trusting it more than you have to.
//!
//! The SDK never holds consensus state. The node decides what is final; the
//! SDK only makes sure that what it sends is well-formed and signed by the
//! right key, and that what comes back matches the wire contract exactly.
//!
//! ## Architecture
//!
//! - **codec**: hex, base64, address normalization. Boring on purpose.
//! - **crypto**: Ed25519 keys and signatures, BLAKE3 and SHA-256.
//! - **types**: 32-byte ids and arbitrary-precision wei [`Amount`]s.
//! - **wallet**: single-key [`Wallet`]s and seed-based [`HdWallet`]s.
//! - **transaction**: builder, canonical signing message, validator.
//! - **client**: [`NodeClient`]: typed endpoints, retries, timeouts.
//! - **config**: protocol constants and per-client settings.
//! - **error**: the one error type everybody returns.
//!
//! ## Quick Tour
//!
//! ```
//! use relyo_sdk::{TransactionBuilder, TransactionValidator, Wallet};
//!
//! # fn main() -> relyo_sdk::SdkResult<()> {
//! let alice = Wallet::create();
//! let bob = Wallet::create();
//!
//! let params = TransactionBuilder::new()
//!     .set_recipient(&bob.address().to_hex())?
//!     .set_amount(2.5)?
//!     .set_fee(0.001)?
//!     .set_nonce(0)
//!     .build()?;
//! let tx = alice.sign_params(&params)?;
//!
//! assert!(TransactionValidator::new().validate(&tx).valid);
//! # Ok(())
//! # }
//! ```
//!
//! ## Ground Rules
//!
//! 1. Secret keys never show up in `Debug` output or logs.
//! 2. Amounts are exact. Floats are accepted at the edge and rounded once.
//! 3. Signature checks answer `false`; they don't throw.
//! 4. Only network trouble is retried. Bad data fails fast.

pub mod client;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod error;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{NodeClient, SendRequest, WaitOptions};
pub use config::{ClientConfig, Network};
pub use crypto::{KeyPair, PublicKey, Signature};
pub use error::{SdkError, SdkResult};
pub use transaction::{
    SignedTransaction, TransactionBuilder, TransactionData, TransactionStatus, TransactionValidator,
    ValidationResult,
};
pub use types::{Address, Amount, AmountInput, TransactionId};
pub use wallet::{HdWallet, Wallet};
