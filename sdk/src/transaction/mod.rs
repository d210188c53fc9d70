//! # Transaction Module
//!
//! Construction, signing and validation of RELYO transfers.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        TransactionData, SignedTransaction, TransactionParams, TransactionStatus
//! builder.rs      TransactionBuilder: validated, staged parameter collection
//! signing.rs      canonical signing message, transaction id, sign_transaction
//! verification.rs TransactionValidator and its rejection reasons
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Build**: [`TransactionBuilder`] collects and checks the parameters.
//! 2. **Sign**: a `Wallet` turns the parameters into a [`SignedTransaction`].
//! 3. **Validate**: [`TransactionValidator`] on whichever side receives it.
//! 4. **Submit**: `NodeClient::submit_transaction`, then poll for a terminal
//!    [`TransactionStatus`].
//!
//! ## Design Decisions
//!
//! - Amounts are decimal strings of wei on the wire and `BigUint` in memory.
//!   No fixed-width integer is wide enough for every 18-decimal balance.
//! - The transaction id is a function of the six public fields only, so it
//!   is known before signing and stable across re-signing.

pub mod builder;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::TransactionBuilder;
pub use signing::{compute_transaction_id, sign_transaction, signing_message};
pub use types::{SignedTransaction, TransactionData, TransactionParams, TransactionStatus};
pub use verification::{Rejection, TransactionValidator, ValidationPolicy, ValidationResult};
