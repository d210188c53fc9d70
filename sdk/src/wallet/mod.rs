//! Key-owning wallets.
//!
//! - [`Wallet`]: one secret key, one address, signs transfers.
//! - [`HdWallet`]: one seed, any number of [`Wallet`]s derived on demand.

pub mod account;
pub mod hd;

pub use account::Wallet;
pub use hd::HdWallet;
