//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited implementations. Nothing in here is
//! clever and nothing in here should become clever:
//!
//! - **Ed25519** (`ed25519-dalek`) for keys and signatures.
//! - **BLAKE3** for addresses, transaction ids and HD derivation.
//! - **SHA-256** for the odd external system that insists on it.
//!
//! The surface is intentionally the capability set the rest of the SDK
//! needs (`generate_keypair`, `derive_public_key`, `derive_address`, `sign`,
//! `verify`, the hashes) and no more.

pub mod hash;
pub mod keys;
pub mod signatures;

pub use hash::{blake3_hash, sha256};
pub use keys::{derive_address, derive_public_key, generate_keypair, KeyPair, PublicKey, Signature};
pub use signatures::{sign, verify, verify_hex};
