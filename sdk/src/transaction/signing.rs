//! Canonical signing message, transaction id, and the signing step itself.
//!
//! Both byte layouts below are wire contract with the node. The signing
//! message is
//!
//! ```text
//! RELYO_TX:{from}:{to}:{amount}:{fee}:{nonce}:{timestamp}
//! ```
//!
//! and the transaction id is `BLAKE3` of the same field list without the
//! tag. The id never covers the signature, so it can be computed before
//! signing and is identical for every valid signature over the same fields.

use super::types::{SignedTransaction, TransactionData};
use crate::codec::concat_and_hash;
use crate::config::SIGNING_DOMAIN_TAG;
use crate::crypto::keys::KeyPair;
use crate::types::TransactionId;

fn field_list(data: &TransactionData) -> String {
    format!(
        "{}:{}:{}:{}:{}:{}",
        data.from, data.to, data.amount, data.fee, data.nonce, data.timestamp
    )
}

/// The exact UTF-8 string that gets Ed25519-signed.
pub fn signing_message(data: &TransactionData) -> String {
    format!("{}{}", SIGNING_DOMAIN_TAG, field_list(data))
}

/// `BLAKE3("{from}:{to}:{amount}:{fee}:{nonce}:{timestamp}")`.
pub fn compute_transaction_id(data: &TransactionData) -> TransactionId {
    TransactionId::from_bytes(concat_and_hash(&[field_list(data).as_bytes()]))
}

/// Signs `data` with `keypair` and attaches the public key.
///
/// The caller is responsible for `data.from` matching the keypair's
/// address. A mismatch produces a transaction that validators reject.
pub fn sign_transaction(data: TransactionData, keypair: &KeyPair) -> SignedTransaction {
    let signature = keypair.sign(signing_message(&data).as_bytes());
    SignedTransaction {
        data,
        public_key: keypair.public_key().to_hex(),
        signature: signature.to_hex(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::signatures::verify_hex;

    fn data() -> TransactionData {
        TransactionData {
            from: "aa".repeat(32),
            to: "bb".repeat(32),
            amount: "1000000000000000000".into(),
            fee: "1000000000000000000".into(),
            nonce: 0,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn signing_message_layout() {
        let msg = signing_message(&data());
        let expected = format!(
            "RELYO_TX:{}:{}:1000000000000000000:1000000000000000000:0:1700000000000",
            "aa".repeat(32),
            "bb".repeat(32)
        );
        assert_eq!(msg, expected);
    }

    #[test]
    fn id_excludes_the_tag() {
        let d = data();
        let id = compute_transaction_id(&d);
        let preimage = signing_message(&d);
        let untagged = preimage.strip_prefix(SIGNING_DOMAIN_TAG).unwrap();
        assert_eq!(id.as_bytes(), blake3::hash(untagged.as_bytes()).as_bytes());
        assert_eq!(id.to_hex().len(), 64);
    }

    #[test]
    fn every_field_moves_the_id() {
        let base = compute_transaction_id(&data());
        let mutations: Vec<Box<dyn Fn(&mut TransactionData)>> = vec![
            Box::new(|d: &mut TransactionData| d.from = "ab".repeat(32)),
            Box::new(|d: &mut TransactionData| d.to = "ba".repeat(32)),
            Box::new(|d: &mut TransactionData| d.amount = "1".into()),
            Box::new(|d: &mut TransactionData| d.fee = "2".into()),
            Box::new(|d: &mut TransactionData| d.nonce = 1),
            Box::new(|d: &mut TransactionData| d.timestamp += 1),
        ];
        for mutate in mutations {
            let mut d = data();
            mutate(&mut d);
            assert_ne!(compute_transaction_id(&d), base);
        }
    }

    #[test]
    fn signature_covers_message() {
        let kp = KeyPair::generate();
        let mut d = data();
        d.from = kp.address().to_hex();
        let tx = sign_transaction(d.clone(), &kp);
        assert_eq!(tx.public_key, kp.public_key().to_hex());
        assert!(verify_hex(
            &tx.signature,
            signing_message(&d).as_bytes(),
            &tx.public_key
        ));
    }
}
