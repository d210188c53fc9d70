//! Transaction validation: structural checks and signature verification.
//!
//! [`TransactionValidator`] is the gate every [`SignedTransaction`] passes
//! before it is trusted, wherever it came from. It is stateless and never
//! fails: a bad transaction is a normal outcome with a reason attached.
//!
//! The checks run cheapest first and stop at the first failure:
//!
//! 1. **Sender**: `from` is a 32-byte hex address.
//! 2. **Recipient**: `to` is a 32-byte hex address.
//! 3. **Amount**: a non-negative decimal integer.
//! 4. **Fee**: a non-negative decimal integer.
//! 5. **Self-transfer**: `from` and `to` differ.
//! 6. **Sender binding**: `BLAKE3(public_key)` equals `from`. Without this
//!    a valid signature from any key would be accepted for any sender.
//! 7. **Signature**: Ed25519 over the signing message, checked against the
//!    transaction's own public key.
//! 8. **Policy** (opt-in): minimum fee, maximum amount and maximum age.

use chrono::Utc;
use thiserror::Error;

use super::signing::{compute_transaction_id, signing_message};
use super::types::SignedTransaction;
use crate::config::{DEFAULT_FEE_WEI, DEFAULT_TX_MAX_AGE_MS};
use crate::crypto::keys::PublicKey;
use crate::crypto::signatures::verify_hex;
use crate::error::SdkResult;
use crate::types::{Address, Amount, TransactionId};

// ---------------------------------------------------------------------------
// Rejection reasons
// ---------------------------------------------------------------------------

/// Why a transaction was rejected. Each check has its own variant and its
/// own message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("invalid sender address")]
    InvalidSender,

    #[error("invalid recipient address")]
    InvalidRecipient,

    #[error("invalid amount: must be a non-negative integer")]
    InvalidAmount,

    #[error("invalid fee: must be a non-negative integer")]
    InvalidFee,

    #[error("self-transfer: sender and recipient are the same address")]
    SelfTransfer,

    #[error("public key does not match sender address")]
    SenderKeyMismatch,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("fee {fee} is below the minimum {minimum}")]
    FeeTooLow { fee: Amount, minimum: Amount },

    #[error("amount {amount} exceeds the maximum {maximum}")]
    AmountTooHigh { amount: Amount, maximum: Amount },

    #[error("transaction expired: {age_ms}ms old, limit {max_age_ms}ms")]
    Expired { age_ms: u64, max_age_ms: u64 },
}

/// Outcome of [`TransactionValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: Option<String>,
}

impl From<Result<(), Rejection>> for ValidationResult {
    fn from(r: Result<(), Rejection>) -> Self {
        match r {
            Ok(()) => Self {
                valid: true,
                reason: None,
            },
            Err(rejection) => Self {
                valid: false,
                reason: Some(rejection.to_string()),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Economic limits a node enforces on top of structural validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub min_fee: Amount,
    pub max_amount: Amount,
    /// Oldest acceptable `timestamp`, relative to the local clock. Future
    /// timestamps are never expired.
    pub max_age_ms: Option<u64>,
}

impl ValidationPolicy {
    /// RELYO defaults: 0.001 RELYO minimum fee, 1,000,000 RELYO per transfer,
    /// one hour of validity.
    pub fn relyo_defaults() -> Self {
        Self {
            min_fee: Amount::from_wei(DEFAULT_FEE_WEI),
            max_amount: Amount::from_wei(1_000_000_000_000_000_000_000_000),
            max_age_ms: Some(DEFAULT_TX_MAX_AGE_MS),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionValidator
// ---------------------------------------------------------------------------

/// Stateless acceptance check for signed transactions.
#[derive(Debug, Clone, Default)]
pub struct TransactionValidator {
    policy: Option<ValidationPolicy>,
}

impl TransactionValidator {
    /// Structural and signature checks only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the policy checks after the signature check.
    pub fn with_policy(policy: ValidationPolicy) -> Self {
        Self {
            policy: Some(policy),
        }
    }

    pub fn policy(&self) -> Option<&ValidationPolicy> {
        self.policy.as_ref()
    }

    /// Runs every check and returns the first rejection.
    pub fn check(&self, tx: &SignedTransaction) -> Result<(), Rejection> {
        let now_ms = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.check_at(tx, now_ms)
    }

    /// [`check`](Self::check) with an explicit clock, in Unix milliseconds.
    /// Only the policy's age limit looks at `now_ms`.
    pub fn check_at(&self, tx: &SignedTransaction, now_ms: u64) -> Result<(), Rejection> {
        let data = &tx.data;

        // 1-2. Addresses.
        let from: Address = data.from.parse().map_err(|_| Rejection::InvalidSender)?;
        let to: Address = data.to.parse().map_err(|_| Rejection::InvalidRecipient)?;

        // 3-4. Amounts.
        let amount = Amount::parse_wei(&data.amount).map_err(|_| Rejection::InvalidAmount)?;
        let fee = Amount::parse_wei(&data.fee).map_err(|_| Rejection::InvalidFee)?;

        // 5. Compared as bytes, so "0xAB.." and "ab.." are the same account.
        if from == to {
            return Err(Rejection::SelfTransfer);
        }

        // 6. The key that signed must be the key that owns `from`.
        if !Self::verify_sender_binding(tx) {
            return Err(Rejection::SenderKeyMismatch);
        }

        // 7. Signature over the message rebuilt from the transaction itself.
        if !Self::verify_signature(tx) {
            return Err(Rejection::InvalidSignature);
        }

        // 8. Policy.
        if let Some(policy) = &self.policy {
            if fee < policy.min_fee {
                return Err(Rejection::FeeTooLow {
                    fee,
                    minimum: policy.min_fee.clone(),
                });
            }
            if amount > policy.max_amount {
                return Err(Rejection::AmountTooHigh {
                    amount,
                    maximum: policy.max_amount.clone(),
                });
            }
            if let Some(max_age_ms) = policy.max_age_ms {
                let age_ms = now_ms.saturating_sub(data.timestamp);
                if age_ms > max_age_ms {
                    return Err(Rejection::Expired { age_ms, max_age_ms });
                }
            }
        }

        Ok(())
    }

    /// [`check`](Self::check) as a `(valid, reason)` pair.
    pub fn validate(&self, tx: &SignedTransaction) -> ValidationResult {
        self.check(tx).into()
    }

    /// The signature check on its own: does `tx.signature` verify over the
    /// canonical signing message under `tx.public_key`?
    ///
    /// Says nothing about whether that key owns `tx.from`.
    pub fn verify_signature(tx: &SignedTransaction) -> bool {
        verify_hex(
            &tx.signature,
            signing_message(&tx.data).as_bytes(),
            &tx.public_key,
        )
    }

    /// `true` iff `tx.public_key` hashes to `tx.from`.
    pub fn verify_sender_binding(tx: &SignedTransaction) -> bool {
        match (
            PublicKey::from_hex(&tx.public_key),
            tx.data.from.parse::<Address>(),
        ) {
            (Ok(pk), Ok(from)) => pk.to_address() == from,
            _ => false,
        }
    }

    pub fn compute_transaction_id(tx: &SignedTransaction) -> TransactionId {
        compute_transaction_id(&tx.data)
    }

    /// `amount + fee` without any fixed-width overflow.
    ///
    /// Errors only when one of the two fields isn't a decimal integer.
    pub fn compute_total_cost(tx: &SignedTransaction) -> SdkResult<Amount> {
        let amount = Amount::parse_wei(&tx.data.amount)?;
        let fee = Amount::parse_wei(&tx.data.fee)?;
        Ok(amount.checked_add(&fee))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::transaction::signing::sign_transaction;
    use crate::transaction::types::TransactionData;

    /// Helper: a valid transaction from a fresh key.
    fn valid_signed_tx() -> (SignedTransaction, KeyPair) {
        let kp = KeyPair::generate();
        let data = TransactionData {
            from: kp.address().to_hex(),
            to: KeyPair::generate().address().to_hex(),
            amount: "1000".into(),
            fee: "1000000000000000".into(),
            nonce: 1,
            timestamp: u64::try_from(Utc::now().timestamp_millis()).unwrap(),
        };
        (sign_transaction(data, &kp), kp)
    }

    fn resign(tx: &SignedTransaction, kp: &KeyPair) -> SignedTransaction {
        sign_transaction(tx.data.clone(), kp)
    }

    #[test]
    fn valid_transaction_passes() {
        let (tx, _) = valid_signed_tx();
        let result = TransactionValidator::new().validate(&tx);
        assert!(result.valid);
        assert_eq!(result.reason, None);
    }

    #[test]
    fn rejects_bad_sender() {
        let (mut tx, _) = valid_signed_tx();
        tx.data.from = "nope".into();
        assert_eq!(
            TransactionValidator::new().check(&tx),
            Err(Rejection::InvalidSender)
        );
    }

    #[test]
    fn rejects_bad_recipient() {
        let (mut tx, kp) = valid_signed_tx();
        tx.data.to = "ab".repeat(31);
        let tx = resign(&tx, &kp);
        assert_eq!(
            TransactionValidator::new().check(&tx),
            Err(Rejection::InvalidRecipient)
        );
    }

    #[test]
    fn rejects_non_integer_amount_and_fee() {
        let (mut tx, kp) = valid_signed_tx();
        tx.data.amount = "1.5".into();
        let bad_amount = resign(&tx, &kp);
        assert_eq!(
            TransactionValidator::new().check(&bad_amount),
            Err(Rejection::InvalidAmount)
        );

        let (mut tx, kp) = valid_signed_tx();
        tx.data.fee = "-1".into();
        let bad_fee = resign(&tx, &kp);
        assert_eq!(
            TransactionValidator::new().check(&bad_fee),
            Err(Rejection::InvalidFee)
        );
    }

    #[test]
    fn rejects_self_transfer_regardless_of_signature() {
        let (mut tx, kp) = valid_signed_tx();
        tx.data.to = tx.data.from.to_uppercase();
        let signed = resign(&tx, &kp);
        assert_eq!(
            TransactionValidator::new().check(&signed),
            Err(Rejection::SelfTransfer)
        );

        // Same answer with garbage in the signature and key.
        let mut garbage = signed.clone();
        garbage.signature = "00".into();
        garbage.public_key = "zz".into();
        assert_eq!(
            TransactionValidator::new().check(&garbage),
            Err(Rejection::SelfTransfer)
        );
    }

    #[test]
    fn rejects_foreign_key() {
        // Signed correctly, but by a key that doesn't own `from`.
        let (tx, _) = valid_signed_tx();
        let mallory = KeyPair::generate();
        let forged = resign(&tx, &mallory);

        assert!(TransactionValidator::verify_signature(&forged));
        assert!(!TransactionValidator::verify_sender_binding(&forged));
        assert_eq!(
            TransactionValidator::new().check(&forged),
            Err(Rejection::SenderKeyMismatch)
        );
    }

    #[test]
    fn rejects_tampered_fields() {
        let (tx, _) = valid_signed_tx();
        let mut tampered = tx.clone();
        tampered.data.nonce += 1;
        match TransactionValidator::new().check(&tampered) {
            Err(Rejection::InvalidSignature) => {}
            other => panic!("expected InvalidSignature, got {:?}", other),
        }
    }

    #[test]
    fn validation_never_panics_on_junk() {
        let junk = SignedTransaction {
            data: TransactionData {
                from: "".into(),
                to: "".into(),
                amount: "".into(),
                fee: "".into(),
                nonce: u64::MAX,
                timestamp: 0,
            },
            public_key: "".into(),
            signature: "".into(),
        };
        let result = TransactionValidator::new().validate(&junk);
        assert!(!result.valid);
        assert!(result.reason.is_some());
    }

    #[test]
    fn reasons_are_distinct() {
        let all = [
            Rejection::InvalidSender,
            Rejection::InvalidRecipient,
            Rejection::InvalidAmount,
            Rejection::InvalidFee,
            Rejection::SelfTransfer,
            Rejection::SenderKeyMismatch,
            Rejection::InvalidSignature,
            Rejection::Expired {
                age_ms: 2,
                max_age_ms: 1,
            },
        ];
        let mut messages: Vec<String> = all.iter().map(ToString::to_string).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), all.len());
    }

    #[test]
    fn policy_runs_after_signature() {
        let (tx, kp) = valid_signed_tx();
        let strict = TransactionValidator::with_policy(ValidationPolicy::relyo_defaults());
        assert!(strict.validate(&tx).valid);

        let mut cheap = tx.clone();
        cheap.data.fee = "1".into();
        let cheap = resign(&cheap, &kp);
        assert!(TransactionValidator::new().validate(&cheap).valid);
        match strict.check(&cheap) {
            Err(Rejection::FeeTooLow { .. }) => {}
            other => panic!("expected FeeTooLow, got {:?}", other),
        }

        let mut whale = tx.clone();
        whale.data.amount = "1000000000000000000000001".into();
        let whale = resign(&whale, &kp);
        match strict.check(&whale) {
            Err(Rejection::AmountTooHigh { .. }) => {}
            other => panic!("expected AmountTooHigh, got {:?}", other),
        }
    }

    #[test]
    fn stale_transaction_expires_under_policy() {
        let (mut tx, kp) = valid_signed_tx();
        tx.data.timestamp = 1;
        let stale = resign(&tx, &kp);

        // Structurally fine and correctly signed.
        assert!(TransactionValidator::new().validate(&stale).valid);

        let strict = TransactionValidator::with_policy(ValidationPolicy::relyo_defaults());
        let result = strict.validate(&stale);
        assert!(!result.valid);
        assert!(result.reason.unwrap().contains("expired"));
        match strict.check(&stale) {
            Err(Rejection::Expired { max_age_ms, .. }) => {
                assert_eq!(max_age_ms, DEFAULT_TX_MAX_AGE_MS)
            }
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn age_limit_is_inclusive_and_ignores_future_timestamps() {
        let (mut tx, kp) = valid_signed_tx();
        tx.data.timestamp = 10_000;
        let tx = resign(&tx, &kp);
        let policy = ValidationPolicy {
            max_age_ms: Some(1_000),
            ..ValidationPolicy::relyo_defaults()
        };
        let strict = TransactionValidator::with_policy(policy.clone());

        assert_eq!(strict.check_at(&tx, 11_000), Ok(()));
        assert_eq!(
            strict.check_at(&tx, 11_001),
            Err(Rejection::Expired {
                age_ms: 1_001,
                max_age_ms: 1_000
            })
        );
        assert_eq!(strict.check_at(&tx, 5_000), Ok(()));

        let ageless = TransactionValidator::with_policy(ValidationPolicy {
            max_age_ms: None,
            ..policy
        });
        assert_eq!(ageless.check_at(&tx, u64::MAX), Ok(()));
    }

    #[test]
    fn total_cost_is_arbitrary_precision() {
        let (mut tx, _) = valid_signed_tx();
        tx.data.amount = u128::MAX.to_string();
        tx.data.fee = u128::MAX.to_string();
        let total = TransactionValidator::compute_total_cost(&tx).unwrap();
        let expected = Amount::from_wei(u128::MAX).checked_add(&Amount::from_wei(u128::MAX));
        assert_eq!(total, expected);
        assert!(total > Amount::from_wei(u128::MAX));
    }

    #[test]
    fn id_ignores_signature() {
        let (tx, _) = valid_signed_tx();
        let mut other = tx.clone();
        other.signature = "00".repeat(64);
        assert_eq!(
            TransactionValidator::compute_transaction_id(&tx),
            TransactionValidator::compute_transaction_id(&other)
        );
    }
}
