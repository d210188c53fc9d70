//! Staged construction of transfer parameters.
//!
//! The [`TransactionBuilder`] collects recipient, amount, fee and nonce,
//! validating each one as it is set, and hands back a
//! [`TransactionParams`] for a wallet to sign. It never signs and never
//! touches the network, so it can be driven from anywhere, including UI
//! code that has no key material.

use super::types::TransactionParams;
use crate::error::{SdkError, SdkResult};
use crate::types::{Address, Amount};

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Mutable accumulator for [`TransactionParams`].
///
/// Fallible setters return `SdkResult<&mut Self>`, so a chain short-circuits
/// on the first bad field:
///
/// ```
/// use relyo_sdk::transaction::TransactionBuilder;
///
/// # fn main() -> relyo_sdk::SdkResult<()> {
/// let recipient = "bb".repeat(32);
/// let params = TransactionBuilder::new()
///     .set_recipient(&recipient)?
///     .set_amount(1.5)?
///     .set_fee_wei("1000000000000000")?
///     .set_nonce(7)
///     .build()?;
///
/// assert_eq!(params.nonce, 7);
/// assert_eq!(params.amount.to_string(), "1500000000000000000");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    to: Option<Address>,
    amount: Option<Amount>,
    fee: Option<Amount>,
    nonce: Option<u64>,
    timestamp: Option<u64>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recipient. Anything that isn't 32 bytes of hex is a
    /// [`SdkError::Validation`].
    pub fn set_recipient(&mut self, address: &str) -> SdkResult<&mut Self> {
        let to: Address = address
            .parse()
            .map_err(|_| SdkError::Validation(format!("invalid recipient: {address}")))?;
        self.to = Some(to);
        Ok(self)
    }

    /// Amount in RELYO, converted with `round(x * 10^18)`.
    pub fn set_amount(&mut self, relyo: f64) -> SdkResult<&mut Self> {
        self.amount = Some(Amount::from_display(relyo)?);
        Ok(self)
    }

    /// Amount in wei, as a decimal string.
    pub fn set_amount_wei(&mut self, wei: &str) -> SdkResult<&mut Self> {
        self.amount = Some(Amount::parse_wei(wei)?);
        Ok(self)
    }

    /// Fee in RELYO.
    pub fn set_fee(&mut self, relyo: f64) -> SdkResult<&mut Self> {
        self.fee = Some(Amount::from_display(relyo)?);
        Ok(self)
    }

    /// Fee in wei, as a decimal string.
    pub fn set_fee_wei(&mut self, wei: &str) -> SdkResult<&mut Self> {
        self.fee = Some(Amount::parse_wei(wei)?);
        Ok(self)
    }

    pub fn set_nonce(&mut self, nonce: u64) -> &mut Self {
        self.nonce = Some(nonce);
        self
    }

    /// Pins the timestamp (Unix ms). Left unset, the signer uses "now".
    pub fn set_timestamp(&mut self, timestamp_ms: u64) -> &mut Self {
        self.timestamp = Some(timestamp_ms);
        self
    }

    /// Returns the collected parameters, or the first missing required
    /// field in the order recipient, amount, fee, nonce.
    pub fn build(&self) -> SdkResult<TransactionParams> {
        let to = self
            .to
            .ok_or(SdkError::IncompleteTransaction { field: "recipient" })?;
        let amount = self
            .amount
            .clone()
            .ok_or(SdkError::IncompleteTransaction { field: "amount" })?;
        let fee = self
            .fee
            .clone()
            .ok_or(SdkError::IncompleteTransaction { field: "fee" })?;
        let nonce = self
            .nonce
            .ok_or(SdkError::IncompleteTransaction { field: "nonce" })?;

        Ok(TransactionParams {
            to,
            amount,
            fee,
            nonce,
            timestamp: self.timestamp,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient() -> String {
        "bb".repeat(32)
    }

    #[test]
    fn build_with_all_fields() {
        let params = TransactionBuilder::new()
            .set_recipient(&format!("0x{}", recipient().to_uppercase()))
            .unwrap()
            .set_amount_wei("1000000000000000000")
            .unwrap()
            .set_fee(0.001)
            .unwrap()
            .set_nonce(3)
            .set_timestamp(1_700_000_000_000)
            .build()
            .unwrap();

        assert_eq!(params.to.to_hex(), recipient());
        assert_eq!(params.amount, Amount::from_wei(1_000_000_000_000_000_000));
        assert_eq!(params.fee, Amount::from_wei(1_000_000_000_000_000));
        assert_eq!(params.nonce, 3);
        assert_eq!(params.timestamp, Some(1_700_000_000_000));
    }

    #[test]
    fn bad_recipient_fails_immediately() {
        let mut builder = TransactionBuilder::new();
        match builder.set_recipient("0x1234") {
            Err(SdkError::Validation(_)) => {}
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn bad_amounts_fail_immediately() {
        let mut builder = TransactionBuilder::new();
        assert!(builder.set_amount(-1.0).is_err());
        assert!(builder.set_amount_wei("12.5").is_err());
        assert!(builder.set_fee_wei("-3").is_err());
        assert!(builder.set_fee(f64::NAN).is_err());
    }

    #[test]
    fn missing_fields_are_named() {
        let mut builder = TransactionBuilder::new();
        let missing = |b: &TransactionBuilder| match b.build() {
            Err(SdkError::IncompleteTransaction { field }) => field,
            other => panic!("expected IncompleteTransaction, got {:?}", other),
        };

        assert_eq!(missing(&builder), "recipient");
        builder.set_recipient(&recipient()).unwrap();
        assert_eq!(missing(&builder), "amount");
        builder.set_amount(1.0).unwrap();
        assert_eq!(missing(&builder), "fee");
        builder.set_fee_wei("0").unwrap();
        assert_eq!(missing(&builder), "nonce");
        builder.set_nonce(0);
        assert!(builder.build().is_ok());
    }

    #[test]
    fn timestamp_is_optional() {
        let params = TransactionBuilder::new()
            .set_recipient(&recipient())
            .unwrap()
            .set_amount(1.0)
            .unwrap()
            .set_fee(0.0)
            .unwrap()
            .set_nonce(1)
            .build()
            .unwrap();
        assert_eq!(params.timestamp, None);
    }

    #[test]
    fn later_setters_overwrite() {
        let mut builder = TransactionBuilder::new();
        builder.set_nonce(1).set_nonce(2);
        builder.set_amount_wei("5").unwrap().set_amount_wei("6").unwrap();
        builder.set_recipient(&recipient()).unwrap().set_fee_wei("1").unwrap();
        let params = builder.build().unwrap();
        assert_eq!(params.nonce, 2);
        assert_eq!(params.amount, Amount::from_wei(6));
    }
}
