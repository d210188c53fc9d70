//! Wire formats of the node API and the strict decode step.
//!
//! Every endpoint except `/health` answers with
//! `{"success": bool, "data": ..., "error": "..."}`. Decoding is two-stage:
//!
//! 1. The envelope. `success: false`, a missing `data`, or a non-2xx status
//!    is a [`SdkError::Network`] and therefore retryable.
//! 2. The payload. A `data` that doesn't match the expected struct is a
//!    [`SdkError::Format`]. Asking again won't fix a schema mismatch, so
//!    this one is fatal.
//!
//! Field names are translated here (`tx_id` becomes `id`, `balance_relyo`
//! becomes `balance_display`) so nothing past this module sees the wire
//! spelling.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::transport::Response;
use crate::error::{SdkError, SdkResult};
use crate::transaction::types::TransactionStatus;
use crate::types::{Address, Amount, TransactionId};

/// Longest slice of an unparseable body quoted back in an error.
const BODY_EXCERPT_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub node_id: String,
    pub state_version: u64,
    pub state_root: String,
    pub peer_count: u64,
    pub is_validator: bool,
    pub mempool_size: u64,
}

/// `GET /account/{address}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub address: Address,
    pub balance: Amount,
    /// Nonce the next transaction from this account must carry.
    pub nonce: u64,
}

/// `GET /balance/{address}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub address: Address,
    /// Wei.
    pub balance: Amount,
    /// Same balance in RELYO, formatted by the node.
    #[serde(rename = "balance_relyo")]
    pub balance_display: String,
}

/// `POST /transaction` and `GET /transaction/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInfo {
    #[serde(rename = "tx_id")]
    pub id: TransactionId,
    pub status: TransactionStatus,
}

/// `GET /health`, the one un-enveloped endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// Response wrapper used by every enveloped endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

/// Decodes an enveloped response. `what` names the call for error messages.
pub fn decode_envelope<T: DeserializeOwned>(what: &str, response: &Response) -> SdkResult<T> {
    let envelope: Envelope<serde_json::Value> = match serde_json::from_str(&response.body) {
        Ok(env) => env,
        // Proxies and crashed nodes answer 5xx with HTML; that's the
        // network's fault, not a schema problem.
        Err(_) if !response.is_success() => {
            return Err(SdkError::network(format!(
                "{what}: HTTP {}: {}",
                response.status,
                excerpt(&response.body)
            )))
        }
        Err(e) => {
            return Err(SdkError::Format(format!(
                "{what}: response is not an API envelope: {e}"
            )))
        }
    };

    if !envelope.success || !response.is_success() {
        let reason = envelope
            .error
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        return Err(SdkError::network(format!("{what}: node rejected request: {reason}")));
    }

    let data = envelope.data.ok_or_else(|| {
        SdkError::network(format!("{what}: response reported success but carried no data"))
    })?;

    serde_json::from_value(data)
        .map_err(|e| SdkError::Format(format!("{what}: malformed response data: {e}")))
}

/// Decodes a bare JSON body (no envelope).
pub fn decode_plain<T: DeserializeOwned>(what: &str, response: &Response) -> SdkResult<T> {
    if !response.is_success() {
        return Err(SdkError::network(format!(
            "{what}: HTTP {}: {}",
            response.status,
            excerpt(&response.body)
        )));
    }
    serde_json::from_str(&response.body)
        .map_err(|e| SdkError::Format(format!("{what}: malformed response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: serde_json::Value) -> Response {
        Response::new(200, body.to_string())
    }

    #[test]
    fn decodes_account() {
        let resp = ok(json!({
            "success": true,
            "data": {"address": "ab".repeat(32), "balance": "5000", "nonce": 3},
            "error": null
        }));
        let acct: AccountInfo = decode_envelope("GET /account", &resp).unwrap();
        assert_eq!(acct.nonce, 3);
        assert_eq!(acct.balance, Amount::from_wei(5000));
    }

    #[test]
    fn translates_field_names() {
        let resp = ok(json!({
            "success": true,
            "data": {"address": "ab".repeat(32), "balance": "1500000000000000000", "balance_relyo": "1.5"}
        }));
        let bal: BalanceInfo = decode_envelope("GET /balance", &resp).unwrap();
        assert_eq!(bal.balance_display, "1.5");

        let resp = ok(json!({
            "success": true,
            "data": {"tx_id": "cd".repeat(32), "status": "pending"}
        }));
        let info: TransactionInfo = decode_envelope("GET /transaction", &resp).unwrap();
        assert_eq!(info.id.to_hex(), "cd".repeat(32));
        assert_eq!(info.status, TransactionStatus::Pending);
    }

    #[test]
    fn unsuccessful_envelope_is_retryable() {
        let resp = Response::new(
            400,
            json!({"success": false, "data": null, "error": "Invalid nonce"}).to_string(),
        );
        let err = decode_envelope::<TransactionInfo>("POST /transaction", &resp).unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("Invalid nonce"));
    }

    #[test]
    fn missing_data_is_retryable_with_its_own_message() {
        let resp = ok(json!({"success": true}));
        let err = decode_envelope::<NodeStatus>("GET /status", &resp).unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("no data"));
    }

    #[test]
    fn mistyped_data_is_a_format_error() {
        let resp = ok(json!({
            "success": true,
            "data": {"address": "ab".repeat(32), "balance": 5000, "nonce": 3}
        }));
        match decode_envelope::<AccountInfo>("GET /account", &resp) {
            Err(SdkError::Format(msg)) => assert!(msg.contains("GET /account")),
            other => panic!("expected Format, got {:?}", other),
        }

        let resp = ok(json!({
            "success": true,
            "data": {"tx_id": "cd".repeat(32), "status": "teleported"}
        }));
        assert!(matches!(
            decode_envelope::<TransactionInfo>("GET /transaction", &resp),
            Err(SdkError::Format(_))
        ));
    }

    #[test]
    fn html_error_page_is_a_network_error() {
        let resp = Response::new(502, "<html>Bad Gateway</html>");
        let err = decode_envelope::<NodeStatus>("GET /status", &resp).unwrap_err();
        assert!(err.is_retryable());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn garbage_with_200_is_fatal() {
        let resp = Response::new(200, "definitely not json");
        assert!(matches!(
            decode_envelope::<NodeStatus>("GET /status", &resp),
            Err(SdkError::Format(_))
        ));
    }

    #[test]
    fn health_is_plain_json() {
        let h: Health = decode_plain("GET /health", &ok(json!({"status": "ok"}))).unwrap();
        assert!(h.is_ok());
        assert!(decode_plain::<Health>("GET /health", &Response::new(503, "")).is_err());
    }

    #[test]
    fn long_bodies_are_truncated_in_errors() {
        let resp = Response::new(500, "x".repeat(10_000));
        let msg = decode_envelope::<NodeStatus>("GET /status", &resp)
            .unwrap_err()
            .to_string();
        assert!(msg.len() < 400);
    }
}
