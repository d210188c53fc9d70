//! # Node Client
//!
//! Typed access to a RAINSONET node. Every call goes through one pipeline:
//!
//! ```text
//! Request ──► per-call timeout ──► Transport ──► envelope decode
//!                  ▲                                  │
//!                  └──── backoff: base * 2^(n-1) ◄────┘  (Network / Timeout only)
//! ```
//!
//! After the last attempt the error is returned with its attempt count
//! filled in. `Format` and `Validation` errors short-circuit: a payload that
//! doesn't decode won't decode the second time either.
//!
//! The client holds no mutable state. Clone it, share it, call it from as
//! many tasks as you like.

use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

use super::transport::{HttpTransport, Request, Response, Transport};
use super::wire::{
    decode_envelope, decode_plain, AccountInfo, BalanceInfo, Health, NodeStatus, TransactionInfo,
};
use crate::codec::normalize_address;
use crate::config::{
    ClientConfig, DEFAULT_CONFIRMATION_TIMEOUT_MS, DEFAULT_FEE_WEI, DEFAULT_POLL_INTERVAL_MS,
};
use crate::error::{SdkError, SdkResult};
use crate::transaction::types::SignedTransaction;
use crate::types::{Amount, AmountInput, TransactionId};
use crate::wallet::Wallet;

/// Input to [`NodeClient::send`].
#[derive(Debug, Clone)]
pub struct SendRequest<'a> {
    pub wallet: &'a Wallet,
    pub to: String,
    pub amount: AmountInput,
    /// Defaults to 0.001 RELYO.
    pub fee: Option<AmountInput>,
}

impl<'a> SendRequest<'a> {
    pub fn new(wallet: &'a Wallet, to: impl Into<String>, amount: impl Into<AmountInput>) -> Self {
        Self {
            wallet,
            to: to.into(),
            amount: amount.into(),
            fee: None,
        }
    }

    pub fn with_fee(mut self, fee: impl Into<AmountInput>) -> Self {
        self.fee = Some(fee.into());
        self
    }
}

/// Bounds for [`NodeClient::wait_for_transaction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    pub timeout_ms: u64,
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_CONFIRMATION_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Client for one node. Generic over the [`Transport`] so tests and
/// embedders can swap the HTTP layer out.
#[derive(Debug, Clone)]
pub struct NodeClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl NodeClient<HttpTransport> {
    /// HTTP client pointed at `config.base_url()`.
    pub fn new(config: ClientConfig) -> SdkResult<Self> {
        let transport = HttpTransport::from_config(&config)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> NodeClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Pipeline
    // -----------------------------------------------------------------------

    async fn execute<R, D>(&self, request: Request, decode: D) -> SdkResult<R>
    where
        D: Fn(&str, &Response) -> SdkResult<R>,
    {
        let what = request.describe();
        let max_attempts = self.config.max_attempts();
        let call_timeout = self.config.timeout();

        let mut attempt = 1;
        loop {
            let outcome = match timeout(call_timeout, self.transport.send(request.clone())).await {
                Ok(Ok(response)) => decode(&what, &response),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(SdkError::Timeout {
                    what: what.clone(),
                    after_ms: self.config.timeout_ms,
                    attempts: attempt,
                }),
            };

            let err = match outcome {
                Ok(value) => {
                    debug!(request = %what, attempt, "request succeeded");
                    return Ok(value);
                }
                Err(e) => e,
            };

            if !err.is_retryable() {
                return Err(err);
            }
            if attempt >= max_attempts {
                return Err(err.with_attempts(attempt));
            }

            let delay = self.config.backoff_for(attempt);
            warn!(
                request = %what,
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "request failed, retrying"
            );
            sleep(delay).await;
            attempt += 1;
        }
    }

    async fn get<R: DeserializeOwned>(&self, path: String) -> SdkResult<R> {
        self.execute(Request::get(path), |what, resp| decode_envelope(what, resp))
            .await
    }

    // -----------------------------------------------------------------------
    // Endpoints
    // -----------------------------------------------------------------------

    /// `GET /status`
    pub async fn get_status(&self) -> SdkResult<NodeStatus> {
        self.get("/status".to_string()).await
    }

    /// `GET /health`. Not enveloped.
    pub async fn health(&self) -> SdkResult<Health> {
        self.execute(Request::get("/health"), |what, resp| decode_plain(what, resp))
            .await
    }

    /// `GET /account/{address}`. A malformed address fails locally with
    /// [`SdkError::Validation`] and never reaches the node.
    pub async fn get_account(&self, address: &str) -> SdkResult<AccountInfo> {
        let address = normalize_address(address)?;
        self.get(format!("/account/{address}")).await
    }

    /// `GET /balance/{address}`
    pub async fn get_balance(&self, address: &str) -> SdkResult<BalanceInfo> {
        let address = normalize_address(address)?;
        self.get(format!("/balance/{address}")).await
    }

    /// The nonce the next transaction from `address` must carry.
    pub async fn get_nonce(&self, address: &str) -> SdkResult<u64> {
        Ok(self.get_account(address).await?.nonce)
    }

    /// `POST /transaction`
    pub async fn submit_transaction(&self, tx: &SignedTransaction) -> SdkResult<TransactionInfo> {
        let body = serde_json::to_value(tx)?;
        let info: TransactionInfo = self
            .execute(Request::post("/transaction", body), |what, resp| {
                decode_envelope(what, resp)
            })
            .await?;
        info!(
            tx_id = %info.id,
            from = %tx.from_address(),
            nonce = tx.nonce(),
            status = %info.status,
            "transaction submitted"
        );
        Ok(info)
    }

    /// `GET /transaction/{id}`
    pub async fn get_transaction(&self, id: &str) -> SdkResult<TransactionInfo> {
        let id: TransactionId = id
            .parse()
            .map_err(|_| SdkError::Validation(format!("invalid transaction id: {id}")))?;
        self.get(format!("/transaction/{id}")).await
    }

    /// `GET /mempool`: ids of transactions the node holds but hasn't
    /// included yet.
    pub async fn get_mempool(&self) -> SdkResult<Vec<TransactionId>> {
        self.get("/mempool".to_string()).await
    }

    // -----------------------------------------------------------------------
    // Compositions
    // -----------------------------------------------------------------------

    /// Fetch nonce, sign, submit.
    ///
    /// Not atomic. Two concurrent sends from the same wallet can read the
    /// same nonce and the node will reject one of them. Serialize sends per
    /// wallet if that matters to you.
    pub async fn send(&self, request: SendRequest<'_>) -> SdkResult<TransactionInfo> {
        let to = normalize_address(&request.to)?;
        let amount = request.amount.to_wei()?;
        let fee = match &request.fee {
            Some(fee) => fee.to_wei()?,
            None => Amount::from_wei(DEFAULT_FEE_WEI),
        };

        let from = request.wallet.address().to_hex();
        let nonce = self.get_nonce(&from).await?;
        let tx = request
            .wallet
            .create_transaction(&to, amount, fee, nonce, None)?;
        self.submit_transaction(&tx).await
    }

    /// Polls [`get_transaction`](Self::get_transaction) until the status is
    /// terminal.
    ///
    /// Fails with [`SdkError::Timeout`] once `timeout_ms` has elapsed. Each
    /// poll, retries included, only gets the time left before the deadline,
    /// and the last sleep is clipped the same way, so the error arrives no
    /// later than `timeout_ms + poll_interval_ms` even against a hung node.
    pub async fn wait_for_transaction(
        &self,
        id: &str,
        options: WaitOptions,
    ) -> SdkResult<TransactionInfo> {
        let deadline = Duration::from_millis(options.timeout_ms);
        let interval = Duration::from_millis(options.poll_interval_ms);
        let started = Instant::now();
        let mut polls = 0u32;
        let expired = |polls| SdkError::Timeout {
            what: format!("transaction {id}"),
            after_ms: options.timeout_ms,
            attempts: polls,
        };

        loop {
            polls += 1;
            let remaining = deadline.saturating_sub(started.elapsed());
            let info = match timeout(remaining, self.get_transaction(id)).await {
                Ok(result) => result?,
                Err(_) => {
                    warn!(tx_id = %id, polls, "node did not answer before the wait deadline");
                    return Err(expired(polls));
                }
            };
            if info.status.is_terminal() {
                info!(tx_id = %info.id, status = %info.status, polls, "transaction final");
                return Ok(info);
            }

            let elapsed = started.elapsed();
            if elapsed >= deadline {
                return Err(expired(polls));
            }
            debug!(tx_id = %id, status = %info.status, polls, "transaction not final yet");
            sleep(interval.min(deadline - elapsed)).await;
        }
    }
}
