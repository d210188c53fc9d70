//! # SDK Configuration & Constants
//!
//! Every number the SDK agrees on with a RAINSONET node lives here. Some of
//! them are wire contract (the signing tag, the decimals); changing those
//! silently turns every signature this crate produces into garbage as far
//! as the node is concerned. The rest are client defaults and can be tuned
//! per [`ClientConfig`].
//!
//! There is no global "current network". A [`ClientConfig`] is built once,
//! handed to a client, and never mutated behind anyone's back.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

// ---------------------------------------------------------------------------
// Wire Contract
// ---------------------------------------------------------------------------

/// Prefix of every transaction signing message. Shared with the verifying
/// node, so a transaction signature can never be replayed as a signature
/// over anything else.
pub const SIGNING_DOMAIN_TAG: &str = "RELYO_TX:";

/// RELYO has 18 decimals. One RELYO is `10^18` wei.
pub const DECIMALS: u32 = 18;

/// One RELYO expressed in wei.
pub const ONE_RELYO_WEI: u128 = 1_000_000_000_000_000_000;

/// Default fee for `send`: 0.001 RELYO, the node's minimum fee.
pub const DEFAULT_FEE_WEI: u128 = 1_000_000_000_000_000;

/// How long a signed transaction stays acceptable to a node: one hour.
pub const DEFAULT_TX_MAX_AGE_MS: u64 = 3_600_000;

// ---------------------------------------------------------------------------
// Key Material
// ---------------------------------------------------------------------------

/// Ed25519 secret key length.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Addresses are a full BLAKE3 digest.
pub const ADDRESS_LENGTH: usize = 32;

/// Shortest seed `HdWallet::from_seed` accepts.
pub const MIN_HD_SEED_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Client Defaults
// ---------------------------------------------------------------------------

/// Per-call deadline.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Total attempts per request, the first one included.
pub const DEFAULT_RETRIES: u32 = 3;

/// Backoff before the second attempt. Doubles after every failure.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1_000;

/// How long `wait_for_transaction` keeps polling by default.
pub const DEFAULT_CONFIRMATION_TIMEOUT_MS: u64 = 60_000;

/// Gap between two `wait_for_transaction` polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;

// ---------------------------------------------------------------------------
// Networks
// ---------------------------------------------------------------------------

/// Named RAINSONET deployments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    /// Local single-node setup. The default, because that's what you run
    /// while developing against this crate.
    #[default]
    Devnet,
}

impl Network {
    /// Chain id as assigned in the genesis configuration.
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Testnet => 2,
            Self::Devnet => 3,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mainnet => "RAINSONET Mainnet",
            Self::Testnet => "RAINSONET Testnet",
            Self::Devnet => "RAINSONET Devnet",
        }
    }

    /// Preset node API URL. Override with [`ClientConfig::node_url`] when
    /// talking to your own node.
    pub fn default_url(self) -> &'static str {
        match self {
            Self::Mainnet => "https://mainnet.rainsonet.io",
            Self::Testnet => "https://testnet.rainsonet.io",
            Self::Devnet => "http://127.0.0.1:8080",
        }
    }

    /// Short lowercase name, the same string [`FromStr`] accepts.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Devnet => "devnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "devnet" => Ok(Self::Devnet),
            other => Err(SdkError::Validation(format!("unknown network: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Settings for one `NodeClient`.
///
/// Deserializable so an application can keep it next to its own settings:
///
/// ```
/// use relyo_sdk::config::{ClientConfig, Network};
///
/// let cfg: ClientConfig = serde_json::from_str(r#"{"network":"testnet","retries":5}"#).unwrap();
/// assert_eq!(cfg.network, Network::Testnet);
/// assert_eq!(cfg.retries, 5);
/// assert_eq!(cfg.timeout_ms, 30_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub network: Network,
    /// Explicit node URL. Wins over the network preset.
    pub node_url: Option<String>,
    pub timeout_ms: u64,
    /// Total attempts per request. Zero is treated as one.
    pub retries: u32,
    pub retry_base_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            node_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retries: DEFAULT_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

impl ClientConfig {
    /// Defaults for the given network.
    pub fn for_network(network: Network) -> Self {
        Self {
            network,
            ..Self::default()
        }
    }

    pub fn with_node_url(mut self, url: impl Into<String>) -> Self {
        self.node_url = Some(url.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_retry_base_delay_ms(mut self, delay_ms: u64) -> Self {
        self.retry_base_delay_ms = delay_ms;
        self
    }

    /// The URL requests go to, without a trailing slash.
    pub fn base_url(&self) -> String {
        let url = self
            .node_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_url());
        url.trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Attempts the pipeline will make, never less than one.
    pub fn max_attempts(&self) -> u32 {
        self.retries.max(1)
    }

    /// Backoff after failed attempt `attempt` (1-based):
    /// `base * 2^(attempt - 1)`.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let shift = attempt.saturating_sub(1).min(31);
        Duration::from_millis(self.retry_base_delay_ms.saturating_mul(1u64 << shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_ids_are_distinct() {
        assert_eq!(Network::Mainnet.chain_id(), 1);
        assert_eq!(Network::Testnet.chain_id(), 2);
        assert_eq!(Network::Devnet.chain_id(), 3);
    }

    #[test]
    fn test_network_parsing() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(" TestNet ".parse::<Network>().unwrap(), Network::Testnet);
        assert!("moonnet".parse::<Network>().is_err());
        assert_eq!(Network::Devnet.to_string(), "devnet");
    }

    #[test]
    fn test_defaults() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.network, Network::Devnet);
        assert_eq!(cfg.timeout_ms, 30_000);
        assert_eq!(cfg.retries, 3);
        assert_eq!(cfg.base_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_node_url_overrides_preset() {
        let cfg = ClientConfig::for_network(Network::Mainnet).with_node_url("http://10.0.0.7:8080/");
        assert_eq!(cfg.base_url(), "http://10.0.0.7:8080");
    }

    #[test]
    fn test_backoff_doubles() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.backoff_for(1), Duration::from_millis(1_000));
        assert_eq!(cfg.backoff_for(2), Duration::from_millis(2_000));
        assert_eq!(cfg.backoff_for(3), Duration::from_millis(4_000));
    }

    #[test]
    fn test_zero_retries_still_tries_once() {
        assert_eq!(ClientConfig::default().with_retries(0).max_attempts(), 1);
    }

    #[test]
    fn test_unit_constants_agree() {
        assert_eq!(ONE_RELYO_WEI, 10u128.pow(DECIMALS));
        assert_eq!(DEFAULT_FEE_WEI * 1_000, ONE_RELYO_WEI);
        assert!(SIGNING_DOMAIN_TAG.ends_with(':'));
    }
}
