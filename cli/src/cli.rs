//! # CLI Interface
//!
//! Argument tree for the `relyo` binary, built with `clap` derive. Global
//! flags pick the node and the wallets directory; every one of them has an
//! environment fallback so scripts don't have to repeat themselves.

use clap::{Args, Parser, Subcommand};
use relyo_sdk::Network;
use std::path::PathBuf;

/// RELYO wallet and node client for RAINSONET.
#[derive(Parser, Debug)]
#[command(
    name = "relyo",
    about = "RELYO - RAINSONET payment CLI",
    version,
    propagate_version = true
)]
pub struct RelyoCli {
    /// Network preset: mainnet, testnet or devnet.
    #[arg(long, global = true, env = "RELYO_NETWORK", default_value = "devnet")]
    pub network: Network,

    /// Node URL. Overrides the network preset.
    #[arg(long, short = 'n', global = true, env = "RELYO_NODE_URL")]
    pub node_url: Option<String>,

    /// Directory holding named wallet files.
    #[arg(
        long,
        short = 'w',
        global = true,
        env = "RELYO_WALLETS_DIR",
        default_value = "./wallets"
    )]
    pub wallets_dir: PathBuf,

    /// Log format on stderr: pretty or json.
    #[arg(long, global = true, env = "RELYO_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage named wallets.
    #[command(subcommand)]
    Wallet(WalletCommand),
    /// Deterministic wallets from a seed.
    #[command(subcommand)]
    Hd(HdCommand),
    /// Node status.
    Status,
    /// Node liveness check.
    Health,
    /// Balance of an address or a named wallet.
    Balance(BalanceArgs),
    /// Balance and nonce of an address.
    Account {
        /// Account address (hex).
        address: String,
    },
    /// Status of a submitted transaction.
    Tx {
        /// Transaction id (hex).
        id: String,
    },
    /// Transactions waiting in the node's mempool.
    Mempool,
    /// Sign and submit a transfer.
    Send(SendArgs),
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Create a new wallet with a random key.
    Create {
        /// Wallet name.
        name: String,
    },
    /// Import a wallet from a hex secret key.
    Import {
        /// Wallet name.
        name: String,
        /// Secret key (hex).
        secret: String,
    },
    /// Show address and public key.
    Info {
        /// Wallet name.
        name: String,
    },
    /// Print the secret key.
    Export {
        /// Wallet name.
        name: String,
    },
    /// List stored wallets.
    List,
}

#[derive(Subcommand, Debug)]
pub enum HdCommand {
    /// Print derived addresses. Generates a fresh seed when none is given.
    Derive {
        /// Seed (hex, at least 32 bytes).
        #[arg(long)]
        seed: Option<String>,
        /// Number of wallets to derive.
        #[arg(long, default_value_t = 5)]
        count: u32,
        /// First index.
        #[arg(long, default_value_t = 0)]
        start: u32,
    },
}

#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Address to check.
    #[arg(required_unless_present = "wallet", conflicts_with = "wallet")]
    pub address: Option<String>,

    /// Use a named wallet instead of an address.
    #[arg(long)]
    pub wallet: Option<String>,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Sender wallet name.
    #[arg(long, short = 'f')]
    pub from: String,

    /// Recipient address.
    #[arg(long, short = 't')]
    pub to: String,

    /// Amount in RELYO, e.g. 1.5
    #[arg(long, short = 'a')]
    pub amount: String,

    /// Fee in RELYO. Defaults to 0.001.
    #[arg(long)]
    pub fee: Option<String>,

    /// Nonce to use instead of asking the node.
    #[arg(long)]
    pub nonce: Option<u64>,

    /// Wait until the transaction is confirmed or failed.
    #[arg(long)]
    pub wait: bool,
}
