// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # RELYO CLI
//!
//! Entry point for the `relyo` binary. Parses arguments, initializes
//! logging, and hands each subcommand to the SDK:
//!
//! - `wallet`: create, import, inspect and list named wallets
//! - `hd`: derive deterministic wallets from a seed
//! - `status`, `health`, `mempool`: node queries
//! - `balance`, `account`, `tx`: account and transaction lookups
//! - `send`: sign and submit a transfer, optionally wait for it

mod cli;
mod keystore;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;

use relyo_sdk::client::{NodeStatus, TransactionInfo};
use relyo_sdk::config::DEFAULT_FEE_WEI;
use relyo_sdk::{Amount, ClientConfig, HdWallet, NodeClient, SendRequest, WaitOptions};

use cli::{BalanceArgs, Commands, HdCommand, RelyoCli, SendArgs, WalletCommand};
use keystore::Keystore;
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = RelyoCli::parse();
    logging::init_logging(
        logging::DEFAULT_FILTER,
        LogFormat::from_str_lossy(&cli.log_format),
    );

    let keystore = Keystore::new(&cli.wallets_dir);
    let mut config = ClientConfig::for_network(cli.network);
    if let Some(url) = &cli.node_url {
        config = config.with_node_url(url);
    }

    match cli.command {
        Commands::Wallet(cmd) => wallet_command(cmd, &keystore),
        Commands::Hd(cmd) => hd_command(cmd),
        Commands::Status => {
            let status = connect(config)?.get_status().await?;
            print_status(&status);
            Ok(())
        }
        Commands::Health => {
            let health = connect(config)?.health().await?;
            println!("Node health: {}", health.status);
            if !health.is_ok() {
                anyhow::bail!("node reports unhealthy status '{}'", health.status);
            }
            Ok(())
        }
        Commands::Balance(args) => balance(args, config, &keystore).await,
        Commands::Account { address } => {
            let account = connect(config)?.get_account(&address).await?;
            println!("Address: {}", account.address);
            println!("Balance: {} RELYO", account.balance.to_display_string());
            println!("Nonce:   {}", account.nonce);
            Ok(())
        }
        Commands::Tx { id } => {
            let info = connect(config)?.get_transaction(&id).await?;
            print_tx(&info);
            Ok(())
        }
        Commands::Mempool => {
            let ids = connect(config)?.get_mempool().await?;
            if ids.is_empty() {
                println!("Mempool is empty.");
            } else {
                println!("{} pending transaction(s):", ids.len());
                for id in ids {
                    println!("  {id}");
                }
            }
            Ok(())
        }
        Commands::Send(args) => send(args, config, &keystore).await,
    }
}

fn connect(config: ClientConfig) -> Result<NodeClient> {
    tracing::debug!(url = %config.base_url(), network = %config.network, "connecting");
    NodeClient::new(config).context("failed to set up node client")
}

fn wallet_command(cmd: WalletCommand, keystore: &Keystore) -> Result<()> {
    match cmd {
        WalletCommand::Create { name } => {
            let named = keystore.create(&name)?;
            println!("Wallet '{}' created.", named.name);
            println!("Address: {}", named.wallet.address());
        }
        WalletCommand::Import { name, secret } => {
            let named = keystore.import(&name, &secret)?;
            println!("Wallet '{}' imported.", named.name);
            println!("Address: {}", named.wallet.address());
        }
        WalletCommand::Info { name } => {
            let named = keystore.get(&name)?;
            println!("Wallet:     {}", named.name);
            println!("Address:    {}", named.wallet.address());
            println!("Public key: {}", named.wallet.public_key());
            println!("Created:    {}", named.created_at.to_rfc3339());
        }
        WalletCommand::Export { name } => {
            let named = keystore.get(&name)?;
            eprintln!("Keep this secret key safe. Anyone holding it controls the funds.");
            println!("{}", named.wallet.export_secret_key());
        }
        WalletCommand::List => {
            let wallets = keystore.list()?;
            if wallets.is_empty() {
                println!("No wallets in {}.", keystore.dir().display());
            } else {
                println!("{:<20} Address", "Name");
                println!("{:-<20} {:-<64}", "", "");
                for w in wallets {
                    println!("{:<20} {}", w.name, w.address);
                }
            }
        }
    }
    Ok(())
}

fn hd_command(cmd: HdCommand) -> Result<()> {
    match cmd {
        HdCommand::Derive { seed, count, start } => {
            let hd = match seed {
                Some(hex) => HdWallet::from_seed_hex(&hex).context("seed rejected")?,
                None => {
                    let hd = HdWallet::generate();
                    eprintln!("Generated a new seed. Back it up; it recreates every wallet below.");
                    println!("Seed: {}", hd.seed_hex());
                    hd
                }
            };
            for (offset, wallet) in hd.derive_wallets(count, start)?.iter().enumerate() {
                println!("{:>6}  {}", u64::from(start) + offset as u64, wallet.address());
            }
        }
    }
    Ok(())
}

async fn balance(args: BalanceArgs, config: ClientConfig, keystore: &Keystore) -> Result<()> {
    let address = match (args.wallet, args.address) {
        (Some(name), _) => keystore.get(&name)?.wallet.address().to_hex(),
        (None, Some(address)) => address,
        (None, None) => anyhow::bail!("provide an address or --wallet"),
    };
    let info = connect(config)?.get_balance(&address).await?;
    println!("Address: {}", info.address);
    println!("Balance: {} RELYO", info.balance_display);
    println!("(Raw:    {} wei)", info.balance);
    Ok(())
}

async fn send(args: SendArgs, config: ClientConfig, keystore: &Keystore) -> Result<()> {
    let named = keystore.get(&args.from)?;
    let amount = Amount::parse_display(&args.amount).context("invalid --amount")?;
    let fee = match &args.fee {
        Some(fee) => Amount::parse_display(fee).context("invalid --fee")?,
        None => Amount::from_wei(DEFAULT_FEE_WEI),
    };
    let client = connect(config)?;

    println!(
        "Sending {} RELYO from '{}' to {}...",
        amount.to_display_string(),
        named.name,
        args.to
    );

    let info = match args.nonce {
        Some(nonce) => {
            let tx = named
                .wallet
                .create_transaction(&args.to, amount, fee, nonce, None)?;
            client.submit_transaction(&tx).await?
        }
        None => {
            client
                .send(SendRequest::new(&named.wallet, args.to.as_str(), amount).with_fee(fee))
                .await?
        }
    };
    print_tx(&info);

    if args.wait {
        println!("Waiting for confirmation...");
        let final_info = client
            .wait_for_transaction(&info.id.to_hex(), WaitOptions::default())
            .await?;
        print_tx(&final_info);
    }
    Ok(())
}

fn print_status(status: &NodeStatus) {
    println!("RAINSONET Node Status");
    println!("=====================");
    println!("Node ID:       {}", truncate(&status.node_id, 16));
    println!("State Version: {}", status.state_version);
    println!("State Root:    {}", truncate(&status.state_root, 16));
    println!("Peer Count:    {}", status.peer_count);
    println!(
        "Is Validator:  {}",
        if status.is_validator { "Yes" } else { "No" }
    );
    println!("Mempool Size:  {}", status.mempool_size);
}

fn print_tx(info: &TransactionInfo) {
    println!("TX ID:  {}", info.id);
    println!("Status: {}", info.status);
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
