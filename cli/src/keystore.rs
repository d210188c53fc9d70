//! Named wallets on disk.
//!
//! One JSON file per wallet, `<dir>/<name>.json`:
//!
//! ```text
//! { "version": 1, "name": "alice", "created_at": "...",
//!   "address": "...", "public_key": "...", "secret_key": "..." }
//! ```
//!
//! The secret is stored in plain hex and the file is restricted to its
//! owner. Anyone who can read the file can spend from the wallet.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use relyo_sdk::Wallet;

const FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct WalletFile {
    version: u32,
    name: String,
    created_at: DateTime<Utc>,
    address: String,
    public_key: String,
    secret_key: String,
}

/// A wallet together with the name it is stored under.
#[derive(Debug)]
pub struct NamedWallet {
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub wallet: Wallet,
}

/// Listing entry. Never carries the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSummary {
    pub name: String,
    pub address: String,
}

pub struct Keystore {
    dir: PathBuf,
}

impl Keystore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            bail!("invalid wallet name '{name}': use letters, digits, '-' and '_'");
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    fn write(&self, name: &str, wallet: Wallet) -> Result<NamedWallet> {
        let path = self.path_for(name)?;
        if path.exists() {
            bail!("wallet '{name}' already exists");
        }
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create wallets directory {}", self.dir.display()))?;

        let created_at = Utc::now();
        let file = WalletFile {
            version: FILE_VERSION,
            name: name.to_string(),
            created_at,
            address: wallet.address().to_hex(),
            public_key: wallet.public_key().to_hex(),
            secret_key: wallet.export_secret_key(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let mut out = match create_private(&path) {
            Ok(out) => out,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                bail!("wallet '{name}' already exists")
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to create wallet file {}", path.display()))
            }
        };
        out.write_all(json.as_bytes())
            .and_then(|()| out.sync_all())
            .with_context(|| format!("failed to write wallet file {}", path.display()))?;

        info!(name, address = %wallet.address(), path = %path.display(), "wallet stored");
        Ok(NamedWallet {
            name: name.to_string(),
            created_at,
            wallet,
        })
    }

    /// New random wallet stored under `name`.
    pub fn create(&self, name: &str) -> Result<NamedWallet> {
        self.write(name, Wallet::create())
    }

    /// Stores an existing secret key under `name`.
    pub fn import(&self, name: &str, secret_hex: &str) -> Result<NamedWallet> {
        let wallet = Wallet::from_secret_key(secret_hex).context("secret key rejected")?;
        self.write(name, wallet)
    }

    pub fn get(&self, name: &str) -> Result<NamedWallet> {
        let path = self.path_for(name)?;
        if !path.exists() {
            bail!("wallet '{name}' not found in {}", self.dir.display());
        }
        let json = fs::read_to_string(&path)
            .with_context(|| format!("failed to read wallet file {}", path.display()))?;
        let file: WalletFile = serde_json::from_str(&json)
            .with_context(|| format!("malformed wallet file {}", path.display()))?;
        if file.version != FILE_VERSION {
            bail!("unsupported wallet file version {}", file.version);
        }
        // Also checks the stored address against the key.
        let wallet = Wallet::from_serialized(&json)
            .with_context(|| format!("wallet file {} is inconsistent", path.display()))?;

        debug!(name, address = %wallet.address(), "wallet loaded");
        Ok(NamedWallet {
            name: file.name,
            created_at: file.created_at,
            wallet,
        })
    }

    /// All readable wallets, sorted by name. Unreadable files are skipped
    /// with a warning.
    pub fn list(&self) -> Result<Vec<WalletSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut out = Vec::new();
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read wallets directory {}", self.dir.display()))?;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "json") {
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                match self.get(stem) {
                    Ok(named) => out.push(WalletSummary {
                        name: named.name,
                        address: named.wallet.address().to_hex(),
                    }),
                    Err(e) => warn!(path = %path.display(), error = %e, "skipping wallet file"),
                }
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }
}

/// Creates `path` owner-only from the start. Never overwrites.
fn create_private(path: &Path) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
