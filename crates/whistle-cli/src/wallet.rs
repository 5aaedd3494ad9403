//! # Wallet Subcommand
//!
//! Creates the local Ed25519 wallet key used to attach a wallet reference
//! to a registration. The key file holds the 32-byte seed as hex; the
//! `.pub` file holds the wallet reference.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use whistle_crypto::{LocalSigner, Signer};

/// Arguments for `whistle wallet`.
#[derive(Args, Debug)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub command: WalletCommand,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Generate a new wallet key.
    Init {
        /// Directory to write `wallet.key` and `wallet.pub` into.
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
        /// Overwrite an existing key.
        #[arg(long)]
        force: bool,
    },
}

pub fn run_wallet(args: &WalletArgs) -> Result<u8> {
    match &args.command {
        WalletCommand::Init { out, force } => cmd_init(out, *force),
    }
}

fn cmd_init(out: &Path, force: bool) -> Result<u8> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("failed to create output directory: {}", out.display()))?;

    let key_path = out.join("wallet.key");
    let pub_path = out.join("wallet.pub");
    if key_path.exists() && !force {
        bail!(
            "wallet key already exists: {} (use --force to replace)",
            key_path.display()
        );
    }

    let signer = LocalSigner::generate();
    let wallet_ref = signer.wallet_ref();

    std::fs::write(&key_path, signer.seed_hex().as_str())
        .with_context(|| format!("failed to write wallet key: {}", key_path.display()))?;
    std::fs::write(&pub_path, wallet_ref.to_hex())
        .with_context(|| format!("failed to write wallet ref: {}", pub_path.display()))?;

    tracing::info!(wallet_ref = %wallet_ref, "wallet initialized");
    println!("OK: wallet initialized");
    println!("  Key:        {}", key_path.display());
    println!("  Wallet ref: {wallet_ref}");
    Ok(0)
}

/// Load a wallet key written by `wallet init`.
pub fn load_signer(path: &Path) -> Result<LocalSigner> {
    let text = zeroize::Zeroizing::new(
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read wallet key: {}", path.display()))?,
    );
    LocalSigner::from_hex(&text)
        .with_context(|| format!("invalid wallet key: {}", path.display()))
}
