//! # Member Subcommand
//!
//! `member register` generates a fresh membership secret, shows it to its
//! owner exactly once (or writes it to a file), and registers its
//! commitment. `member prove` checks a saved secret against the registry.
//!
//! `--secret-out` never replaces an existing file: losing a secret makes
//! its membership unprovable. On unix the file is created with mode `0600`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use whistle_core::{ProtocolError, WalletRef};
use whistle_crypto::{commit, generate_secret, verify_signature, MembershipSecret, Signer};
use whistle_protocol::{Operation, Outcome};

use crate::config::WhistleConfig;
use crate::session::{open_protocol, reject, SecretArgs, WriteSession, EXIT_NEGATIVE};
use crate::wallet::load_signer;

/// Arguments for `whistle member`.
#[derive(Args, Debug)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub command: MemberCommand,
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// Generate a membership secret and register its commitment.
    Register {
        /// Wallet key to sign the registration with. Registers with an
        /// anonymous wallet reference when omitted.
        #[arg(long, value_name = "PATH")]
        wallet_key: Option<PathBuf>,
        /// Write the secret to this new file instead of printing it.
        #[arg(long, value_name = "PATH")]
        secret_out: Option<PathBuf>,
    },

    /// Prove membership with a saved secret.
    Prove {
        #[command(flatten)]
        secret: SecretArgs,
    },
}

pub fn run_member(args: &MemberArgs, config: &WhistleConfig) -> Result<u8> {
    match &args.command {
        MemberCommand::Register {
            wallet_key,
            secret_out,
        } => cmd_register(config, wallet_key.as_deref(), secret_out.as_deref()),
        MemberCommand::Prove { secret } => cmd_prove(config, secret),
    }
}

fn cmd_register(
    config: &WhistleConfig,
    wallet_key: Option<&Path>,
    secret_out: Option<&Path>,
) -> Result<u8> {
    let session = WriteSession::open(&config.state_path)?;

    let secret = generate_secret();
    let commitment = commit(&secret);

    let (wallet_ref, signature) = match wallet_key {
        Some(path) => {
            let signer = load_signer(path)?;
            let signature = signer.sign(commitment.as_bytes());
            verify_signature(&signer.wallet_ref(), commitment.as_bytes(), &signature)
                .context("wallet produced an invalid registration signature")?;
            (signer.wallet_ref(), Some(signature))
        }
        None => (WalletRef::ZERO, None),
    };

    // The secret reaches its file before the commitment is registered.
    if let Some(path) = secret_out {
        write_secret_file(path, &secret)?;
    }

    let outcome = session.protocol().dispatch(Operation::Register {
        commitment,
        wallet_ref,
    });
    let id = match outcome {
        Ok(Outcome::Registered(id)) => id,
        Ok(other) => anyhow::bail!("unexpected outcome: {other:?}"),
        Err(ProtocolError::DuplicateCommitment) => {
            println!("OK: already registered");
            return Ok(0);
        }
        Err(e) => return reject(e),
    };
    session.save()?;

    println!("OK: registered member {id}");
    match secret_out {
        Some(path) => println!("  Secret written to {}", path.display()),
        None => {
            println!("  Secret: {}", secret.expose_hex().as_str());
            println!("  Save this secret. It is shown once and cannot be recovered.");
        }
    }
    println!("  Commitment: {commitment}");
    println!("  Wallet ref: {wallet_ref}");
    if let Some(signature) = signature {
        println!("  Signature:  {signature}");
    }
    Ok(0)
}

/// Create `path` and write the secret into it. Fails if the file exists.
fn write_secret_file(path: &Path, secret: &MembershipSecret) -> Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = match options.open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            anyhow::bail!(
                "secret file already exists: {} (refusing to overwrite a saved secret)",
                path.display()
            )
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to create secret file: {}", path.display()))
        }
    };
    file.write_all(secret.expose_hex().as_bytes())
        .and_then(|()| file.sync_all())
        .with_context(|| format!("failed to write secret: {}", path.display()))
}

fn cmd_prove(config: &WhistleConfig, secret: &SecretArgs) -> Result<u8> {
    let protocol = open_protocol(&config.state_path)?;
    let secret = secret.read()?;
    match protocol.dispatch(Operation::ProveMembership { secret }) {
        Ok(Outcome::Membership(true)) => {
            println!("YES: valid member");
            Ok(0)
        }
        Ok(Outcome::Membership(false)) => {
            println!("NO: not a recognized member");
            Ok(EXIT_NEGATIVE)
        }
        Ok(other) => anyhow::bail!("unexpected outcome: {other:?}"),
        Err(e) => reject(e),
    }
}
