//! # Report Subcommand
//!
//! - `report draft` writes the full report to a local JSON file and prints
//!   its hash. The draft is private; keep it off shared storage.
//! - `report submit` files a hash (given directly or computed from a draft)
//!   under a membership secret.
//! - `report verify` looks a hash up on the ledger.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use whistle_core::{ReportCategory, ReportHash};
use whistle_crypto::{report_hash, ReportDraft};
use whistle_protocol::{Operation, Outcome};

use crate::config::WhistleConfig;
use crate::session::{open_protocol, reject, SecretArgs, WriteSession, EXIT_NEGATIVE};

/// Arguments for `whistle report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

/// A report hash, given directly or computed from a draft file.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct HashSource {
    /// Report hash as 64 hex chars.
    #[arg(long)]
    pub hash: Option<ReportHash>,
    /// Draft file written by `report draft`.
    #[arg(long, value_name = "PATH")]
    pub draft: Option<PathBuf>,
}

impl HashSource {
    pub fn resolve(&self) -> Result<ReportHash> {
        match (&self.hash, &self.draft) {
            (Some(hash), _) => Ok(*hash),
            (None, Some(path)) => Ok(report_hash(&load_draft(path)?)?),
            (None, None) => anyhow::bail!("pass --hash or --draft"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Write a report draft and print its hash.
    Draft {
        /// fraud, safety, harassment, corruption or other.
        #[arg(long)]
        category: ReportCategory,
        #[arg(long)]
        description: String,
        /// 1 (minor) to 10 (critical).
        #[arg(long)]
        severity: u64,
        /// Estimated impact in thousands.
        #[arg(long, default_value_t = 0)]
        financial: u64,
        #[arg(long, default_value_t = 0)]
        witnesses: u64,
        #[arg(long, short, default_value = "report.json")]
        out: PathBuf,
    },

    /// File a report hash on the ledger.
    Submit {
        #[command(flatten)]
        source: HashSource,
        #[command(flatten)]
        secret: SecretArgs,
    },

    /// Check whether a report hash is on the ledger.
    Verify {
        #[command(flatten)]
        source: HashSource,
    },
}

pub fn run_report(args: &ReportArgs, config: &WhistleConfig) -> Result<u8> {
    match &args.command {
        ReportCommand::Draft {
            category,
            description,
            severity,
            financial,
            witnesses,
            out,
        } => {
            let draft = ReportDraft::new(
                *category,
                description.clone(),
                *severity,
                *financial,
                *witnesses,
            )?;
            cmd_draft(&draft, out)
        }
        ReportCommand::Submit { source, secret } => cmd_submit(config, source.resolve()?, secret),
        ReportCommand::Verify { source } => cmd_verify(config, source.resolve()?),
    }
}

/// Read a draft written by `report draft`.
pub fn load_draft(path: &Path) -> Result<ReportDraft> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft: {}", path.display()))?;
    let draft: ReportDraft = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse draft: {}", path.display()))?;
    draft.validate()?;
    Ok(draft)
}

fn cmd_draft(draft: &ReportDraft, out: &Path) -> Result<u8> {
    let hash = report_hash(draft)?;
    let json = serde_json::to_string_pretty(draft).context("failed to serialize draft")?;
    std::fs::write(out, json)
        .with_context(|| format!("failed to write draft: {}", out.display()))?;
    println!("OK: draft written to {}", out.display());
    println!("  Category:    {}", draft.category.label());
    println!("  Report hash: {hash}");
    Ok(0)
}

fn cmd_submit(config: &WhistleConfig, hash: ReportHash, secret: &SecretArgs) -> Result<u8> {
    let secret = secret.read()?;
    let session = WriteSession::open(&config.state_path)?;
    match session.protocol().dispatch(Operation::SubmitReport {
        report_hash: hash,
        secret,
    }) {
        Ok(Outcome::ReportFiled(id)) => {
            session.save()?;
            println!("OK: report {id} filed");
            println!("  Report hash: {hash}");
            Ok(0)
        }
        Ok(other) => anyhow::bail!("unexpected outcome: {other:?}"),
        Err(e) => reject(e),
    }
}

fn cmd_verify(config: &WhistleConfig, hash: ReportHash) -> Result<u8> {
    let protocol = open_protocol(&config.state_path)?;
    match protocol.verify_report(&hash) {
        Some(record) => {
            println!("YES: report {} is on the ledger", record.id);
            println!("  Filed at:    {}", record.submitted_at);
            println!("  Report hash: {}", record.report_hash);
            Ok(0)
        }
        None => {
            println!("NO: report hash not found");
            Ok(EXIT_NEGATIVE)
        }
    }
}
