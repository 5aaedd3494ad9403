//! # Disclose Subcommand
//!
//! Threshold disclosures for an investigator: prove that a report's
//! severity, financial impact or witness count is at least a chosen
//! minimum, without revealing the value itself.
//!
//! The private value comes from `--actual` or from the draft file. It is
//! never printed. `--actual` must lie within the range a draft accepts for
//! the kind; `--min` is any value.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use whistle_core::DisclosureKind;
use whistle_protocol::{Operation, Outcome};

use crate::config::WhistleConfig;
use crate::report::load_draft;
use crate::session::{open_protocol, reject, SecretArgs};

/// Arguments for `whistle disclose`.
#[derive(Args, Debug)]
pub struct DiscloseArgs {
    #[command(subcommand)]
    pub command: DiscloseCommand,
}

#[derive(Subcommand, Debug)]
pub enum DiscloseCommand {
    /// Severity (1 to 10) is at least --min.
    Severity(ThresholdArgs),
    /// Financial impact (thousands) is at least --min.
    Financial(ThresholdArgs),
    /// Witness count is at least --min.
    Witnesses(ThresholdArgs),
}

impl DiscloseCommand {
    fn split(&self) -> (DisclosureKind, &ThresholdArgs) {
        match self {
            Self::Severity(a) => (DisclosureKind::Severity, a),
            Self::Financial(a) => (DisclosureKind::FinancialImpact, a),
            Self::Witnesses(a) => (DisclosureKind::WitnessCount, a),
        }
    }
}

/// Public minimum and private value for one disclosure.
#[derive(Args, Debug, Clone)]
pub struct ThresholdArgs {
    /// Public threshold.
    #[arg(long)]
    pub min: u64,
    /// Private value.
    #[arg(long, required_unless_present = "draft", conflicts_with = "draft")]
    pub actual: Option<u64>,
    /// Take the private value from a draft file.
    #[arg(long, value_name = "PATH")]
    pub draft: Option<PathBuf>,
    #[command(flatten)]
    pub secret: SecretArgs,
}

impl ThresholdArgs {
    fn actual_for(&self, kind: DisclosureKind) -> Result<u64> {
        match (self.actual, &self.draft) {
            (Some(v), _) => {
                let bounds = kind.bounds();
                if !bounds.contains(&v) {
                    anyhow::bail!(
                        "--actual must be within {}..={} for {kind}",
                        bounds.start(),
                        bounds.end()
                    );
                }
                Ok(v)
            }
            (None, Some(path)) => Ok(load_draft(path)?.value_for(kind)),
            (None, None) => anyhow::bail!("pass --actual or --draft"),
        }
    }
}

pub fn run_disclose(args: &DiscloseArgs, config: &WhistleConfig) -> Result<u8> {
    let (kind, threshold) = args.command.split();
    cmd_disclose(config, kind, threshold)
}

fn cmd_disclose(config: &WhistleConfig, kind: DisclosureKind, args: &ThresholdArgs) -> Result<u8> {
    let protocol = open_protocol(&config.state_path)?;
    let actual = args.actual_for(kind)?;
    let secret = args.secret.read()?;
    match protocol.dispatch(Operation::disclosure(kind, args.min, actual, secret)) {
        Ok(Outcome::Disclosure(true)) => {
            println!("YES: {} >= {} proven", kind.label(), args.min);
            Ok(0)
        }
        Ok(other) => anyhow::bail!("unexpected outcome: {other:?}"),
        Err(e) => reject(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigFile, Network};
    use crate::session::{WriteSession, EXIT_NEGATIVE};
    use whistle_core::{ReportCategory, WalletRef};
    use whistle_crypto::{commit, generate_secret, ReportDraft};

    fn setup() -> (tempfile::TempDir, WhistleConfig, SecretArgs) {
        let dir = tempfile::tempdir().unwrap();
        let cfg = WhistleConfig::resolve(
            ConfigFile::default(),
            Some(Network::Local),
            Some(dir.path().join("state.json")),
        );
        let s = generate_secret();
        let session = WriteSession::open(&cfg.state_path).unwrap();
        session.protocol().register(commit(&s), WalletRef::ZERO).unwrap();
        session.save().unwrap();
        drop(session);
        let path = dir.path().join("secret");
        std::fs::write(&path, s.expose_hex().as_str()).unwrap();
        (
            dir,
            cfg,
            SecretArgs {
                secret_file: Some(path),
            },
        )
    }

    fn args(min: u64, actual: u64, secret: &SecretArgs) -> ThresholdArgs {
        ThresholdArgs {
            min,
            actual: Some(actual),
            draft: None,
            secret: secret.clone(),
        }
    }

    #[test]
    fn severity_met_exits_zero() {
        let (_d, cfg, secret) = setup();
        assert_eq!(
            cmd_disclose(&cfg, DisclosureKind::Severity, &args(7, 8, &secret)).unwrap(),
            0
        );
    }

    #[test]
    fn severity_not_met_exits_negative() {
        let (_d, cfg, secret) = setup();
        assert_eq!(
            cmd_disclose(&cfg, DisclosureKind::Severity, &args(9, 8, &secret)).unwrap(),
            EXIT_NEGATIVE
        );
    }

    #[test]
    fn actual_outside_draft_range_is_error() {
        let (_d, cfg, secret) = setup();
        assert!(cmd_disclose(&cfg, DisclosureKind::Severity, &args(5, 11, &secret)).is_err());
        assert!(cmd_disclose(&cfg, DisclosureKind::WitnessCount, &args(3, 2_000_000, &secret)).is_err());
    }

    #[test]
    fn zero_minimum_is_met() {
        let (_d, cfg, secret) = setup();
        assert_eq!(
            cmd_disclose(&cfg, DisclosureKind::Severity, &args(0, 8, &secret)).unwrap(),
            0
        );
    }

    #[test]
    fn actual_taken_from_draft() {
        let (dir, cfg, secret) = setup();
        let draft = ReportDraft::new(ReportCategory::Fraud, "ledger padding", 4, 250, 6).unwrap();
        let path = dir.path().join("report.json");
        std::fs::write(&path, serde_json::to_string(&draft).unwrap()).unwrap();
        let a = ThresholdArgs {
            min: 5,
            actual: None,
            draft: Some(path),
            secret,
        };
        assert_eq!(cmd_disclose(&cfg, DisclosureKind::WitnessCount, &a).unwrap(), 0);
        assert_eq!(
            cmd_disclose(&cfg, DisclosureKind::Severity, &a).unwrap(),
            EXIT_NEGATIVE
        );
    }

    #[test]
    fn command_maps_to_kind() {
        let secret = SecretArgs::default();
        let cmd = DiscloseCommand::Financial(args(1, 2, &secret));
        assert_eq!(cmd.split().0, DisclosureKind::FinancialImpact);
    }
}
