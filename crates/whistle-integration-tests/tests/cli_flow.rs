//! # CLI Flow
//!
//! Drives the `whistle` subcommand handlers against a temporary state file:
//! wallet setup, registration, drafting, filing, verification and
//! disclosures, checking exit codes at each step.

use std::path::Path;

use whistle_cli::config::{ConfigFile, Network, WhistleConfig};
use whistle_cli::disclose::{run_disclose, DiscloseArgs, DiscloseCommand, ThresholdArgs};
use whistle_cli::member::{run_member, MemberArgs, MemberCommand};
use whistle_cli::report::{run_report, HashSource, ReportArgs, ReportCommand};
use whistle_cli::session::{SecretArgs, EXIT_NEGATIVE};
use whistle_cli::wallet::{run_wallet, WalletArgs, WalletCommand};
use whistle_core::ReportCategory;

fn config(dir: &Path) -> WhistleConfig {
    WhistleConfig::resolve(
        ConfigFile::default(),
        Some(Network::Local),
        Some(dir.join("state.json")),
    )
}

fn secret_args(path: &Path) -> SecretArgs {
    SecretArgs {
        secret_file: Some(path.to_path_buf()),
    }
}

fn threshold(min: u64, draft: &Path, secret: &Path) -> ThresholdArgs {
    ThresholdArgs {
        min,
        actual: None,
        draft: Some(draft.to_path_buf()),
        secret: secret_args(secret),
    }
}

#[test]
fn full_member_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let secret = dir.path().join("secret");
    let draft = dir.path().join("report.json");

    let code = run_wallet(&WalletArgs {
        command: WalletCommand::Init {
            out: dir.path().to_path_buf(),
            force: false,
        },
    })
    .unwrap();
    assert_eq!(code, 0);

    let code = run_member(
        &MemberArgs {
            command: MemberCommand::Register {
                wallet_key: Some(dir.path().join("wallet.key")),
                secret_out: Some(secret.clone()),
            },
        },
        &cfg,
    )
    .unwrap();
    assert_eq!(code, 0);

    let code = run_member(
        &MemberArgs {
            command: MemberCommand::Prove {
                secret: secret_args(&secret),
            },
        },
        &cfg,
    )
    .unwrap();
    assert_eq!(code, 0);

    let code = run_report(
        &ReportArgs {
            command: ReportCommand::Draft {
                category: ReportCategory::Fraud,
                description: "duplicate invoices paid to a related vendor".into(),
                severity: 8,
                financial: 500,
                witnesses: 3,
                out: draft.clone(),
            },
        },
        &cfg,
    )
    .unwrap();
    assert_eq!(code, 0);

    let from_draft = || HashSource {
        hash: None,
        draft: Some(draft.clone()),
    };

    let verify = |cfg: &WhistleConfig| {
        run_report(
            &ReportArgs {
                command: ReportCommand::Verify {
                    source: from_draft(),
                },
            },
            cfg,
        )
        .unwrap()
    };
    assert_eq!(verify(&cfg), EXIT_NEGATIVE);

    let code = run_report(
        &ReportArgs {
            command: ReportCommand::Submit {
                source: from_draft(),
                secret: secret_args(&secret),
            },
        },
        &cfg,
    )
    .unwrap();
    assert_eq!(code, 0);
    assert_eq!(verify(&cfg), 0);

    let disclose = |cmd: DiscloseCommand| run_disclose(&DiscloseArgs { command: cmd }, &cfg).unwrap();
    assert_eq!(disclose(DiscloseCommand::Severity(threshold(7, &draft, &secret))), 0);
    assert_eq!(
        disclose(DiscloseCommand::Severity(threshold(9, &draft, &secret))),
        EXIT_NEGATIVE
    );
    assert_eq!(disclose(DiscloseCommand::Financial(threshold(100, &draft, &secret))), 0);
    assert_eq!(
        disclose(DiscloseCommand::Witnesses(threshold(4, &draft, &secret))),
        EXIT_NEGATIVE
    );
}

#[test]
fn stranger_cannot_submit_or_prove() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let secret = dir.path().join("secret");
    std::fs::write(
        &secret,
        whistle_crypto::generate_secret().expose_hex().as_str(),
    )
    .unwrap();

    let code = run_member(
        &MemberArgs {
            command: MemberCommand::Prove {
                secret: secret_args(&secret),
            },
        },
        &cfg,
    )
    .unwrap();
    assert_eq!(code, EXIT_NEGATIVE);

    let code = run_report(
        &ReportArgs {
            command: ReportCommand::Submit {
                source: HashSource {
                    hash: Some(whistle_core::ReportHash::from_bytes([9; 32])),
                    draft: None,
                },
                secret: secret_args(&secret),
            },
        },
        &cfg,
    )
    .unwrap();
    assert_eq!(code, EXIT_NEGATIVE);
}
