//! # whistle CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use whistle_cli::config::{run_config, ConfigArgs, Network, WhistleConfig};
use whistle_cli::disclose::{run_disclose, DiscloseArgs};
use whistle_cli::member::{run_member, MemberArgs};
use whistle_cli::report::{run_report, ReportArgs};
use whistle_cli::wallet::{run_wallet, WalletArgs};

/// Anonymous whistleblower client.
///
/// Register membership under a secret only you hold, file reports that
/// cannot be linked back to you, and prove report attributes cross a
/// threshold without revealing them.
#[derive(Parser, Debug)]
#[command(name = "whistle", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to the local protocol state file.
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Target network.
    #[arg(long, value_enum, global = true)]
    network: Option<Network>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Wallet key management.
    Wallet(WalletArgs),

    /// Register or prove membership.
    Member(MemberArgs),

    /// Draft, submit and verify reports.
    Report(ReportArgs),

    /// Threshold disclosures (severity, financial impact, witnesses).
    Disclose(DiscloseArgs),

    /// Inspect configuration.
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "whistle CLI starting");

    let config = match WhistleConfig::load(cli.config.as_deref(), cli.network, cli.state) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    tracing::debug!(
        network = config.network.as_str(),
        state = %config.state_path.display(),
        "resolved configuration"
    );

    let result = match cli.command {
        Commands::Wallet(args) => run_wallet(&args),
        Commands::Member(args) => run_member(&args, &config),
        Commands::Report(args) => run_report(&args, &config),
        Commands::Disclose(args) => run_disclose(&args, &config),
        Commands::Config(args) => run_config(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
