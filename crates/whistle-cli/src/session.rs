//! # Session Helpers
//!
//! Shared plumbing for the subcommands: loading and saving the local copy of
//! public protocol state, reading the member's secret, and mapping protocol
//! results to exit codes.
//!
//! ## State File Locking
//!
//! A write (`member register`, `report submit`) is a load, dispatch, save
//! cycle. [`WriteSession`] holds an exclusive `flock` on `<state>.lock`
//! for the whole cycle, so two `whistle` processes cannot both load the
//! same snapshot and overwrite each other's registration or file the same
//! hash twice. The lock lives on a sidecar file because saving replaces the
//! state file by rename. Reads load without locking; the rename means they
//! see either the old or the new snapshot, never a torn one.
//!
//! ## Security Invariant
//!
//! The secret is read into a zeroizing buffer and parsed straight into a
//! [`MembershipSecret`]. Parse errors describe length and offset only; the
//! secret text is never echoed, logged, or placed in an error.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use fs2::FileExt;
use zeroize::Zeroizing;

use whistle_core::ProtocolError;
use whistle_crypto::MembershipSecret;
use whistle_protocol::{Protocol, ProtocolSnapshot};

/// Exit code for an expected negative answer (not a member, threshold not
/// met, report not found).
pub const EXIT_NEGATIVE: u8 = 2;

/// Environment variable holding the hex secret when no file is given.
pub const SECRET_ENV: &str = "WHISTLE_SECRET";

/// Where to read the membership secret from.
#[derive(Args, Debug, Clone, Default)]
pub struct SecretArgs {
    /// File containing the hex membership secret. Falls back to the
    /// WHISTLE_SECRET environment variable.
    #[arg(long, value_name = "PATH")]
    pub secret_file: Option<PathBuf>,
}

impl SecretArgs {
    pub fn read(&self) -> Result<MembershipSecret> {
        let env = std::env::var(SECRET_ENV).ok().map(Zeroizing::new);
        read_secret(self.secret_file.as_deref(), env)
    }
}

/// Parse the secret from a file, else from the given environment value.
pub fn read_secret(
    file: Option<&Path>,
    env: Option<Zeroizing<String>>,
) -> Result<MembershipSecret> {
    let text = match (file, env) {
        (Some(path), _) => Zeroizing::new(
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read secret file: {}", path.display()))?,
        ),
        (None, Some(value)) => value,
        (None, None) => bail!("no membership secret: pass --secret-file or set {SECRET_ENV}"),
    };
    MembershipSecret::from_hex(&text).map_err(|e| anyhow!("membership secret is malformed: {e}"))
}

/// Load protocol state from `path`, or start empty if it does not exist.
pub fn open_protocol(path: &Path) -> Result<Protocol> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no state file, starting empty");
        return Ok(Protocol::new());
    }
    let snapshot = ProtocolSnapshot::load(path)
        .with_context(|| format!("failed to load state: {}", path.display()))?;
    let state = snapshot
        .restore()
        .with_context(|| format!("refusing corrupt state: {}", path.display()))?;
    Ok(Protocol::from_state(state))
}

/// Protocol state loaded under an exclusive lock on its file. The lock is
/// released when the session drops.
#[derive(Debug)]
pub struct WriteSession {
    path: PathBuf,
    protocol: Protocol,
    _lock: File,
}

impl WriteSession {
    /// Lock the state file, blocking until no other writer holds it, then
    /// load it.
    pub fn open(path: &Path) -> Result<Self> {
        let lock = lock_exclusive(path)?;
        let protocol = open_protocol(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            protocol,
            _lock: lock,
        })
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// Persist the state. The lock stays held until the session drops.
    pub fn save(&self) -> Result<()> {
        self.protocol
            .snapshot()
            .save(&self.path)
            .with_context(|| format!("failed to save state: {}", self.path.display()))
    }
}

fn lock_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

fn lock_exclusive(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create state directory: {}", parent.display()))?;
    }
    let lock_path = lock_path(path);
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open state lock: {}", lock_path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("failed to lock state: {}", lock_path.display()))?;
    tracing::debug!(path = %lock_path.display(), "state lock acquired");
    Ok(file)
}

/// Print a protocol rejection. Negative answers become exit code 2;
/// everything else is an error.
pub fn reject(err: ProtocolError) -> Result<u8> {
    if err.is_negative_result() {
        println!("NO: {err}");
        Ok(EXIT_NEGATIVE)
    } else {
        Err(anyhow!(err))
    }
}
