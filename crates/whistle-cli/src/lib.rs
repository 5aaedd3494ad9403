//! # whistle-cli — Command-Line Client
//!
//! Provides the `whistle` command-line interface. Each subcommand maps to
//! one step of the member's workflow:
//!
//! - `whistle wallet init`: create the local wallet key.
//! - `whistle member register`: generate a secret, register its commitment.
//! - `whistle member prove`: prove membership with the saved secret.
//! - `whistle report draft|submit|verify`: write, file and look up reports.
//! - `whistle disclose severity|financial|witnesses`: threshold disclosures.
//! - `whistle config show`: print the resolved configuration.
//!
//! ```bash
//! whistle member register --secret-out ~/.whistle-secret
//! whistle report draft --category fraud --description "..." --severity 8
//! whistle report submit --draft report.json --secret-file ~/.whistle-secret
//! whistle disclose severity --min 7 --draft report.json --secret-file ~/.whistle-secret
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` error, `2` negative answer (not a member, threshold not
//! met, report not found).

pub mod config;
pub mod disclose;
pub mod member;
pub mod report;
pub mod session;
pub mod wallet;
