//! # Configuration
//!
//! Resolved client configuration: the target network, its service
//! endpoints, and where the local copy of public protocol state lives.
//!
//! Precedence for every setting: command-line flag, then the YAML config
//! file, then the network preset.
//!
//! Only `state_path` drives behaviour today. Protocol state is kept in the
//! local state file, so no subcommand contacts the node, indexer or proof
//! server; their endpoints are resolved and printed by `config show` and
//! nothing else.
//!
//! ```yaml
//! network: preprod
//! state_path: /var/lib/whistle/preprod.json
//! endpoints:
//!   proof_server_url: http://127.0.0.1:6300
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Target network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Local development node and indexer.
    #[default]
    Local,
    /// Public pre-production network.
    Preprod,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Preprod => "preprod",
        }
    }
}

/// Service endpoints for one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub node_url: String,
    pub indexer_url: String,
    pub indexer_ws_url: String,
    pub proof_server_url: String,
}

impl NetworkConfig {
    /// Built-in endpoints for a network.
    pub fn preset(network: Network) -> Self {
        match network {
            Network::Local => Self {
                node_url: "http://localhost:9944".into(),
                indexer_url: "http://localhost:8088".into(),
                indexer_ws_url: "ws://localhost:8088/ws".into(),
                proof_server_url: "http://localhost:6300".into(),
            },
            Network::Preprod => Self {
                node_url: "https://rpc.preprod.midnight.network".into(),
                indexer_url: "https://indexer.preprod.midnight.network".into(),
                indexer_ws_url: "wss://indexer.preprod.midnight.network/ws".into(),
                // Proofs are always generated locally.
                proof_server_url: "http://localhost:6300".into(),
            },
        }
    }
}

/// Per-endpoint overrides from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EndpointOverrides {
    pub node_url: Option<String>,
    pub indexer_url: Option<String>,
    pub indexer_ws_url: Option<String>,
    pub proof_server_url: Option<String>,
}

/// On-disk shape of the YAML config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub network: Option<Network>,
    pub state_path: Option<PathBuf>,
    pub endpoints: EndpointOverrides,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhistleConfig {
    pub network: Network,
    pub endpoints: NetworkConfig,
    pub state_path: PathBuf,
}

impl WhistleConfig {
    /// Merge flags over the config file over the network preset.
    pub fn resolve(
        file: ConfigFile,
        network_flag: Option<Network>,
        state_flag: Option<PathBuf>,
    ) -> Self {
        let network = network_flag.or(file.network).unwrap_or_default();
        let mut endpoints = NetworkConfig::preset(network);
        let o = file.endpoints;
        if let Some(v) = o.node_url {
            endpoints.node_url = v;
        }
        if let Some(v) = o.indexer_url {
            endpoints.indexer_url = v;
        }
        if let Some(v) = o.indexer_ws_url {
            endpoints.indexer_ws_url = v;
        }
        if let Some(v) = o.proof_server_url {
            endpoints.proof_server_url = v;
        }
        let state_path = state_flag
            .or(file.state_path)
            .unwrap_or_else(|| default_state_path(network));
        Self {
            network,
            endpoints,
            state_path,
        }
    }

    /// Load the optional config file and resolve.
    pub fn load(
        config_path: Option<&Path>,
        network_flag: Option<Network>,
        state_flag: Option<PathBuf>,
    ) -> Result<Self> {
        let file = match config_path {
            Some(p) => ConfigFile::load(p)?,
            None => ConfigFile::default(),
        };
        Ok(Self::resolve(file, network_flag, state_flag))
    }
}

/// `.whistle/<network>.json` under the working directory.
pub fn default_state_path(network: Network) -> PathBuf {
    PathBuf::from(".whistle").join(format!("{}.json", network.as_str()))
}

/// Arguments for `whistle config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved configuration as YAML.
    Show,
}

pub fn run_config(args: &ConfigArgs, config: &WhistleConfig) -> Result<u8> {
    match args.command {
        ConfigCommand::Show => {
            let yaml = serde_yaml::to_string(config).context("failed to render configuration")?;
            print!("{yaml}");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_preset() {
        let cfg = WhistleConfig::resolve(ConfigFile::default(), None, None);
        assert_eq!(cfg.network, Network::Local);
        assert_eq!(cfg.endpoints.node_url, "http://localhost:9944");
        assert_eq!(cfg.state_path, PathBuf::from(".whistle/local.json"));
    }

    #[test]
    fn preprod_preset_endpoints() {
        let p = NetworkConfig::preset(Network::Preprod);
        assert_eq!(p.indexer_ws_url, "wss://indexer.preprod.midnight.network/ws");
        assert_eq!(p.proof_server_url, "http://localhost:6300");
    }

    #[test]
    fn flag_beats_file_beats_preset() {
        let file = ConfigFile {
            network: Some(Network::Preprod),
            state_path: Some(PathBuf::from("from-file.json")),
            endpoints: EndpointOverrides {
                indexer_url: Some("http://indexer.internal".into()),
                ..Default::default()
            },
        };
        let cfg = WhistleConfig::resolve(
            file.clone(),
            Some(Network::Local),
            Some(PathBuf::from("from-flag.json")),
        );
        assert_eq!(cfg.network, Network::Local);
        assert_eq!(cfg.state_path, PathBuf::from("from-flag.json"));
        assert_eq!(cfg.endpoints.indexer_url, "http://indexer.internal");
        assert_eq!(cfg.endpoints.node_url, "http://localhost:9944");

        let cfg = WhistleConfig::resolve(file, None, None);
        assert_eq!(cfg.network, Network::Preprod);
        assert_eq!(cfg.state_path, PathBuf::from("from-file.json"));
    }

    #[test]
    fn load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("whistle.yaml");
        std::fs::write(
            &path,
            "network: preprod\nendpoints:\n  proof_server_url: http://10.0.0.5:6300\n",
        )
        .unwrap();
        let cfg = WhistleConfig::load(Some(&path), None, None).unwrap();
        assert_eq!(cfg.network, Network::Preprod);
        assert_eq!(cfg.endpoints.proof_server_url, "http://10.0.0.5:6300");
        assert_eq!(cfg.state_path, PathBuf::from(".whistle/preprod.json"));
    }

    #[test]
    fn unknown_keys_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "netwerk: local\n").unwrap();
        assert!(WhistleConfig::load(Some(&path), None, None).is_err());
    }

    #[test]
    fn missing_config_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(WhistleConfig::load(Some(&dir.path().join("nope.yaml")), None, None).is_err());
    }

    #[test]
    fn show_renders_yaml() {
        let cfg = WhistleConfig::resolve(ConfigFile::default(), None, None);
        let args = ConfigArgs {
            command: ConfigCommand::Show,
        };
        assert_eq!(run_config(&args, &cfg).unwrap(), 0);
    }
}
