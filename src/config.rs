//! Configuration management for blacklist.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/blacklist/config.yaml";

/// Default location of the blacklist file
pub const DEFAULT_BLACKLIST_FILE: &str = "/etc/blacklist-ip";

/// Default firewall chain holding the drop rules
pub const DEFAULT_CHAIN: &str = "BLACKLIST";

/// Default iptables binary
pub const DEFAULT_IPTABLES: &str = "/sbin/iptables";

/// iptables rejects chain names longer than this
const MAX_CHAIN_NAME_LEN: usize = 28;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blacklist file (one address per line)
    pub blacklist_file: PathBuf,

    /// Chain the drop rules are appended to. Must already exist.
    pub chain: String,

    /// iptables binary
    pub iptables: PathBuf,

    /// ip6tables binary. When unset, IPv6 addresses go to `iptables` too.
    pub ip6tables: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blacklist_file: PathBuf::from(DEFAULT_BLACKLIST_FILE),
            chain: DEFAULT_CHAIN.to_string(),
            iptables: PathBuf::from(DEFAULT_IPTABLES),
            ip6tables: None,
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load the configuration the CLI runs with.
    ///
    /// `blacklist_file` replaces the configured file when given. The config
    /// file is read by every command, including the ones that need no root,
    /// so errors name it and point at `--config`.
    pub fn load_with_override<P: AsRef<Path>>(
        path: P,
        blacklist_file: Option<&Path>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self::load_or_default(path).with_context(|| {
            format!(
                "Cannot load config file {:?} (pass --config to use another one)",
                path
            )
        })?;

        if let Some(file) = blacklist_file {
            config.blacklist_file = file.to_path_buf();
            config.validate()?;
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.blacklist_file.as_os_str().is_empty() {
            anyhow::bail!("blacklist_file cannot be empty");
        }

        validate_chain_name(&self.chain)?;

        if !self.iptables.is_absolute() {
            anyhow::bail!("iptables must be an absolute path: {:?}", self.iptables);
        }
        if let Some(ref ip6tables) = self.ip6tables {
            if !ip6tables.is_absolute() {
                anyhow::bail!("ip6tables must be an absolute path: {:?}", ip6tables);
            }
        }

        Ok(())
    }
}

/// Validate an iptables chain name.
///
/// The name ends up on a command line, so only a conservative character set
/// is accepted.
pub fn validate_chain_name(chain: &str) -> Result<()> {
    if chain.is_empty() {
        anyhow::bail!("Chain name cannot be empty");
    }
    if chain.len() > MAX_CHAIN_NAME_LEN {
        anyhow::bail!(
            "Chain name '{}' is too long (max {} characters)",
            chain,
            MAX_CHAIN_NAME_LEN
        );
    }
    if chain.starts_with('-') {
        anyhow::bail!("Chain name '{}' cannot start with '-'", chain);
    }
    if !chain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        anyhow::bail!(
            "Invalid chain name '{}'. Use ASCII letters, digits, '-' or '_'",
            chain
        );
    }
    Ok(())
}
