//! iptables backend implementation.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::FirewallChain;
use crate::cmd_abstraction::{args_to_strings, CommandExecutor, RealCommandExecutor};
use crate::config::Config;
use crate::error::{BlacklistError, Result};
use crate::validation::validate_address;

/// Drop rules in a pre-existing iptables chain, one per source address.
///
/// With an `ip6tables` binary configured, IPv6 addresses are routed to it and
/// `flush`/`list_rules` cover both families.
pub struct IptablesChain<E: CommandExecutor = RealCommandExecutor> {
    iptables: PathBuf,
    ip6tables: Option<PathBuf>,
    chain: String,
    executor: E,
}

impl IptablesChain<RealCommandExecutor> {
    pub fn from_config(config: &Config) -> Self {
        Self::with_executor(config, RealCommandExecutor::new())
    }
}

impl<E: CommandExecutor> IptablesChain<E> {
    pub fn with_executor(config: &Config, executor: E) -> Self {
        Self {
            iptables: config.iptables.clone(),
            ip6tables: config.ip6tables.clone(),
            chain: config.chain.clone(),
            executor,
        }
    }

    pub fn chain(&self) -> &str {
        &self.chain
    }

    /// Check that the configured binaries exist.
    pub fn ensure_available(&self) -> Result<()> {
        for binary in self.binaries() {
            if !binary.exists() {
                return Err(BlacklistError::BackendNotAvailable(format!(
                    "could not find {}",
                    binary.display()
                )));
            }
        }
        Ok(())
    }

    fn binaries(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.iptables.as_path()).chain(self.ip6tables.as_deref())
    }

    /// Run one firewall command, mapping a non-zero exit to an error.
    fn run(&self, program: &Path, args: &[&str]) -> Result<String> {
        let program_str = program.to_string_lossy();
        let command = format!("{} {}", program_str, args.join(" "));
        debug!("Running {}", command);

        let output = self
            .executor
            .execute(&program_str, &args_to_strings(args))
            .map_err(|source| BlacklistError::CommandSpawn {
                program: program_str.to_string(),
                source,
            })?;

        if output.success {
            Ok(output.stdout)
        } else {
            Err(BlacklistError::Firewall {
                command,
                exit_code: output.code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}

impl<E: CommandExecutor> FirewallChain for IptablesChain<E> {
    fn flush(&self) -> Result<()> {
        for binary in self.binaries() {
            self.run(binary, &["-F", &self.chain])?;
        }
        debug!("Flushed chain {}", self.chain);
        Ok(())
    }

    fn list_rules(&self) -> Result<String> {
        let mut listing = String::new();
        for binary in self.binaries() {
            listing.push_str(&self.run(binary, &["-L", &self.chain, "-v", "-n"])?);
        }
        Ok(listing)
    }

    fn add_drop_rule(&self, address: &str) -> Result<()> {
        let address = validate_address(address)?;

        let binary = match (&self.ip6tables, address.is_ipv6()) {
            (Some(ip6tables), true) => ip6tables,
            _ => &self.iptables,
        };

        self.run(
            binary,
            &["-A", &self.chain, "-s", address.as_str(), "-j", "DROP"],
        )?;
        Ok(())
    }
}
