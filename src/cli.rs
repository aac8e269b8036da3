//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;

#[derive(Parser)]
#[command(name = "blacklist")]
#[command(author, version, about = "Maintain an IP blacklist and mirror it into an iptables chain")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Blacklist file (overrides the config file)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an IP address to the blacklist file
    Add {
        /// IP address to add
        ip: String,
    },

    /// Delete an IP address from the blacklist file
    Del {
        /// IP address to delete
        ip: String,
    },

    /// List IP addresses in the blacklist file
    List,

    /// Find an IP address in the blacklist file (exit code 0 if present)
    Find {
        /// IP address to look up
        ip: String,
    },

    /// Count IP addresses in the blacklist file
    Count,

    /// Check the blacklist file (sort and remove duplicates)
    Check,

    /// Reload the firewall chain (flush, check file, add every address)
    Reload,

    /// Flush the firewall chain
    Flush,

    /// List the rules currently in the firewall chain
    Rules,

    /// Show version
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from(["blacklist", "add", "10.0.0.1"]).unwrap();
        assert!(matches!(cli.command, Commands::Add { ref ip } if ip == "10.0.0.1"));
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(cli.file.is_none());
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["blacklist", "count", "--file", "/tmp/bl", "-v"]).unwrap();
        assert!(matches!(cli.command, Commands::Count));
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/bl")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_missing_ip() {
        assert!(Cli::try_parse_from(["blacklist", "add"]).is_err());
        assert!(Cli::try_parse_from(["blacklist", "find"]).is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(Cli::try_parse_from(["blacklist", "nuke"]).is_err());
    }
}
