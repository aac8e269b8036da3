//! Command execution abstraction for testability.
//!
//! Firewall binaries are only ever reached through [`CommandExecutor`], so
//! unit tests can assert the exact argument vectors without running
//! `iptables`.

use std::io;
use std::process::{Command, Stdio};

#[cfg(test)]
use mockall::automock;

/// Output from command execution
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Standard output from the command
    pub stdout: String,
    /// Standard error from the command
    pub stderr: String,
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// The exit code, if available
    pub code: Option<i32>,
}

/// Trait for command execution, allowing dependency injection for testing.
#[cfg_attr(test, automock)]
pub trait CommandExecutor: Send + Sync {
    /// Run `cmd` with `args` and block until it exits.
    ///
    /// An `Err` means the process could not be started at all; a non-zero
    /// exit is reported through [`CommandOutput::success`].
    fn execute(&self, cmd: &str, args: &[String]) -> io::Result<CommandOutput>;
}

/// Real implementation of CommandExecutor that runs actual system commands.
#[derive(Debug, Clone, Default)]
pub struct RealCommandExecutor;

impl RealCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for RealCommandExecutor {
    fn execute(&self, cmd: &str, args: &[String]) -> io::Result<CommandOutput> {
        let output = Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        })
    }
}

/// Helper function to convert a slice of &str to Vec<String>.
///
/// mockall has issues with lifetimes in `&[&str]`, so the trait takes
/// `&[String]` instead.
pub fn args_to_strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
