//! Firewall chain adapters.
//!
//! The reconciliation logic only talks to [`FirewallChain`]; which packet
//! filter sits behind it is decided here.

mod iptables;

use crate::error::Result;

pub use iptables::IptablesChain;

/// A dedicated firewall chain holding one drop rule per blacklisted address.
///
/// Implementations treat the chain as an external, order-sensitive resource:
/// rules are only ever flushed and appended, never read back one by one.
/// Callers must hold whatever privilege the backend needs.
pub trait FirewallChain: Send + Sync {
    /// Remove every rule from the chain.
    ///
    /// On error the chain contents are unknown.
    fn flush(&self) -> Result<()>;

    /// Current rule listing (verbose, numeric), as printed by the backend.
    fn list_rules(&self) -> Result<String>;

    /// Append a rule dropping all traffic from `address`.
    ///
    /// `address` is validated first; an invalid one never reaches the backend.
    fn add_drop_rule(&self, address: &str) -> Result<()>;
}

/// Check if running as root (effective UID == 0)
///
/// Firewall commands and writes to the system blacklist file need it. The
/// adapters never escalate on their own.
pub fn check_root() -> anyhow::Result<()> {
    // SAFETY: geteuid() is a simple syscall that reads the effective user ID.
    // It has no preconditions, never fails, and doesn't modify any state.
    let euid = unsafe { libc::geteuid() };

    if euid != 0 {
        anyhow::bail!("You must be root for this operation. Please run with sudo.")
    }
    Ok(())
}
