//! Flush command implementation.

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::enforcer::{check_root, FirewallChain, IptablesChain};

/// Remove every rule from the firewall chain
pub fn run(config: &Config) -> Result<()> {
    check_root()?;

    let chain = IptablesChain::from_config(config);
    chain.ensure_available()?;

    chain.flush()?;
    info!("Flushed chain {}", chain.chain());

    Ok(())
}
