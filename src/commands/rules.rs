//! Rules command implementation.

use anyhow::Result;

use crate::config::Config;
use crate::enforcer::{check_root, FirewallChain, IptablesChain};

/// Print the firewall chain as the backend lists it
pub fn run(config: &Config) -> Result<()> {
    check_root()?;

    let chain = IptablesChain::from_config(config);
    chain.ensure_available()?;

    print!("{}", chain.list_rules()?);

    Ok(())
}
