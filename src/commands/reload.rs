//! Reload command implementation.

use anyhow::Result;
use tracing::{info, warn};

use crate::config::Config;
use crate::enforcer::{check_root, IptablesChain};
use crate::reconcile::reload;
use crate::store::BlacklistStore;

/// Flush the chain, check the blacklist file, and add every address again
pub fn run(config: &Config) -> Result<()> {
    check_root()?;

    let chain = IptablesChain::from_config(config);
    chain.ensure_available()?;

    let store = BlacklistStore::new(&config.blacklist_file);

    match reload(&store, &chain) {
        Ok(summary) => {
            info!(
                "Chain {} now holds {} drop rule(s)",
                chain.chain(),
                summary.rules_added
            );
            Ok(())
        }
        Err(e) => {
            if e.chain_modified() {
                warn!(
                    "Chain {} is incomplete ({} rule(s) loaded): the firewall is not blocking \
                     every blacklisted address until a reload succeeds",
                    chain.chain(),
                    e.rules_added
                );
            }
            Err(e.into())
        }
    }
}
