//! Add command implementation.

use anyhow::Result;

use crate::config::Config;
use crate::enforcer::check_root;
use crate::store::BlacklistStore;

/// Run the add command
pub fn run(ip: &str, config: &Config) -> Result<()> {
    check_root()?;

    let store = BlacklistStore::new(&config.blacklist_file);
    let address = store.add(ip)?;

    println!("[OK] Added {} to {}", address, store.path().display());
    println!("     Run 'blacklist reload' to apply changes");

    Ok(())
}
