//! Delete command implementation.

use anyhow::Result;

use crate::config::Config;
use crate::enforcer::check_root;
use crate::store::BlacklistStore;

/// Run the del command
pub fn run(ip: &str, config: &Config) -> Result<()> {
    check_root()?;

    let store = BlacklistStore::new(&config.blacklist_file);
    let removed = store.remove(ip)?;

    if removed > 1 {
        println!("[OK] Removed {} ({} entries) from {}", ip, removed, store.path().display());
    } else {
        println!("[OK] Removed {} from {}", ip, store.path().display());
    }
    println!("     Run 'blacklist reload' to apply changes");

    Ok(())
}
