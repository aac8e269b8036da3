//! Count command implementation.

use anyhow::Result;

use crate::config::Config;
use crate::store::BlacklistStore;

/// Print the raw number of lines in the blacklist file, nothing else
pub fn run(config: &Config) -> Result<()> {
    let store = BlacklistStore::new(&config.blacklist_file);
    println!("{}", store.count()?);
    Ok(())
}
