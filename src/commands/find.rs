//! Find command implementation.

use anyhow::Result;
use tracing::debug;

use crate::config::Config;
use crate::error::BlacklistError;
use crate::store::BlacklistStore;
use crate::validation::validate_address;

/// Look up an address. Nothing is printed; the exit code carries the answer.
pub fn run(ip: &str, config: &Config) -> Result<()> {
    let address = validate_address(ip)?;
    let store = BlacklistStore::new(&config.blacklist_file);

    if store.contains(address.as_str())? {
        debug!("{} found in {}", address, store.path().display());
        Ok(())
    } else {
        Err(BlacklistError::NotFound {
            address: address.to_string(),
            path: store.path().to_path_buf(),
        }
        .into())
    }
}
