//! Check command implementation (sort and deduplicate the blacklist file).

use anyhow::Result;
use tracing::info;

use crate::config::Config;
use crate::enforcer::check_root;
use crate::store::BlacklistStore;

/// Run the check command
pub fn run(config: &Config) -> Result<()> {
    check_root()?;

    let store = BlacklistStore::new(&config.blacklist_file);
    let summary = store.normalize()?;

    info!(
        "Checked {}: {} entries, {} duplicate or blank line(s) removed",
        store.path().display(),
        summary.entries.len(),
        summary.removed()
    );

    Ok(())
}
