//! List command implementation.

use anyhow::Result;
use std::io::{self, Write};

use crate::config::Config;
use crate::store::BlacklistStore;

/// Print every line of the blacklist file, in file order.
///
/// A blacklist file that doesn't exist yet prints nothing.
pub fn run(config: &Config) -> Result<()> {
    let store = BlacklistStore::new(&config.blacklist_file);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in store.list()? {
        writeln!(out, "{}", line?)?;
    }

    Ok(())
}
