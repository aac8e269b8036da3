//! Reload: mirror the blacklist file into the firewall chain.
//!
//! The chain is flushed, the file normalized, and every entry appended as a
//! drop rule in file order. The first failure stops the run and nothing is
//! rolled back, so a failure after the flush leaves the chain empty or
//! holding a prefix of the intended rules. [`ReloadError`] says which stage
//! failed and how many rules made it in.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info};

use crate::enforcer::FirewallChain;
use crate::error::BlacklistError;
use crate::fs_abstraction::FileSystem;
use crate::store::BlacklistStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadStage {
    Flush,
    Normalize,
    Repopulate,
}

impl fmt::Display for ReloadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReloadStage::Flush => "flush",
            ReloadStage::Normalize => "normalize",
            ReloadStage::Repopulate => "repopulate",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("reload failed during {stage} after adding {rules_added} rule(s): {source}")]
pub struct ReloadError {
    pub stage: ReloadStage,
    pub rules_added: usize,
    #[source]
    pub source: BlacklistError,
}

impl ReloadError {
    /// Whether the chain was already flushed when the failure happened.
    pub fn chain_modified(&self) -> bool {
        self.stage != ReloadStage::Flush
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadSummary {
    pub rules_added: usize,
    /// Lines dropped by the normalize pass
    pub duplicates_removed: usize,
}

pub fn reload<F, C>(store: &BlacklistStore<F>, chain: &C) -> Result<ReloadSummary, ReloadError>
where
    F: FileSystem,
    C: FirewallChain + ?Sized,
{
    let fail = |stage, rules_added, source| ReloadError {
        stage,
        rules_added,
        source,
    };

    chain
        .flush()
        .map_err(|e| fail(ReloadStage::Flush, 0, e))?;
    debug!("Chain flushed");

    let normalized = store
        .normalize()
        .map_err(|e| fail(ReloadStage::Normalize, 0, e))?;
    debug!(
        "Blacklist normalized: {} entries ({} removed)",
        normalized.entries.len(),
        normalized.removed()
    );

    let mut rules_added = 0;
    let entries = store
        .list()
        .map_err(|e| fail(ReloadStage::Repopulate, 0, e))?;
    for line in entries {
        let line = line.map_err(|e| fail(ReloadStage::Repopulate, rules_added, e))?;
        chain
            .add_drop_rule(&line)
            .map_err(|e| fail(ReloadStage::Repopulate, rules_added, e))?;
        rules_added += 1;
    }

    info!("Reloaded {} rules from {}", rules_added, store.path().display());
    Ok(ReloadSummary {
        rules_added,
        duplicates_removed: normalized.removed(),
    })
}
