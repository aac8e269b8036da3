//! # blacklist - IP blacklist file and iptables chain reconciliation
//!
//! Keeps a flat file of banned IP addresses and mirrors it into a dedicated
//! firewall chain (`BLACKLIST` by default) as one DROP rule per address.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (clap)                                                 │
//! │    └── add, del, list, find, count, check, reload, ...      │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Reconcile                                                  │
//! │    └── reload: flush -> normalize -> repopulate (fail-fast) │
//! ├──────────────────────────────┬──────────────────────────────┤
//! │  Store (FileSystem trait)    │  Enforcer (FirewallChain)    │
//! │    └── one address per line  │    └── IptablesChain         │
//! ├──────────────────────────────┴──────────────────────────────┤
//! │  Validation (std::net::IpAddr, host addresses only)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use blacklist::config::Config;
//! use blacklist::enforcer::{check_root, IptablesChain};
//! use blacklist::reconcile::reload;
//! use blacklist::store::BlacklistStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     check_root()?;
//!
//!     let config = Config::load_or_default("/etc/blacklist/config.yaml")?;
//!     let store = BlacklistStore::new(&config.blacklist_file);
//!     store.add("203.0.113.7")?;
//!
//!     let chain = IptablesChain::from_config(&config);
//!     let summary = reload(&store, &chain)?;
//!     println!("{} rules loaded", summary.rules_added);
//!     Ok(())
//! }
//! ```
//!
//! ## Limitations
//!
//! - The chain must already exist; it is never created or hooked into `INPUT`.
//! - A reload that fails after the flush leaves the chain partially loaded.
//! - No locking: run one instance at a time.

pub mod cli;
pub mod cmd_abstraction;
pub mod commands;
pub mod config;
pub mod enforcer;
pub mod error;
pub mod fs_abstraction;
pub mod reconcile;
pub mod store;
pub mod validation;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::BlacklistError;
