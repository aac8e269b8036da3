//! CLI command implementations.

pub mod add;
pub mod check;
pub mod count;
pub mod del;
pub mod find;
pub mod flush;
pub mod list;
pub mod reload;
pub mod rules;
