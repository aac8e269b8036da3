//! Error types for blacklist.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlacklistError {
    #[error("Invalid IP address '{token}': {reason}")]
    InvalidAddress { token: String, reason: String },

    #[error("File system error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{address} not found in {path:?}")]
    NotFound { address: String, path: PathBuf },

    #[error("Firewall command '{command}' failed (exit code {}): {stderr}", format_exit_code(.exit_code))]
    Firewall {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to execute {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Backend not available: {0}")]
    BackendNotAvailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BlacklistError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Exit code reported by the firewall binary, if this is a firewall failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Firewall { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}

// A process killed by a signal has no exit code.
fn format_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, BlacklistError>;
