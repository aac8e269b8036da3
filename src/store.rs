//! File-backed blacklist store.
//!
//! The blacklist is a plain text file with one address per line. Appends
//! never check for duplicates; [`BlacklistStore::normalize`] is the only
//! place where the file is deduplicated and sorted. Rewrites (`remove`,
//! `normalize`) are buffered in memory and go through
//! [`FileSystem::replace`], so a failed write never truncates the file.

use std::collections::HashSet;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{BlacklistError, Result};
use crate::fs_abstraction::{FileSystem, RealFileSystem};
use crate::validation::{validate_address, Address};

/// Outcome of a normalize pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Raw line count before the pass
    pub lines_before: usize,
    /// Normalized entries, in the order they were written
    pub entries: Vec<String>,
}

impl NormalizeSummary {
    pub fn removed(&self) -> usize {
        self.lines_before - self.entries.len()
    }
}

/// Lazy iterator over the lines of the blacklist file.
pub struct Entries {
    lines: Option<io::Lines<Box<dyn BufRead + Send>>>,
    path: PathBuf,
}

impl Iterator for Entries {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.as_mut()?.next()?;
        Some(line.map_err(|e| BlacklistError::io(&self.path, e)))
    }
}

/// The on-disk set of blacklisted addresses.
pub struct BlacklistStore<F: FileSystem = RealFileSystem> {
    path: PathBuf,
    fs: F,
}

impl BlacklistStore<RealFileSystem> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_fs(path, RealFileSystem)
    }
}

impl<F: FileSystem> BlacklistStore<F> {
    pub fn with_fs(path: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an address. Duplicates are left for [`normalize`](Self::normalize).
    pub fn add(&self, token: &str) -> Result<Address> {
        let address = validate_address(token)?;

        let line = format!("{}\n", address);
        self.fs
            .append(&self.path, line.as_bytes())
            .map_err(|e| BlacklistError::io(&self.path, e))?;

        debug!("Appended {} to {}", address, self.path.display());
        Ok(address)
    }

    /// Remove every line matching `token` (case-insensitive).
    ///
    /// Returns the number of lines removed.
    pub fn remove(&self, token: &str) -> Result<usize> {
        let address = validate_address(token)?;

        let lines = match self.open_if_exists()? {
            Some(reader) => self.collect_lines(reader)?,
            None => Vec::new(),
        };
        let kept: Vec<String> = lines
            .iter()
            .filter(|line| !address.matches(line))
            .cloned()
            .collect();

        let removed = lines.len() - kept.len();
        if removed == 0 {
            return Err(BlacklistError::NotFound {
                address: address.to_string(),
                path: self.path.clone(),
            });
        }

        self.rewrite(&kept)?;
        debug!(
            "Removed {} line(s) matching {} from {}",
            removed,
            address,
            self.path.display()
        );
        Ok(removed)
    }

    /// Deduplicate (case-insensitive) and sort the file.
    ///
    /// Blank lines are dropped. Of several case variants, the one that comes
    /// first in the file is kept.
    pub fn normalize(&self) -> Result<NormalizeSummary> {
        let lines = self.read_lines()?;
        let lines_before = lines.len();

        let entries = normalize_lines(lines);
        self.rewrite(&entries)?;

        debug!(
            "Normalized {}: {} lines -> {} entries",
            self.path.display(),
            lines_before,
            entries.len()
        );
        Ok(NormalizeSummary {
            lines_before,
            entries,
        })
    }

    /// Lines of the file in on-disk order. An absent file yields nothing.
    pub fn list(&self) -> Result<Entries> {
        let lines = self.open_if_exists()?.map(BufRead::lines);
        Ok(Entries {
            lines,
            path: self.path.clone(),
        })
    }

    /// Whether any line equals `token` (case-insensitive). Stops at the first match.
    pub fn contains(&self, token: &str) -> Result<bool> {
        for line in self.list()? {
            if line?.eq_ignore_ascii_case(token) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Raw line count, duplicates included.
    pub fn count(&self) -> Result<usize> {
        let mut count = 0;
        for line in self.list()? {
            line?;
            count += 1;
        }
        Ok(count)
    }

    fn open_if_exists(&self) -> Result<Option<Box<dyn BufRead + Send>>> {
        match self.fs.open_read(&self.path) {
            Ok(reader) => Ok(Some(reader)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BlacklistError::io(&self.path, e)),
        }
    }

    // Normalize needs the file to exist; a missing file is an error here.
    fn read_lines(&self) -> Result<Vec<String>> {
        let reader = self
            .fs
            .open_read(&self.path)
            .map_err(|e| BlacklistError::io(&self.path, e))?;
        self.collect_lines(reader)
    }

    fn collect_lines(&self, reader: Box<dyn BufRead + Send>) -> Result<Vec<String>> {
        reader
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .map_err(|e| BlacklistError::io(&self.path, e))
    }

    fn rewrite(&self, lines: &[String]) -> Result<()> {
        let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }

        self.fs
            .replace(&self.path, content.as_bytes())
            .map_err(|e| BlacklistError::io(&self.path, e))
    }
}

/// Drop blank lines and case-insensitive duplicates, then sort ordinally.
pub fn normalize_lines(lines: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(lines.len());
    let mut entries: Vec<String> = lines
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| seen.insert(line.to_ascii_lowercase()))
        .collect();

    entries.sort_unstable();
    entries
}
