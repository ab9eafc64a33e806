//! Common-password blocklist
//!
//! Holds the case-insensitive set of passwords that are rejected outright.
//! The built-in list ships with the crate; deployments can extend it with
//! an external file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

/// Environment variable naming an extra blocklist file.
pub const BLOCKLIST_PATH_ENV: &str = "ANES_BLOCKLIST_PATH";

const BUILTIN_LIST: &str = include_str!("../assets/common-passwords.txt");

static DEFAULT_BLOCKLIST: LazyLock<Blocklist> = LazyLock::new(Blocklist::builtin);

#[derive(Error, Debug)]
pub enum BlocklistError {
    #[error("Blocklist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read blocklist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Blocklist file is empty")]
    EmptyFile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklist {
    entries: HashSet<String>,
}

impl Blocklist {
    /// The embedded list of the most common passwords.
    pub fn builtin() -> Self {
        Self {
            entries: parse_lines(BUILTIN_LIST),
        }
    }

    /// Loads a newline-separated blocklist file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File has no entries
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, BlocklistError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blocklist load FAILED: FileNotFound {:?}", path);
            return Err(BlocklistError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;
        let entries = parse_lines(&content);

        if entries.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Blocklist load FAILED: Empty file {:?}", path);
            return Err(BlocklistError::EmptyFile);
        }

        #[cfg(feature = "tracing")]
        tracing::info!("Blocklist loaded: {} passwords from {:?}", entries.len(), path);

        Ok(Self { entries })
    }

    /// Merges the entries of a blocklist file into this list.
    ///
    /// Returns the number of entries after the merge.
    pub fn extend_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, BlocklistError> {
        let other = Self::from_path(path)?;
        self.entries.extend(other.entries);
        Ok(self.entries.len())
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, password: &str) -> bool {
        self.entries.contains(&password.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Blocklist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

/// Returns the extra blocklist path from `ANES_BLOCKLIST_PATH`, if set.
pub fn get_blocklist_path() -> Option<PathBuf> {
    std::env::var(BLOCKLIST_PATH_ENV).ok().map(PathBuf::from)
}

/// Shared built-in blocklist, built on first use.
pub fn default_blocklist() -> &'static Blocklist {
    &DEFAULT_BLOCKLIST
}

fn parse_lines(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
        .collect()
}
