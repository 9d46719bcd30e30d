//! Ignore list applied while collecting an inventory.
//!
//! Entries are ignored either by exact name (`.DS_Store`, `.git`, ...) or by
//! a glob pattern matched against the root-relative path. An ignored
//! directory is pruned together with everything below it.

use std::collections::BTreeSet;

use glob::Pattern;

use crate::error::MddiffError;
use crate::Result;

/// Entry names ignored when no other list is configured.
pub const DEFAULT_IGNORED_NAMES: [&str; 5] = [".DS_Store", "Thumbs.db", ".git", ".idea", ".vscode"];

/// Configuration for entry filtering during collection.
#[derive(Debug, Clone)]
pub struct IgnoreList {
    /// Exact entry names to skip
    pub names: BTreeSet<String>,
    /// Glob patterns matched against the relative path
    pub patterns: Vec<Pattern>,
}

impl Default for IgnoreList {
    fn default() -> Self {
        Self {
            names: DEFAULT_IGNORED_NAMES.iter().map(|s| s.to_string()).collect(),
            patterns: Vec::new(),
        }
    }
}

impl IgnoreList {
    /// An ignore list that skips nothing.
    pub fn empty() -> Self {
        Self {
            names: BTreeSet::new(),
            patterns: Vec::new(),
        }
    }

    /// Add an exact entry name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.names.insert(name.into());
        self
    }

    /// Add a glob pattern.
    pub fn pattern(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| MddiffError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.patterns.push(pat);
        Ok(self)
    }

    /// Add multiple glob patterns.
    pub fn patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self> {
        for pattern in patterns {
            self = self.pattern(pattern.as_ref())?;
        }
        Ok(self)
    }

    /// Check whether an entry should be skipped.
    ///
    /// `name` is the entry's final path segment, `relative_path` its
    /// `/`-separated path below the scanned root.
    pub fn is_ignored(&self, name: &str, relative_path: &str) -> bool {
        if self.names.contains(name) {
            return true;
        }
        self.patterns.iter().any(|p| p.matches(relative_path))
    }
}
