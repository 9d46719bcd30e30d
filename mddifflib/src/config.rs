//! TOML configuration file.
//!
//! ```toml
//! size_threshold = 1024
//! format = "json"
//!
//! [ignore]
//! names = [".DS_Store", "Thumbs.db", ".git", ".idea", ".vscode", "@eaDir"]
//! patterns = ["**/*.nfo"]
//! ```
//!
//! Every key is optional. `ignore.names` replaces the default name list;
//! `ignore.patterns` is added on top of it.

use std::path::Path;

use serde::Deserialize;

use crate::error::MddiffError;
use crate::ignore::IgnoreList;
use crate::output::OutputFormat;
use crate::Result;

/// Settings loaded from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub size_threshold: Option<u64>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub ignore: IgnoreSection,
}

/// The `[ignore]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgnoreSection {
    #[serde(default)]
    pub names: Option<Vec<String>>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl Config {
    /// Load and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| MddiffError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&text).map_err(|e| MddiffError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parsed output format, if one is configured.
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.format.as_deref().map(str::parse::<OutputFormat>).transpose()
    }

    /// Build the ignore list described by this config.
    pub fn ignore_list(&self) -> Result<IgnoreList> {
        let base = match &self.ignore.names {
            Some(names) => names
                .iter()
                .fold(IgnoreList::empty(), |list, name| list.name(name.as_str())),
            None => IgnoreList::default(),
        };
        base.patterns(&self.ignore.patterns)
    }
}
