//! Diff engine: classify assets of two inventories as missing, extra or
//! modified.
//!
//! ## Matching
//!
//! Assets are matched across inventories by identity key (parent directory
//! plus stem), never by full name. A rename that only touches the extension
//! is therefore one MODIFIED item; any other rename is one MISSING plus one
//! EXTRA item.
//!
//! ## Algorithm
//!
//! 1. Index the target inventory by identity key. When two target assets
//!    share a key the one later in path order wins, and the collision is
//!    logged.
//! 2. Walk the source inventory. A source asset is matched to the target
//!    asset with the same path if there is one, otherwise to the indexed
//!    asset for its key. An unmatched asset is MISSING; a matched one
//!    consumes its key and is handed to the comparator, which may make it
//!    MODIFIED.
//! 3. Every target asset whose key was never consumed is EXTRA.
//!
//! Directories that contain entries are never reported as MISSING or EXTRA
//! themselves; their descendants carry their own keys and are reported
//! individually. Empty directories are treated like files.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::asset::{Asset, Inventory};
use crate::collector::{validate_root, Collector, LinearCollector};
use crate::compare::{AssetComparator, BasicComparator, Comparison};
use crate::error::RootRole;
use crate::ignore::IgnoreList;
use crate::Result;

/// Kind of a reported difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffType {
    /// In source, not in target
    Missing,
    /// In target, not in source
    Extra,
    /// In both, but the comparator found a difference
    Modified,
}

impl fmt::Display for DiffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiffType::Missing => "MISSING",
            DiffType::Extra => "EXTRA",
            DiffType::Modified => "MODIFIED",
        };
        f.write_str(s)
    }
}

/// A single reported difference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffItem {
    #[serde(rename = "type")]
    pub kind: DiffType,
    /// Source-relative path for MISSING/MODIFIED, target-relative for EXTRA
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tgt_size: Option<u64>,
}

impl DiffItem {
    fn missing(source: &Asset) -> Self {
        Self {
            kind: DiffType::Missing,
            path: source.path.clone(),
            reason: None,
            src_size: Some(source.size),
            tgt_size: None,
        }
    }

    fn extra(target: &Asset) -> Self {
        Self {
            kind: DiffType::Extra,
            path: target.path.clone(),
            reason: None,
            src_size: None,
            tgt_size: Some(target.size),
        }
    }

    fn modified(source: &Asset, target: &Asset, reason: String) -> Self {
        Self {
            kind: DiffType::Modified,
            path: source.path.clone(),
            reason: Some(reason),
            src_size: Some(source.size),
            tgt_size: Some(target.size),
        }
    }
}

/// Counts carried alongside the item list.
///
/// EXTRA items are deliberately not counted here; use
/// [`DiffReport::extra_count`] to derive that number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub total_missing: usize,
    pub total_modified: usize,
}

/// Result of diffing two inventories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub source_dir: String,
    pub target_dir: String,
    /// Source-driven items in source path order, then EXTRA items in target path order
    pub items: Vec<DiffItem>,
    pub summary: DiffSummary,
}

impl DiffReport {
    /// Create an empty report for two roots.
    pub fn new(source_dir: impl Into<String>, target_dir: impl Into<String>) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            items: Vec::new(),
            summary: DiffSummary::default(),
        }
    }

    /// Read a report back from its structured JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// True when the two trees have no differences.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one kind, in report order.
    pub fn items_of(&self, kind: DiffType) -> impl Iterator<Item = &DiffItem> {
        self.items.iter().filter(move |item| item.kind == kind)
    }

    pub fn extra_count(&self) -> usize {
        self.items_of(DiffType::Extra).count()
    }

    fn push(&mut self, item: DiffItem) {
        match item.kind {
            DiffType::Missing => self.summary.total_missing += 1,
            DiffType::Modified => self.summary.total_modified += 1,
            DiffType::Extra => {}
        }
        self.items.push(item);
    }
}

/// Compute the differences between two inventories.
///
/// This is a pure function of its inputs: it performs no I/O and cannot
/// fail. Output order follows the inventories' path order.
///
/// # Example
///
/// ```rust
/// use mddifflib::{diff_inventories, Asset, BasicComparator, DiffType, Inventory};
///
/// let source = Inventory::new("/src").with_asset(Asset::file("movie.mkv", 100));
/// let target = Inventory::new("/tgt").with_asset(Asset::file("movie.mp4", 100));
///
/// let report = diff_inventories(&source, &target, &BasicComparator::default());
/// assert_eq!(report.items.len(), 1);
/// assert_eq!(report.items[0].kind, DiffType::Modified);
/// ```
pub fn diff_inventories(
    source: &Inventory,
    target: &Inventory,
    comparator: &dyn AssetComparator,
) -> DiffReport {
    let mut report = DiffReport::new(
        source.root().display().to_string(),
        target.root().display().to_string(),
    );

    let target_index = index_by_identity(target);
    let mut consumed: HashSet<String> = HashSet::new();

    let source_dirs = source.populated_dirs();
    for src in source {
        let key = src.identity_key();
        let matched = target
            .get(&src.path)
            .or_else(|| target_index.get(&key).copied());
        match matched {
            None => {
                if src.is_dir && source_dirs.contains(src.path.as_str()) {
                    continue;
                }
                report.push(DiffItem::missing(src));
            }
            Some(tgt) => {
                if let Comparison::Modified { reason } = comparator.compare(src, tgt) {
                    report.push(DiffItem::modified(src, tgt, reason));
                }
                consumed.insert(key);
            }
        }
    }

    let target_dirs = target.populated_dirs();
    for tgt in target {
        if consumed.contains(&tgt.identity_key()) {
            continue;
        }
        if tgt.is_dir && target_dirs.contains(tgt.path.as_str()) {
            continue;
        }
        report.push(DiffItem::extra(tgt));
    }

    info!(
        missing = report.summary.total_missing,
        modified = report.summary.total_modified,
        extra = report.extra_count(),
        "diff complete"
    );
    report
}

/// Index an inventory by identity key; later assets replace earlier ones.
fn index_by_identity(inventory: &Inventory) -> HashMap<String, &Asset> {
    let mut index: HashMap<String, &Asset> = HashMap::with_capacity(inventory.len());
    for asset in inventory {
        if let Some(previous) = index.insert(asset.identity_key(), asset) {
            warn!(
                key = %asset.identity_key(),
                displaced = %previous.path,
                kept = %asset.path,
                "identity collision in target inventory"
            );
        }
    }
    index
}

/// Options for diffing two directories.
#[derive(Debug, Clone, Default)]
pub struct DiffOptions {
    /// Largest size difference in bytes still considered unchanged
    pub size_threshold: u64,
    /// Entries skipped while collecting both trees
    pub ignore: IgnoreList,
}

impl DiffOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size threshold.
    pub fn size_threshold(mut self, bytes: u64) -> Self {
        self.size_threshold = bytes;
        self
    }

    /// Set the ignore list.
    pub fn ignore(mut self, ignore: IgnoreList) -> Self {
        self.ignore = ignore;
        self
    }
}

/// Diff two directories with the shipped collector and comparator.
///
/// Both roots are validated before anything is scanned, and both trees are
/// fully collected before the engine runs.
///
/// # Example
///
/// ```rust,ignore
/// use mddifflib::{diff_directories, DiffOptions};
///
/// let report = diff_directories("/media/movies", "/backup/movies", &DiffOptions::new())?;
/// println!("{} missing", report.summary.total_missing);
/// ```
pub fn diff_directories(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    options: &DiffOptions,
) -> Result<DiffReport> {
    let collector = LinearCollector::new(options.ignore.clone());
    let comparator = BasicComparator::new(options.size_threshold);
    diff_directories_with(source, target, &collector, &comparator)
}

/// Diff two directories with caller-supplied strategies.
pub fn diff_directories_with(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    collector: &dyn Collector,
    comparator: &dyn AssetComparator,
) -> Result<DiffReport> {
    let source = source.as_ref();
    let target = target.as_ref();

    validate_root(source, RootRole::Source)?;
    validate_root(target, RootRole::Target)?;

    let source_inv = collector.collect(source)?;
    let target_inv = collector.collect(target)?;

    Ok(diff_inventories(&source_inv, &target_inv, comparator))
}
