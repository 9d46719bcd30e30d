//! Directory traversal producing an [`Inventory`].
//!
//! Collection completes or fails as a whole: the first walk error aborts
//! the scan and no partial inventory is returned.

use std::path::{Component, Path};

use tracing::debug;
use walkdir::WalkDir;

use crate::asset::{Asset, Inventory};
use crate::error::{MddiffError, RootRole};
use crate::ignore::IgnoreList;
use crate::Result;

/// Produces an inventory for a root directory.
pub trait Collector {
    fn collect(&self, root: &Path) -> Result<Inventory>;
}

/// Single-threaded collector built on `walkdir`.
#[derive(Debug, Clone, Default)]
pub struct LinearCollector {
    ignore: IgnoreList,
}

impl LinearCollector {
    pub fn new(ignore: IgnoreList) -> Self {
        Self { ignore }
    }
}

impl Collector for LinearCollector {
    fn collect(&self, root: &Path) -> Result<Inventory> {
        let mut inventory = Inventory::new(root);

        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // Always include the root directory
                if e.depth() == 0 {
                    return true;
                }
                // Undecodable names are kept so the loop below can reject them
                match (e.file_name().to_str(), relative_path(e.path(), root)) {
                    (Some(name), Ok(rel)) => !self.ignore.is_ignored(name, &rel),
                    _ => true,
                }
            });

        for entry in walker {
            let entry = entry.map_err(|source| MddiffError::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            if entry.depth() == 0 {
                continue;
            }

            let rel = relative_path(entry.path(), root)?;
            let asset = if entry.file_type().is_dir() {
                Asset::dir(rel)
            } else {
                let metadata = entry.metadata().map_err(|source| MddiffError::Walk {
                    root: root.to_path_buf(),
                    source,
                })?;
                Asset::file(rel, metadata.len())
            };
            inventory.insert(asset);
        }

        debug!(root = %root.display(), assets = inventory.len(), "collected inventory");
        Ok(inventory)
    }
}

/// Check that a root argument exists and is a directory.
pub fn validate_root(path: &Path, role: RootRole) -> Result<()> {
    let reason = if !path.exists() {
        "does not exist"
    } else if !path.is_dir() {
        "is not a directory"
    } else {
        return Ok(());
    };

    Err(MddiffError::InvalidRoot {
        role,
        path: path.to_path_buf(),
        reason,
    })
}

/// Convert a path below `base` into a `/`-separated relative path.
///
/// Names that are not valid UTF-8 are an error: a lossy conversion would
/// let two distinct entries share one inventory key.
fn relative_path(path: &Path, base: &Path) -> Result<String> {
    let rel = path.strip_prefix(base).unwrap_or(path);
    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| MddiffError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
