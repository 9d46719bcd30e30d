//! Asset and inventory data types.
//!
//! An [`Inventory`] is the immutable result of scanning one root directory:
//! every surviving entry keyed by its root-relative path. Assets are matched
//! across inventories by their *identity key* (parent directory + stem), not
//! by their full name, so `movie.mkv` and `movie.mp4` in the same directory
//! are the same asset in two encodings.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single file or directory entry recorded by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Root-relative path using `/` separators
    pub path: String,
    /// Final path segment without its last extension
    pub stem: String,
    /// Last extension including the dot, or empty
    pub extension: String,
    /// Size in bytes (0 for directories)
    pub size: u64,
    /// Whether the entry is a directory
    pub is_dir: bool,
}

impl Asset {
    /// Create a file asset, deriving stem and extension from the path.
    pub fn file(path: impl Into<String>, size: u64) -> Self {
        Self::new(path, size, false)
    }

    /// Create a directory asset, deriving stem and extension from the path.
    pub fn dir(path: impl Into<String>) -> Self {
        Self::new(path, 0, true)
    }

    fn new(path: impl Into<String>, size: u64, is_dir: bool) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path);
        let (stem, extension) = split_name(name);
        Self {
            stem: stem.to_string(),
            extension: extension.to_string(),
            path,
            size,
            is_dir,
        }
    }

    /// The key this asset is matched on across inventories.
    pub fn identity_key(&self) -> String {
        identity_key(&self.path, &self.stem)
    }
}

/// Split a file name into stem and extension at the last dot.
///
/// The extension keeps its leading dot. A name without a dot has an empty
/// extension; a name starting with its only dot has an empty stem.
///
/// ```
/// use mddifflib::split_name;
///
/// assert_eq!(split_name("movie.part1.mkv"), ("movie.part1", ".mkv"));
/// assert_eq!(split_name("README"), ("README", ""));
/// assert_eq!(split_name(".hidden"), ("", ".hidden"));
/// ```
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// Derive the identity key for a relative path and its stem.
///
/// Top-level entries are keyed by their stem alone; nested entries by
/// `parent/stem`. Paths must already be normalized (`/` separators, no
/// leading `./`, no trailing separator).
///
/// ```
/// use mddifflib::identity_key;
///
/// assert_eq!(identity_key("Movie.mkv", "Movie"), "Movie");
/// assert_eq!(identity_key("Shows/S01/E01.mp4", "E01"), "Shows/S01/E01");
/// ```
pub fn identity_key(relative_path: &str, stem: &str) -> String {
    match relative_path.rfind('/') {
        Some(idx) => format!("{}/{}", &relative_path[..idx], stem),
        None => stem.to_string(),
    }
}

/// Several assets of one inventory sharing an identity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCollision {
    pub key: String,
    /// Colliding asset paths, in inventory order
    pub paths: Vec<String>,
}

/// The complete result of scanning one root directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    root: PathBuf,
    assets: BTreeMap<String, Asset>,
}

impl Inventory {
    /// Create an empty inventory for a root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            assets: BTreeMap::new(),
        }
    }

    /// Builder: add an asset, replacing any asset with the same path.
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.insert(asset);
        self
    }

    pub(crate) fn insert(&mut self, asset: Asset) {
        self.assets.insert(asset.path.clone(), asset);
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, path: &str) -> Option<&Asset> {
        self.assets.get(path)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Iterate over assets in path order.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    /// Paths of every directory that has at least one entry in this inventory.
    pub fn populated_dirs(&self) -> BTreeSet<&str> {
        self.assets
            .keys()
            .filter_map(|path| path.rfind('/').map(|idx| &path[..idx]))
            .collect()
    }

    /// Every identity key shared by more than one asset.
    pub fn identity_collisions(&self) -> Vec<IdentityCollision> {
        let mut by_key: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for asset in self.iter() {
            by_key
                .entry(asset.identity_key())
                .or_default()
                .push(asset.path.clone());
        }

        by_key
            .into_iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(key, paths)| IdentityCollision { key, paths })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Inventory {
    type Item = &'a Asset;
    type IntoIter = std::collections::btree_map::Values<'a, String, Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("movie.mkv"), ("movie", ".mkv"));
        assert_eq!(split_name("Movie (2000).x264.mp4"), ("Movie (2000).x264", ".mp4"));
        assert_eq!(split_name("noext"), ("noext", ""));
        assert_eq!(split_name("trailing."), ("trailing", "."));
        assert_eq!(split_name(".nfo"), ("", ".nfo"));
    }

    #[test]
    fn test_asset_derives_stem_and_extension_from_last_segment() {
        let asset = Asset::file("Shows/Season.01/E01.srt", 42);
        assert_eq!(asset.stem, "E01");
        assert_eq!(asset.extension, ".srt");
        assert_eq!(asset.size, 42);
        assert!(!asset.is_dir);

        let dir = Asset::dir("Shows/Season.01");
        assert_eq!(dir.stem, "Season");
        assert_eq!(dir.extension, ".01");
        assert_eq!(dir.size, 0);
        assert!(dir.is_dir);
    }

    #[test]
    fn test_identity_key_top_level_is_stem() {
        assert_eq!(identity_key("movie.mkv", "movie"), "movie");
        assert_eq!(identity_key("movie", "movie"), "movie");
    }

    #[test]
    fn test_identity_key_nested() {
        assert_eq!(identity_key("a/b/movie.mkv", "movie"), "a/b/movie");
    }

    #[test]
    fn test_identity_key_ignores_extension_only() {
        let mkv = Asset::file("films/movie.mkv", 1);
        let mp4 = Asset::file("films/movie.mp4", 2);
        let other = Asset::file("films/movie (2000).mp4", 2);
        let moved = Asset::file("other/movie.mkv", 1);

        assert_eq!(mkv.identity_key(), mp4.identity_key());
        assert_ne!(mkv.identity_key(), other.identity_key());
        assert_ne!(mkv.identity_key(), moved.identity_key());
    }

    #[test]
    fn test_inventory_iterates_in_path_order() {
        let inv = Inventory::new("/root")
            .with_asset(Asset::file("b.mkv", 1))
            .with_asset(Asset::file("a.mkv", 1))
            .with_asset(Asset::file("a/z.mkv", 1));

        let paths: Vec<&str> = inv.iter().map(|a| a.path.as_str()).collect();
        assert_eq!(paths, vec!["a.mkv", "a/z.mkv", "b.mkv"]);
        assert_eq!(inv.len(), 3);
        assert_eq!(inv.root(), Path::new("/root"));
    }

    #[test]
    fn test_populated_dirs() {
        let inv = Inventory::new("/root")
            .with_asset(Asset::dir("empty"))
            .with_asset(Asset::dir("full"))
            .with_asset(Asset::file("full/a.mkv", 1))
            .with_asset(Asset::dir("full/nested"))
            .with_asset(Asset::file("full/nested/b.mkv", 1));

        let dirs = inv.populated_dirs();
        assert!(dirs.contains("full"));
        assert!(dirs.contains("full/nested"));
        assert!(!dirs.contains("empty"));
    }

    #[test]
    fn test_identity_collisions() {
        let inv = Inventory::new("/root")
            .with_asset(Asset::file("a.mkv", 1))
            .with_asset(Asset::file("a.mp4", 1))
            .with_asset(Asset::file("b.mkv", 1));

        let collisions = inv.identity_collisions();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].key, "a");
        assert_eq!(collisions[0].paths, vec!["a.mkv", "a.mp4"]);
    }
}
