//! # mddifflib
//!
//! Compare two media directory trees and classify their differences.
//!
//! ## Overview
//!
//! Generic directory diffs match files by full name, so re-encoding
//! `movie.mkv` to `movie.mp4` shows up as one deletion and one addition.
//! This library matches assets by *identity key*: the relative parent
//! directory joined with the file stem. Anything sharing a key across the
//! two trees is the same asset, and a pluggable comparator decides whether
//! it was modified.
//!
//! - **MISSING**: identity present in source, absent from target
//! - **EXTRA**: identity present in target, absent from source
//! - **MODIFIED**: identity present in both, comparator reports a change
//!
//! ## Pipeline
//!
//! 1. A [`Collector`] scans each root into an immutable [`Inventory`]
//! 2. [`diff_inventories`] classifies assets using an [`AssetComparator`]
//! 3. A [`Reporter`](output::Reporter) renders the [`DiffReport`]
//!
//! ## Example
//!
//! ```rust
//! use mddifflib::{diff_directories, DiffOptions, DiffType};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! let src = dir.path().join("src");
//! let tgt = dir.path().join("tgt");
//! fs::create_dir_all(&src).unwrap();
//! fs::create_dir_all(&tgt).unwrap();
//! fs::write(src.join("movie.mkv"), "frames").unwrap();
//! fs::write(tgt.join("movie.mp4"), "frames").unwrap();
//!
//! let report = diff_directories(&src, &tgt, &DiffOptions::new()).unwrap();
//! assert_eq!(report.summary.total_modified, 1);
//! assert_eq!(report.items[0].kind, DiffType::Modified);
//! ```

pub mod asset;
pub mod collector;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod ignore;
pub mod output;

pub use asset::{identity_key, split_name, Asset, IdentityCollision, Inventory};
pub use collector::{validate_root, Collector, LinearCollector};
pub use compare::{AssetComparator, BasicComparator, Comparison};
pub use config::Config;
pub use diff::{
    diff_directories, diff_directories_with, diff_inventories, DiffItem, DiffOptions, DiffReport,
    DiffSummary, DiffType,
};
pub use error::{MddiffError, RootRole};
pub use ignore::{IgnoreList, DEFAULT_IGNORED_NAMES};
pub use output::OutputFormat;

/// Result type for mddifflib operations
pub type Result<T> = std::result::Result<T, MddiffError>;
