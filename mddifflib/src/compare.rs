//! Comparison strategies for identity-matched assets.
//!
//! The engine hands every (source, target) pair that shares an identity key
//! to an [`AssetComparator`]. Implementations must be pure: no I/O, no
//! state carried between calls.

use crate::asset::Asset;

/// Outcome of comparing two matched assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Comparison {
    Unchanged,
    Modified { reason: String },
}

impl Comparison {
    pub fn modified(reason: impl Into<String>) -> Self {
        Comparison::Modified {
            reason: reason.into(),
        }
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, Comparison::Modified { .. })
    }
}

/// Decides whether two assets with the same identity count as modified.
pub trait AssetComparator {
    fn compare(&self, source: &Asset, target: &Asset) -> Comparison;
}

/// Compares extension first, then size against a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicComparator {
    /// Largest size difference in bytes still considered unchanged
    pub size_threshold: u64,
}

impl BasicComparator {
    pub fn new(size_threshold: u64) -> Self {
        Self { size_threshold }
    }
}

impl AssetComparator for BasicComparator {
    fn compare(&self, source: &Asset, target: &Asset) -> Comparison {
        if source.extension != target.extension {
            return Comparison::modified(format!(
                "Extension changed: {} -> {}",
                source.extension, target.extension
            ));
        }

        if source.size.abs_diff(target.size) > self.size_threshold {
            return Comparison::modified("Size changed");
        }

        Comparison::Unchanged
    }
}
