//! Repository snapshot: the classified, ordered, budgeted file set for one
//! repository at one reference.
//!
//! A snapshot is created fresh on every successful repository fetch or
//! branch/tag switch and wholly replaced on the next one; nothing is merged
//! in place. The overflow buckets exist for reporting only and are never
//! fetched.
//!
//! # Public API
//! - [`FileDescriptor`]: One repository entry (path, size, content key)
//! - [`RepoMetadata`]: Repository-level metadata from the listing provider
//! - [`RepositorySnapshot`]: The aggregate classification result
//! - [`build_snapshot`]: Run the classify → order → budget pipeline

use crate::core::budget;
use crate::core::classifier::{classify, Bucket};
use crate::core::order;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies one repository entry. The `sha` is the content key used for
/// blob lookups, stable for a given snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub path: String,
    pub size: u64,
    pub sha: String,
}

impl FileDescriptor {
    pub fn new(path: String, size: u64, sha: String) -> Self {
        Self { path, size, sha }
    }
}

/// Repository-level metadata surfaced in the header and the export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoMetadata {
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub default_branch: String,
    pub html_url: String,
}

/// Non-included files grouped by the reason they were excluded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverflowBuckets {
    pub ignored: Vec<FileDescriptor>,
    pub binary: Vec<FileDescriptor>,
    pub large: Vec<FileDescriptor>,
    /// Accepted by classification but dropped by the file-count budget
    pub truncated: Vec<FileDescriptor>,
}

/// The full classified/ordered/budgeted file set for one repository at one
/// reference
#[derive(Debug, Clone, PartialEq)]
pub struct RepositorySnapshot {
    pub repo: RepoMetadata,
    pub reference: String,
    /// Included files in display order, after budgeting
    pub accepted: Vec<FileDescriptor>,
    pub buckets: OverflowBuckets,
    /// Total byte size of the accepted files
    pub total_size: u64,
    pub fetched_at: DateTime<Utc>,
}

impl RepositorySnapshot {
    /// Count of every classified file that was not ignored outright.
    pub fn total_file_count(&self) -> usize {
        self.accepted.len()
            + self.buckets.truncated.len()
            + self.buckets.large.len()
            + self.buckets.binary.len()
    }

    /// Count of files excluded for any reason, for the skipped summary.
    pub fn skipped_count(&self) -> usize {
        self.buckets.ignored.len()
            + self.buckets.binary.len()
            + self.buckets.large.len()
            + self.buckets.truncated.len()
    }

    /// The non-ignored file set the overview tree is built from: everything
    /// that survived the ignore rules, whether or not it was accepted.
    pub fn overview_files(&self) -> Vec<(&str, u64)> {
        self.accepted
            .iter()
            .chain(&self.buckets.truncated)
            .chain(&self.buckets.large)
            .chain(&self.buckets.binary)
            .map(|file| (file.path.as_str(), file.size))
            .collect()
    }

    /// The accepted set as `(path, size)` pairs for the navigation tree.
    pub fn accepted_files(&self) -> Vec<(&str, u64)> {
        self.accepted
            .iter()
            .map(|file| (file.path.as_str(), file.size))
            .collect()
    }
}

/// Classify every entry, order the accepted subset, and truncate it to the
/// file-count limit. Ignored entries never reach the orderer or budgeter.
pub fn build_snapshot(
    repo: RepoMetadata,
    reference: String,
    entries: Vec<FileDescriptor>,
    limit: usize,
) -> RepositorySnapshot {
    let mut included = Vec::new();
    let mut buckets = OverflowBuckets::default();

    for entry in entries {
        match classify(&entry.path, entry.size).bucket {
            Bucket::Ignored => buckets.ignored.push(entry),
            Bucket::Binary => buckets.binary.push(entry),
            Bucket::TooLarge => buckets.large.push(entry),
            Bucket::Text => included.push(entry),
        }
    }

    let ordered = order::order(included);
    let partition = budget::apply(ordered, limit);
    buckets.truncated = partition.overflow;

    let total_size = partition.kept.iter().map(|file| file.size).sum();

    RepositorySnapshot {
        repo,
        reference,
        accepted: partition.kept,
        buckets,
        total_size,
        fetched_at: Utc::now(),
    }
}
