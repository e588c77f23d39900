//! Core functionality for the repo-render tool.
//!
//! This module provides the classification, ordering, budgeting, caching,
//! and export pipeline, plus the GitHub API client and error handling.

pub mod budget;
pub mod cache;
pub mod classifier;
pub mod dirs;
pub mod error;
pub mod export;
pub mod github;
pub mod order;
pub mod output;
pub mod pagination;
pub mod render;
pub mod settings;
pub mod snapshot;
pub mod tree;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{RepoRenderError, Result};

// === Classification ===
// Pure (path, size) -> category mapping deciding what is renderable
pub use classifier::{classify, Bucket, Category};

// === Ordering and budgeting ===
// Deterministic display order and file-count truncation
pub use budget::{apply as apply_budget, resolve_limit, Partition};
pub use order::{compare_paths, order};

// === Snapshot ===
// The classified/ordered/budgeted file set for one repository reference
pub use snapshot::{build_snapshot, FileDescriptor, RepoMetadata, RepositorySnapshot};

// === Content resolution ===
// Memoized, deduplicated fetch with the three-tier fallback strategy
pub use cache::{ContentCache, ContentProvider, Resolution};

// === Pagination ===
// Derived page state, always clamped into range
pub use pagination::{paginate, Page, PageSize};

// === Directory trees ===
// Hierarchical view of the flat file listing, in two presentations
pub use tree::{build_tree, render_decorated, render_text, DirectoryNode};

// === GitHub API ===
// Listing provider, reference enumeration, and the content tiers
pub use github::{GithubClient, ReferenceEntry, RepoContentSource, RepoLocator};

// === Export ===
// Machine-consumption CXML document generation
pub use export::generate_cxml;

// === Rendering seam ===
// Narrow interface to the external display-rendering collaborator
pub use render::{ContentRenderer, PlainTextRenderer};

// === Settings ===
// Best-effort persistent user preferences
pub use settings::Settings;

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{format_bytes, print_error, print_info, print_section_header};
