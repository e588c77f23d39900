//! Repo Render - render a public GitHub repository as paginated text or a CXML export.
//!
//! This library provides the core functionality for repo-render: file
//! classification, deterministic ordering, file-count budgeting, memoized
//! and deduplicated content fetching, pagination, directory tree building,
//! and CXML export generation. It is designed to be fast, type-safe, and
//! predictable against large repositories.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - File classification and the classification buckets
//! - Display ordering and budget truncation
//! - The content cache with its three-tier fetch strategy
//! - Pagination, tree building, and CXML export
//! - The GitHub API client and error handling

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    apply_budget,
    build_snapshot,
    build_tree,
    classify,
    compare_paths,
    format_bytes,
    generate_cxml,
    // Content resolution
    order,
    paginate,
    render_decorated,
    render_text,
    resolve_limit,

    Bucket,
    // Classification
    Category,

    ContentCache,
    ContentProvider,
    ContentRenderer,

    DirectoryNode,
    // Snapshot model
    FileDescriptor,
    // GitHub API
    GithubClient,

    Page,
    PageSize,
    Partition,
    PlainTextRenderer,

    ReferenceEntry,
    RepoContentSource,
    RepoLocator,
    RepoMetadata,
    // Error handling
    RepoRenderError,
    RepositorySnapshot,
    Resolution,
    Result,

    // Settings
    Settings,
};
