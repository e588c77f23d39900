//! Directory tree construction and rendering.
//!
//! A flat list of slash-separated paths is folded into a [`DirectoryNode`]
//! hierarchy, from which two presentations are derived: a plain
//! connector-text form for the machine export and a decorated form with
//! icons for on-screen display. Both are pure functions of the same tree,
//! so they can never drift apart.
//!
//! # Public API
//! - [`DirectoryNode`]: Recursive directory/file structure
//! - [`build_tree`]: Fold paths into a root directory node
//! - [`render_text`]: Connector form (`├── `, `└── `)
//! - [`render_decorated`]: Indented form with per-extension icons
//!
//! Rendering order at every level: directories first, then files, both
//! sorted lexicographically by name.

use crate::core::classifier::file_extension;
use std::collections::BTreeMap;

/// One node in the derived directory hierarchy
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryNode {
    Directory {
        children: BTreeMap<String, DirectoryNode>,
    },
    File {
        path: String,
        size: u64,
    },
}

impl DirectoryNode {
    fn new_directory() -> Self {
        DirectoryNode::Directory {
            children: BTreeMap::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, DirectoryNode::Directory { .. })
    }
}

/// Fold `(path, size)` pairs into a root directory node, creating
/// intermediate directories on demand.
pub fn build_tree<'a>(files: impl IntoIterator<Item = (&'a str, u64)>) -> DirectoryNode {
    let mut root = BTreeMap::new();

    for (path, size) in files {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((leaf, directories)) = segments.split_last() else {
            continue;
        };

        let mut current = &mut root;
        for segment in directories {
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(DirectoryNode::new_directory);
            match entry {
                DirectoryNode::Directory { children } => current = children,
                // A file and a directory cannot share a path prefix in a
                // valid snapshot; if the listing disagrees, the directory wins
                DirectoryNode::File { .. } => {
                    *entry = DirectoryNode::new_directory();
                    match entry {
                        DirectoryNode::Directory { children } => current = children,
                        DirectoryNode::File { .. } => unreachable!(),
                    }
                }
            }
        }

        current.insert(
            leaf.to_string(),
            DirectoryNode::File {
                path: path.to_string(),
                size,
            },
        );
    }

    DirectoryNode::Directory { children: root }
}

/// Children in rendering order: directories before files, each group sorted
/// by name (the BTreeMap already provides lexicographic order).
fn ordered_children(children: &BTreeMap<String, DirectoryNode>) -> Vec<(&String, &DirectoryNode)> {
    let mut ordered: Vec<_> = children.iter().filter(|(_, n)| n.is_directory()).collect();
    ordered.extend(children.iter().filter(|(_, n)| !n.is_directory()));
    ordered
}

/// Render the plain connector-text form used by the machine export.
///
/// Root-level entries are bare names (directories suffixed with `/`); nested
/// entries carry `├── `/`└── ` connectors and `│   ` continuation prefixes.
pub fn render_text(root: &DirectoryNode) -> String {
    let mut lines = Vec::new();
    if let DirectoryNode::Directory { children } = root {
        for (name, node) in ordered_children(children) {
            match node {
                DirectoryNode::Directory { children } => {
                    lines.push(format!("{name}/"));
                    render_text_level(children, "", &mut lines);
                }
                DirectoryNode::File { .. } => lines.push(name.clone()),
            }
        }
    }
    lines.join("\n")
}

fn render_text_level(
    children: &BTreeMap<String, DirectoryNode>,
    prefix: &str,
    lines: &mut Vec<String>,
) {
    let ordered = ordered_children(children);
    let count = ordered.len();

    for (index, (name, node)) in ordered.into_iter().enumerate() {
        let is_last = index == count - 1;
        let connector = if is_last { "└── " } else { "├── " };
        match node {
            DirectoryNode::Directory { children } => {
                lines.push(format!("{prefix}{connector}{name}/"));
                let next_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
                render_text_level(children, &next_prefix, lines);
            }
            DirectoryNode::File { .. } => lines.push(format!("{prefix}{connector}{name}")),
        }
    }
}

/// Render the decorated on-screen form: two-space indentation per level,
/// a folder icon for directories and a per-extension icon for files.
pub fn render_decorated(root: &DirectoryNode) -> String {
    let mut lines = Vec::new();
    if let DirectoryNode::Directory { children } = root {
        render_decorated_level(children, 0, &mut lines);
    }
    lines.join("\n")
}

fn render_decorated_level(
    children: &BTreeMap<String, DirectoryNode>,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    for (name, node) in ordered_children(children) {
        match node {
            DirectoryNode::Directory { children } => {
                lines.push(format!("{indent}📁 {name}"));
                render_decorated_level(children, depth + 1, lines);
            }
            DirectoryNode::File { .. } => {
                lines.push(format!("{indent}{} {name}", file_icon(name)));
            }
        }
    }
}

/// Icon for a file name, dispatched on its extension.
pub fn file_icon(name: &str) -> &'static str {
    match file_extension(name).as_str() {
        "js" => "📜",
        "ts" => "📘",
        "jsx" | "tsx" => "⚛️",
        "py" => "🐍",
        "rb" => "💎",
        "go" => "🐹",
        "rs" => "🦀",
        "php" => "🐘",
        "java" => "☕",
        "c" | "cpp" => "📝",
        "cs" => "🔷",
        "html" => "🌐",
        "css" | "scss" | "sass" => "🎨",
        "json" => "📋",
        "xml" | "yaml" | "yml" | "txt" => "📄",
        "md" => "📖",
        "pdf" => "📕",
        "png" | "jpg" | "jpeg" | "gif" | "svg" => "🖼️",
        "mp4" => "🎬",
        "mp3" => "🎵",
        "zip" | "tar" | "gz" => "📦",
        _ => "📄",
    }
}
