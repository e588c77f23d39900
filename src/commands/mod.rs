//! Command implementations for the repo-render CLI.

pub mod branches;
pub mod export;
pub mod render;
pub mod session;
pub mod tree;

pub use branches::{execute_branches, BranchesOptions};
pub use export::{execute_export, ExportOptions};
pub use render::{execute_render, RenderOptions};
pub use session::{LoadedSnapshot, Session};
pub use tree::{execute_tree, TreeOptions};
