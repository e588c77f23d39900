//! The `tree` command: print the repository's directory structure.

use crate::commands::session::Session;
use crate::core::budget::MAX_FILE_LIMIT;
use crate::core::error::Result;
use crate::core::tree;
use colored::*;

pub struct TreeOptions {
    pub repo: String,
    pub reference: Option<String>,
    pub token: Option<String>,
}

pub async fn execute_tree(options: TreeOptions) -> Result<()> {
    let session = Session::open(&options.repo, options.token)?;
    // The overview tree ignores the render budget: every non-ignored entry
    // participates
    let loaded = session
        .load(options.reference.as_deref(), MAX_FILE_LIMIT)
        .await?;

    let snapshot = &loaded.snapshot;
    println!(
        "\n{} {}\n",
        snapshot.repo.full_name.white().bold(),
        format!("({})", snapshot.reference).bright_black()
    );

    let overview = tree::build_tree(snapshot.overview_files());
    let text = tree::render_text(&overview);
    if text.is_empty() {
        println!("{}", "No files to display".bright_black());
    } else {
        println!("{text}");
    }
    Ok(())
}
