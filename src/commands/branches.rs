//! The `branches` command: list branches and recent tags.

use crate::commands::session::Session;
use crate::core::error::Result;
use crate::core::output::print_section_header;
use colored::*;

pub struct BranchesOptions {
    pub repo: String,
    pub token: Option<String>,
}

pub async fn execute_branches(options: BranchesOptions) -> Result<()> {
    let session = Session::open(&options.repo, options.token)?;
    let references = session.client().references(session.locator()).await?;

    let (branches, tags): (Vec<_>, Vec<_>) =
        references.into_iter().partition(|entry| !entry.is_tag);

    print_section_header("Branches");
    if branches.is_empty() {
        println!("{}", "  (none)".bright_black());
    }
    for branch in &branches {
        let short_sha = &branch.sha[..branch.sha.len().min(7)];
        let marker = if branch.protected {
            " protected".bright_black().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}{marker}",
            branch.name.white(),
            short_sha.bright_black()
        );
    }

    if !tags.is_empty() {
        print_section_header("Tags");
        for tag in &tags {
            let short_sha = &tag.sha[..tag.sha.len().min(7)];
            println!("  {} {}", tag.name.white(), short_sha.bright_black());
        }
    }

    println!();
    Ok(())
}
