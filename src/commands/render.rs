//! The `render` command: paginated human-readable view of a repository.

use crate::commands::session::Session;
use crate::core::budget::resolve_limit;
use crate::core::cache::Resolution;
use crate::core::error::Result;
use crate::core::output::{format_bytes, print_file_header, print_section_header};
use crate::core::pagination::{paginate, PageSize};
use crate::core::render::{ContentRenderer, PlainTextRenderer};
use crate::core::snapshot::RepositorySnapshot;
use crate::core::tree;
use colored::*;

pub struct RenderOptions {
    pub repo: String,
    pub reference: Option<String>,
    pub token: Option<String>,
    pub limit: Option<usize>,
    pub page: usize,
    pub page_size: Option<PageSize>,
}

pub async fn execute_render(options: RenderOptions) -> Result<()> {
    let mut session = Session::open(&options.repo, options.token)?;
    session.client().check_rate_limit().await;

    let limit = resolve_limit(
        options.limit.or(session.settings.file_limit()),
        session.client().has_token(),
    );
    let page_size = options
        .page_size
        .or(session.settings.page_size())
        .unwrap_or_default();

    // Explicitly chosen values become the persisted preference
    let mut settings_changed = false;
    if let Some(requested) = options.limit {
        session.settings.set_file_limit(requested);
        settings_changed = true;
    }
    if let Some(requested) = options.page_size {
        session.settings.set_page_size(requested);
        settings_changed = true;
    }
    if settings_changed {
        session.save_settings();
    }

    let loaded = session.load(options.reference.as_deref(), limit).await?;
    let snapshot = &loaded.snapshot;

    print_repository_header(snapshot);

    let page = paginate(snapshot.accepted.len(), page_size, options.page);

    if page.current_page == 1 && !snapshot.accepted.is_empty() {
        print_section_header("Structure");
        let navigation = tree::build_tree(snapshot.accepted_files());
        println!("{}", tree::render_decorated(&navigation));
    }

    print_section_header("Files");
    if snapshot.accepted.is_empty() {
        println!("{}", "No files to display".bright_black());
    }

    let renderer = PlainTextRenderer;
    for file in &snapshot.accepted[page.start..page.end] {
        print_file_header(&file.path, &format_bytes(file.size));
        match loaded.cache.resolve(&loaded.source, file).await {
            Resolution::Loaded(content) => {
                println!("{}", renderer.render(&file.path, &content));
            }
            Resolution::Failed(reason) => {
                println!("{}", format!("[Content not available: {reason}]").bright_black());
            }
        }
        println!();
    }

    print_summary(snapshot, &loaded.cache, &page);
    Ok(())
}

fn print_repository_header(snapshot: &RepositorySnapshot) {
    let repo = &snapshot.repo;
    println!("\n{} {}", repo.full_name.white().bold(), format!("({})", snapshot.reference).bright_black());
    if let Some(description) = &repo.description {
        println!("{}", description.white());
    }
    println!("{}", repo.html_url.bright_black());
}

fn print_summary(
    snapshot: &RepositorySnapshot,
    cache: &crate::core::cache::ContentCache,
    page: &crate::core::pagination::Page,
) {
    let buckets = &snapshot.buckets;
    let mut skipped = Vec::new();
    if !buckets.binary.is_empty() {
        skipped.push(format!("{} binary files", buckets.binary.len()));
    }
    if !buckets.large.is_empty() {
        skipped.push(format!("{} large files", buckets.large.len()));
    }
    if !buckets.ignored.is_empty() {
        skipped.push(format!("{} ignored files", buckets.ignored.len()));
    }
    if !buckets.truncated.is_empty() {
        skipped.push(format!("{} files due to limit", buckets.truncated.len()));
    }

    println!(
        "\n{} {}  {} {}  {} {}",
        "Files:".blue(),
        format!(
            "{}/{}/{}",
            cache.loaded_count(),
            snapshot.accepted.len(),
            snapshot.total_file_count()
        )
        .white(),
        "Size:".blue(),
        format_bytes(snapshot.total_size).white(),
        "Language:".blue(),
        snapshot
            .repo
            .language
            .as_deref()
            .unwrap_or("Mixed")
            .white(),
    );
    if !skipped.is_empty() {
        println!(
            "{} {} {}",
            "Skipped:".blue(),
            snapshot.skipped_count().to_string().white(),
            format!("({})", skipped.join(", ")).bright_black()
        );
    }

    let shown = page.end.saturating_sub(page.start);
    if shown > 0 {
        println!(
            "{}",
            format!(
                "Showing {}-{} of {} files (page {} of {})",
                page.start + 1,
                page.end,
                snapshot.accepted.len(),
                page.current_page,
                page.total_pages
            )
            .bright_black()
        );
    }
}
