//! CXML machine-consumption export.
//!
//! Wraps each accepted file's path and resolved content in a `<CXML>`
//! document, preceded by repository metadata, the directory structure, and
//! summary statistics. The export is bounded twice: the snapshot's own file
//! budget, and a stricter per-document cap with an explicit note when files
//! were left out. Per-file content is truncated at a fixed character count.
//!
//! Files whose content cannot be resolved appear with an inline placeholder;
//! a failed fetch never aborts the export.

use crate::core::cache::{ContentCache, ContentProvider, Resolution};
use crate::core::output::format_bytes;
use crate::core::snapshot::RepositorySnapshot;
use crate::core::tree;

/// Maximum number of `<File>` entries in one export document.
pub const EXPORT_FILE_CAP: usize = 100;

/// Maximum characters of one file's content carried in the export.
pub const EXPORT_CONTENT_CAP: usize = 10_000;

const CONTENT_UNAVAILABLE: &str = "[Content not available]";

/// Escape the five XML-reserved characters.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Truncate to the export cap on a character boundary, appending a marker.
fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(EXPORT_CONTENT_CAP) {
        Some((byte_offset, _)) => {
            format!(
                "{}\n... [Content truncated for CXML]",
                &content[..byte_offset]
            )
        }
        None => content.to_string(),
    }
}

/// Generate the CXML document for a snapshot, resolving content up to the
/// document cap through the cache.
pub async fn generate_cxml(
    snapshot: &RepositorySnapshot,
    cache: &ContentCache,
    provider: &dyn ContentProvider,
) -> String {
    let repo = &snapshot.repo;
    let mut cxml = format!(
        "<CXML>\n<Repository>\n<Name>{}</Name>\n<Description>{}</Description>\n<Language>{}</Language>\n<Stars>{}</Stars>\n<Forks>{}</Forks>\n</Repository>\n\n",
        escape_xml(&repo.full_name),
        escape_xml(repo.description.as_deref().unwrap_or("No description")),
        escape_xml(repo.language.as_deref().unwrap_or("Mixed")),
        repo.stars,
        repo.forks,
    );

    let overview = tree::build_tree(snapshot.overview_files());
    let structure = tree::render_text(&overview);
    if !structure.is_empty() {
        cxml.push_str(&format!(
            "<DirectoryStructure>\n<![CDATA[\n{structure}\n]]>\n</DirectoryStructure>\n\n"
        ));
    }

    // Failed files drop out of the exportable set; unresolved ones stay in
    let exportable: Vec<_> = snapshot
        .accepted
        .iter()
        .filter(|file| !matches!(cache.peek(&file.path), Some(Resolution::Failed(_))))
        .collect();

    cxml.push_str(&format!(
        "<Statistics>\n<TotalFiles>{}</TotalFiles>\n<ProcessedFiles>{}</ProcessedFiles>\n<TotalSize>{}</TotalSize>\n</Statistics>\n\n",
        snapshot.total_file_count(),
        exportable.len(),
        format_bytes(snapshot.total_size),
    ));

    cxml.push_str("<Files>\n");

    let document_count = exportable.len().min(EXPORT_FILE_CAP);
    for file in exportable.iter().take(document_count) {
        cxml.push_str(&format!(
            "<File>\n<Path>{}</Path>\n<Size>{}</Size>\n",
            escape_xml(&file.path),
            file.size
        ));

        let body = match cache.resolve(provider, file).await {
            Resolution::Loaded(content) => truncate_content(&content),
            Resolution::Failed(_) => CONTENT_UNAVAILABLE.to_string(),
        };
        cxml.push_str(&format!("<Content><![CDATA[{body}]]></Content>\n</File>\n\n"));
    }

    if exportable.len() > document_count {
        cxml.push_str(&format!(
            "<!-- Note: Only showing first {document_count} files out of {} total files for CXML size management -->\n",
            exportable.len()
        ));
    }

    cxml.push_str("</Files>\n</CXML>");
    cxml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::{build_snapshot, FileDescriptor, RepoMetadata};
    use async_trait::async_trait;
    use crate::core::error::{RepoRenderError, Result};

    struct FixedProvider {
        text: Option<String>,
    }

    #[async_trait]
    impl ContentProvider for FixedProvider {
        async fn fetch_raw(&self, _path: &str) -> Result<String> {
            self.text
                .clone()
                .ok_or_else(|| RepoRenderError::unexpected_status(404))
        }

        async fn fetch_blob(&self, _sha: &str) -> Result<String> {
            Err(RepoRenderError::unexpected_status(404))
        }

        async fn fetch_contents(&self, _path: &str) -> Result<String> {
            Err(RepoRenderError::unexpected_status(404))
        }
    }

    fn snapshot(paths: &[&str], limit: usize) -> RepositorySnapshot {
        let entries = paths
            .iter()
            .map(|p| FileDescriptor::new(p.to_string(), 42, format!("sha-{p}")))
            .collect();
        build_snapshot(
            RepoMetadata {
                full_name: "octo/example".to_string(),
                description: None,
                language: Some("Rust".to_string()),
                stars: 7,
                forks: 2,
                default_branch: "main".to_string(),
                html_url: "https://github.com/octo/example".to_string(),
            },
            "main".to_string(),
            entries,
            limit,
        )
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            escape_xml(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;"
        );
    }

    #[test]
    fn test_truncate_content_short_passthrough() {
        assert_eq!(truncate_content("short"), "short");
    }

    #[test]
    fn test_truncate_content_caps_long_input() {
        let long = "x".repeat(EXPORT_CONTENT_CAP + 500);
        let truncated = truncate_content(&long);
        assert!(truncated.ends_with("[Content truncated for CXML]"));
        assert!(truncated.len() < long.len());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let long = "é".repeat(EXPORT_CONTENT_CAP + 10);
        let truncated = truncate_content(&long);
        assert!(truncated.contains("truncated"));
    }

    #[tokio::test]
    async fn test_document_structure() {
        let provider = FixedProvider {
            text: Some("fn main() {}".to_string()),
        };
        let cache = ContentCache::new();
        let snapshot = snapshot(&["README.md", "src/main.rs"], 100);

        let cxml = generate_cxml(&snapshot, &cache, &provider).await;

        assert!(cxml.starts_with("<CXML>"));
        assert!(cxml.ends_with("</Files>\n</CXML>"));
        assert!(cxml.contains("<Name>octo/example</Name>"));
        assert!(cxml.contains("<Description>No description</Description>"));
        assert!(cxml.contains("<Language>Rust</Language>"));
        assert!(cxml.contains("<DirectoryStructure>"));
        assert!(cxml.contains("<Path>README.md</Path>"));
        assert!(cxml.contains("<Content><![CDATA[fn main() {}]]></Content>"));
        // Orderer output: README.md before src/main.rs
        let readme_pos = cxml.find("<Path>README.md</Path>").unwrap();
        let main_pos = cxml.find("<Path>src/main.rs</Path>").unwrap();
        assert!(readme_pos < main_pos);
    }

    #[tokio::test]
    async fn test_unresolvable_content_renders_placeholder() {
        let provider = FixedProvider { text: None };
        let cache = ContentCache::new();
        let snapshot = snapshot(&["a.txt"], 100);

        let cxml = generate_cxml(&snapshot, &cache, &provider).await;
        assert!(cxml.contains(CONTENT_UNAVAILABLE));
        assert!(cxml.contains("<Path>a.txt</Path>"));
    }

    #[tokio::test]
    async fn test_file_cap_with_note() {
        let paths: Vec<String> = (0..EXPORT_FILE_CAP + 5)
            .map(|i| format!("file{i:03}.txt"))
            .collect();
        let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let provider = FixedProvider {
            text: Some("x".to_string()),
        };
        let cache = ContentCache::new();
        let snapshot = snapshot(&path_refs, 2000);

        let cxml = generate_cxml(&snapshot, &cache, &provider).await;
        assert_eq!(cxml.matches("<File>").count(), EXPORT_FILE_CAP);
        assert!(cxml.contains("Only showing first 100 files"));
    }

    #[tokio::test]
    async fn test_already_failed_files_are_skipped() {
        let provider = FixedProvider { text: None };
        let cache = ContentCache::new();
        let snapshot = snapshot(&["a.txt", "b.txt"], 100);

        // Settle a.txt as failed before exporting
        cache.resolve(&provider, &snapshot.accepted[0]).await;
        assert!(matches!(
            cache.peek("a.txt"),
            Some(Resolution::Failed(_))
        ));

        let cxml = generate_cxml(&snapshot, &cache, &provider).await;
        assert!(!cxml.contains("<Path>a.txt</Path>"));
        assert!(cxml.contains("<Path>b.txt</Path>"));
        assert!(cxml.contains("<ProcessedFiles>1</ProcessedFiles>"));
    }
}
