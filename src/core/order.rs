//! Deterministic display and processing order for repository files.
//!
//! The ordering rule keeps shallow, top-level files ahead of deeply nested
//! ones so the most broadly useful files surface first, with one special
//! case: a root-level `README.md` always sorts to the very front.
//!
//! # Public API
//! - [`order`]: Sort a list of descriptors into display order
//! - [`compare_paths`]: The underlying total-order comparator
//!
//! The comparator is a total order and the sort is stable, so ordering is
//! idempotent and reproducible across repositories.

use crate::core::snapshot::FileDescriptor;
use std::cmp::Ordering;

/// Compare two slash-separated paths in display order.
///
/// Root `README.md` (case-insensitive, no directory component) first, then
/// ascending path depth, then pairwise lexicographic comparison of segments.
pub fn compare_paths(a: &str, b: &str) -> Ordering {
    let a_is_root_readme = a.eq_ignore_ascii_case("readme.md");
    let b_is_root_readme = b.eq_ignore_ascii_case("readme.md");

    match (a_is_root_readme, b_is_root_readme) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let a_segments: Vec<&str> = a.split('/').collect();
    let b_segments: Vec<&str> = b.split('/').collect();

    if a_segments.len() != b_segments.len() {
        return a_segments.len().cmp(&b_segments.len());
    }

    for (a_segment, b_segment) in a_segments.iter().zip(b_segments.iter()) {
        let comparison = a_segment.cmp(b_segment);
        if comparison != Ordering::Equal {
            return comparison;
        }
    }

    Ordering::Equal
}

/// Sort descriptors into display order. Stable for ties.
pub fn order(mut files: Vec<FileDescriptor>) -> Vec<FileDescriptor> {
    files.sort_by(|a, b| compare_paths(&a.path, &b.path));
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(paths: &[&str]) -> Vec<FileDescriptor> {
        paths
            .iter()
            .map(|path| FileDescriptor::new(path.to_string(), 10, format!("sha-{path}")))
            .collect()
    }

    fn paths(files: &[FileDescriptor]) -> Vec<&str> {
        files.iter().map(|file| file.path.as_str()).collect()
    }

    #[test]
    fn test_root_readme_sorts_first() {
        let sorted = order(descriptors(&["src/a.py", "README.md", "a.png"]));
        assert_eq!(paths(&sorted), vec!["README.md", "a.png", "src/a.py"]);
    }

    #[test]
    fn test_readme_case_insensitive() {
        let sorted = order(descriptors(&["aaa.txt", "readme.MD"]));
        assert_eq!(paths(&sorted), vec!["readme.MD", "aaa.txt"]);
    }

    #[test]
    fn test_nested_readme_not_special() {
        let sorted = order(descriptors(&["docs/README.md", "zzz.txt"]));
        // One segment beats two, so the root file wins despite its name
        assert_eq!(paths(&sorted), vec!["zzz.txt", "docs/README.md"]);
    }

    #[test]
    fn test_depth_before_lexicographic() {
        let sorted = order(descriptors(&["a/b/c.txt", "z.txt", "a/b.txt"]));
        assert_eq!(paths(&sorted), vec!["z.txt", "a/b.txt", "a/b/c.txt"]);
    }

    #[test]
    fn test_segmentwise_comparison_within_depth() {
        let sorted = order(descriptors(&["src/b.py", "src/a.py", "lib/z.py"]));
        assert_eq!(paths(&sorted), vec!["lib/z.py", "src/a.py", "src/b.py"]);
    }

    #[test]
    fn test_idempotent() {
        let once = order(descriptors(&["b/x.rs", "a.rs", "README.md", "b/a.rs"]));
        let twice = order(once.clone());
        assert_eq!(paths(&once), paths(&twice));
    }

    #[test]
    fn test_comparator_is_consistent() {
        let inputs = ["README.md", "a.txt", "b/c.txt", "b/d.txt", "e/f/g.txt"];
        for a in &inputs {
            assert_eq!(compare_paths(a, a), Ordering::Equal);
            for b in &inputs {
                assert_eq!(compare_paths(a, b), compare_paths(b, a).reverse());
            }
        }
    }
}
