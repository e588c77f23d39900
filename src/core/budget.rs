//! File-count budgeting: truncate an ordered file list to a configured limit.
//!
//! The budgeter itself never reorders: it splits an already-ordered list into
//! the kept prefix and the overflow tail, so truncation always drops the
//! least important files per the display ordering.
//!
//! # Public API
//! - [`apply`]: Split an ordered list into kept and overflow partitions
//! - [`resolve_limit`]: Turn an optional user override and token presence
//!   into a concrete limit
//! - [`Partition`]: The kept/overflow split

use crate::core::snapshot::FileDescriptor;

/// Hard ceiling on any user-supplied file limit.
pub const MAX_FILE_LIMIT: usize = 2000;

/// Default limit when a GitHub token is available (generous request budget).
pub const DEFAULT_LIMIT_WITH_TOKEN: usize = 200;

/// Default limit for anonymous access (60 requests/hour against the API).
pub const DEFAULT_LIMIT_WITHOUT_TOKEN: usize = 50;

/// Result of applying a file-count budget to an ordered list
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub kept: Vec<FileDescriptor>,
    pub overflow: Vec<FileDescriptor>,
}

/// Split an ordered list at `limit`. Concatenating `kept` and `overflow`
/// reproduces the input exactly.
pub fn apply(files: Vec<FileDescriptor>, limit: usize) -> Partition {
    if files.len() <= limit {
        return Partition {
            kept: files,
            overflow: Vec::new(),
        };
    }

    let mut kept = files;
    let overflow = kept.split_off(limit);
    Partition { kept, overflow }
}

/// Resolve the effective file limit from an optional override.
///
/// An override wins, clamped to `1..=MAX_FILE_LIMIT`. Without one, the
/// default reflects whether an API token raises the request budget.
pub fn resolve_limit(user_override: Option<usize>, has_token: bool) -> usize {
    match user_override {
        Some(limit) => limit.clamp(1, MAX_FILE_LIMIT),
        None => {
            if has_token {
                DEFAULT_LIMIT_WITH_TOKEN
            } else {
                DEFAULT_LIMIT_WITHOUT_TOKEN
            }
        }
    }
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

    #[test]
    fn test_under_limit_keeps_everything() {
        let partition = apply(descriptors(&["a", "b"]), 5);
        assert_eq!(partition.kept.len(), 2);
        assert!(partition.overflow.is_empty());
    }

    #[test]
    fn test_over_limit_splits_in_order() {
        let partition = apply(descriptors(&["README.md", "src/a.py", "src/b.py"]), 2);
        let kept: Vec<&str> = partition.kept.iter().map(|f| f.path.as_str()).collect();
        let overflow: Vec<&str> = partition.overflow.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(kept, vec!["README.md", "src/a.py"]);
        assert_eq!(overflow, vec!["src/b.py"]);
    }

    #[test]
    fn test_concatenation_equality() {
        let input = descriptors(&["a", "b", "c", "d", "e"]);
        for limit in 0..=6 {
            let partition = apply(input.clone(), limit);
            assert_eq!(partition.kept.len(), input.len().min(limit));
            let mut rejoined = partition.kept.clone();
            rejoined.extend(partition.overflow.clone());
            assert_eq!(rejoined, input);
        }
    }

    #[test]
    fn test_exact_limit_has_no_overflow() {
        let partition = apply(descriptors(&["a", "b", "c"]), 3);
        assert_eq!(partition.kept.len(), 3);
        assert!(partition.overflow.is_empty());
    }

    #[test]
    fn test_resolve_limit_defaults() {
        assert_eq!(resolve_limit(None, true), DEFAULT_LIMIT_WITH_TOKEN);
        assert_eq!(resolve_limit(None, false), DEFAULT_LIMIT_WITHOUT_TOKEN);
    }

    #[test]
    fn test_resolve_limit_override_wins() {
        assert_eq!(resolve_limit(Some(500), false), 500);
        assert_eq!(resolve_limit(Some(500), true), 500);
    }

    #[test]
    fn test_resolve_limit_clamped() {
        assert_eq!(resolve_limit(Some(0), false), 1);
        assert_eq!(resolve_limit(Some(1_000_000), true), MAX_FILE_LIMIT);
    }
}
