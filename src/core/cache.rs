//! Content cache and tiered fetch strategy.
//!
//! [`ContentCache::resolve`] turns a file descriptor into a [`Resolution`]
//! with two guarantees:
//!
//! - **Memoization**: once a path settles (loaded or failed), every later
//!   call returns the cached outcome without touching the provider, for the
//!   lifetime of the snapshot.
//! - **At-most-one in-flight fetch per path**: concurrent callers for the
//!   same unresolved path all await the one fetch already running instead of
//!   starting their own.
//!
//! The fetch strategy tries three retrieval tiers in a fixed order, moving
//! on only when a tier fails: the raw-content endpoint (no elevated
//! privilege for public data), the content-addressed blob lookup, and the
//! generic per-path contents endpoint. Exhausting all three produces a
//! `Failed` resolution carrying the per-tier reasons; failure is a value at
//! this boundary, never a propagated fault.
//!
//! The cache map and the in-flight table share one mutex and are mutated
//! only here, so check-then-insert is atomic with respect to interleavings
//! of resolve's own continuations. The lock is never held across an await.

use crate::core::error::{RepoRenderError, Result};
use crate::core::snapshot::FileDescriptor;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

/// Single-file byte provider: the three retrieval tiers the fetch strategy
/// walks through. Implemented by the GitHub client and by test mocks.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Tier 1: direct raw content by path
    async fn fetch_raw(&self, path: &str) -> Result<String>;
    /// Tier 2: content-addressed blob lookup by content key
    async fn fetch_blob(&self, sha: &str) -> Result<String>;
    /// Tier 3: generic per-path contents endpoint
    async fn fetch_contents(&self, path: &str) -> Result<String>;
}

/// Settled outcome of resolving one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Loaded(String),
    Failed(String),
}

impl Resolution {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Resolution::Loaded(_))
    }
}

enum Slot {
    Resolved(Resolution),
    InFlight(watch::Receiver<Option<Resolution>>),
}

enum Action {
    Return(Resolution),
    Wait(watch::Receiver<Option<Resolution>>),
    Fetch(watch::Sender<Option<Resolution>>),
}

/// Path-keyed content cache plus the in-flight request table
#[derive(Default)]
pub struct ContentCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // A poisoned lock only means another resolve panicked mid-update;
        // the map itself is still structurally sound
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Resolve a descriptor's content, memoized and deduplicated per path.
    pub async fn resolve(
        &self,
        provider: &dyn ContentProvider,
        descriptor: &FileDescriptor,
    ) -> Resolution {
        loop {
            let action = {
                let mut slots = self.lock();
                match slots.get(&descriptor.path) {
                    Some(Slot::Resolved(resolution)) => Action::Return(resolution.clone()),
                    Some(Slot::InFlight(receiver)) => Action::Wait(receiver.clone()),
                    None => {
                        let (sender, receiver) = watch::channel(None);
                        slots.insert(descriptor.path.clone(), Slot::InFlight(receiver));
                        Action::Fetch(sender)
                    }
                }
            };

            match action {
                Action::Return(resolution) => return resolution,
                Action::Wait(mut receiver) => {
                    match receiver.wait_for(|value| value.is_some()).await {
                        Ok(value) => {
                            if let Some(resolution) = value.as_ref() {
                                return resolution.clone();
                            }
                        }
                        Err(_) => {
                            // The initiating future was dropped before the
                            // fetch settled; clear the stale entry and retry
                            let mut slots = self.lock();
                            if matches!(slots.get(&descriptor.path), Some(Slot::InFlight(_))) {
                                slots.remove(&descriptor.path);
                            }
                        }
                    }
                }
                Action::Fetch(sender) => {
                    let resolution = fetch_with_fallback(provider, descriptor).await;
                    self.lock().insert(
                        descriptor.path.clone(),
                        Slot::Resolved(resolution.clone()),
                    );
                    let _ = sender.send(Some(resolution.clone()));
                    return resolution;
                }
            }
        }
    }

    /// Cached outcome for a path, if it has settled. Never fetches.
    pub fn peek(&self, path: &str) -> Option<Resolution> {
        match self.lock().get(path) {
            Some(Slot::Resolved(resolution)) => Some(resolution.clone()),
            _ => None,
        }
    }

    /// Number of settled entries that loaded successfully.
    pub fn loaded_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Resolved(Resolution::Loaded(_))))
            .count()
    }

    /// Number of settled entries that failed.
    pub fn failed_count(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Resolved(Resolution::Failed(_))))
            .count()
    }
}

/// Walk the retrieval tiers in priority order; first success wins.
async fn fetch_with_fallback(
    provider: &dyn ContentProvider,
    descriptor: &FileDescriptor,
) -> Resolution {
    let mut reasons = Vec::new();

    match provider.fetch_raw(&descriptor.path).await {
        Ok(text) => {
            log::debug!("fetched {} via raw endpoint", descriptor.path);
            return Resolution::Loaded(text);
        }
        Err(err) => reasons.push(format!("raw: {err}")),
    }

    match provider.fetch_blob(&descriptor.sha).await {
        Ok(text) => {
            log::debug!("fetched {} via blob endpoint", descriptor.path);
            return Resolution::Loaded(text);
        }
        Err(err) => reasons.push(format!("blob: {err}")),
    }

    match provider.fetch_contents(&descriptor.path).await {
        Ok(text) => {
            log::debug!("fetched {} via contents endpoint", descriptor.path);
            return Resolution::Loaded(text);
        }
        Err(err) => reasons.push(format!("contents: {err}")),
    }

    let failure = RepoRenderError::all_methods_failed(&descriptor.path, reasons.join("; "));
    log::warn!("{failure}");
    Resolution::Failed(failure.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider with a fixed outcome per tier and per-tier call counters
    #[derive(Default)]
    struct ScriptedProvider {
        raw: Option<String>,
        blob: Option<String>,
        contents: Option<String>,
        raw_calls: AtomicUsize,
        blob_calls: AtomicUsize,
        contents_calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentProvider for ScriptedProvider {
        async fn fetch_raw(&self, _path: &str) -> Result<String> {
            self.raw_calls.fetch_add(1, Ordering::SeqCst);
            // Yield so concurrent callers interleave at the suspension point
            tokio::task::yield_now().await;
            self.raw
                .clone()
                .ok_or_else(|| RepoRenderError::unexpected_status(404))
        }

        async fn fetch_blob(&self, _sha: &str) -> Result<String> {
            self.blob_calls.fetch_add(1, Ordering::SeqCst);
            self.blob
                .clone()
                .ok_or_else(|| RepoRenderError::unexpected_status(404))
        }

        async fn fetch_contents(&self, _path: &str) -> Result<String> {
            self.contents_calls.fetch_add(1, Ordering::SeqCst);
            self.contents
                .clone()
                .ok_or_else(|| RepoRenderError::unexpected_status(404))
        }
    }

    /// Provider whose first raw call succeeds and every later call fails
    #[derive(Default)]
    struct OnceProvider {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ContentProvider for OnceProvider {
        async fn fetch_raw(&self, _path: &str) -> Result<String> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok("first".to_string())
            } else {
                Err(RepoRenderError::unexpected_status(500))
            }
        }

        async fn fetch_blob(&self, _sha: &str) -> Result<String> {
            Err(RepoRenderError::unexpected_status(500))
        }

        async fn fetch_contents(&self, _path: &str) -> Result<String> {
            Err(RepoRenderError::unexpected_status(500))
        }
    }

    fn descriptor(path: &str) -> FileDescriptor {
        FileDescriptor::new(path.to_string(), 10, format!("sha-{path}"))
    }

    #[tokio::test]
    async fn test_first_tier_success_short_circuits() {
        let provider = ScriptedProvider {
            raw: Some("raw content".to_string()),
            ..Default::default()
        };
        let cache = ContentCache::new();

        let resolution = cache.resolve(&provider, &descriptor("a.txt")).await;
        assert_eq!(resolution, Resolution::Loaded("raw content".to_string()));
        assert_eq!(provider.raw_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.blob_calls.load(Ordering::SeqCst), 0);
        assert_eq!(provider.contents_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_to_third_tier() {
        let provider = ScriptedProvider {
            contents: Some("hello".to_string()),
            ..Default::default()
        };
        let cache = ContentCache::new();

        let resolution = cache.resolve(&provider, &descriptor("a.txt")).await;
        assert_eq!(resolution, Resolution::Loaded("hello".to_string()));
        assert_eq!(provider.raw_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.blob_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.contents_calls.load(Ordering::SeqCst), 1);

        // Memoized: no further provider traffic
        let again = cache.resolve(&provider, &descriptor("a.txt")).await;
        assert_eq!(again, Resolution::Loaded("hello".to_string()));
        assert_eq!(provider.contents_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_tiers_fail_yields_failed_value() {
        let provider = ScriptedProvider::default();
        let cache = ContentCache::new();

        let resolution = cache.resolve(&provider, &descriptor("gone.txt")).await;
        match &resolution {
            Resolution::Failed(reason) => {
                assert!(reason.contains("gone.txt"));
                assert!(reason.contains("raw:"));
                assert!(reason.contains("contents:"));
            }
            Resolution::Loaded(_) => panic!("expected a failed resolution"),
        }
    }

    #[tokio::test]
    async fn test_failures_are_memoized_too() {
        let provider = ScriptedProvider::default();
        let cache = ContentCache::new();
        let file = descriptor("gone.txt");

        let first = cache.resolve(&provider, &file).await;
        let second = cache.resolve(&provider, &file).await;
        assert_eq!(first, second);
        // Each tier was consulted exactly once despite two resolve calls
        assert_eq!(provider.raw_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.blob_calls.load(Ordering::SeqCst), 1);
        assert_eq!(provider.contents_calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.failed_count(), 1);
    }

    #[tokio::test]
    async fn test_memoization_survives_provider_regression() {
        let provider = OnceProvider::default();
        let cache = ContentCache::new();
        let file = descriptor("a.txt");

        let first = cache.resolve(&provider, &file).await;
        // The provider now fails on every call, but the cache still answers
        let second = cache.resolve(&provider, &file).await;
        assert_eq!(first, Resolution::Loaded("first".to_string()));
        assert_eq!(first, second);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_resolves_deduplicate() {
        let provider = ScriptedProvider {
            raw: Some("shared".to_string()),
            ..Default::default()
        };
        let cache = ContentCache::new();
        let file = descriptor("a.txt");

        let (first, second) = tokio::join!(
            cache.resolve(&provider, &file),
            cache.resolve(&provider, &file)
        );

        assert_eq!(first, Resolution::Loaded("shared".to_string()));
        assert_eq!(first, second);
        assert_eq!(provider.raw_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_distinct_paths_fetch_independently() {
        let provider = ScriptedProvider {
            raw: Some("x".to_string()),
            ..Default::default()
        };
        let cache = ContentCache::new();

        cache.resolve(&provider, &descriptor("a.txt")).await;
        cache.resolve(&provider, &descriptor("b.txt")).await;
        assert_eq!(provider.raw_calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.loaded_count(), 2);
    }

    #[tokio::test]
    async fn test_peek_never_fetches() {
        let provider = ScriptedProvider {
            raw: Some("x".to_string()),
            ..Default::default()
        };
        let cache = ContentCache::new();

        assert_eq!(cache.peek("a.txt"), None);
        cache.resolve(&provider, &descriptor("a.txt")).await;
        assert_eq!(cache.peek("a.txt"), Some(Resolution::Loaded("x".to_string())));
        assert_eq!(provider.raw_calls.load(Ordering::SeqCst), 1);
    }
}
