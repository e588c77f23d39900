//! Per-invocation session context.
//!
//! All command state lives in an explicit [`Session`] rather than ambient
//! globals: the API client, the parsed repository locator, and the loaded
//! user settings. Loading a snapshot produces a [`LoadedSnapshot`] bundle
//! with its own fresh content cache, so a branch switch can never observe
//! stale resolutions from a previous reference.

use crate::core::cache::ContentCache;
use crate::core::error::Result;
use crate::core::github::{GithubClient, RepoContentSource, RepoLocator};
use crate::core::settings::Settings;
use crate::core::snapshot::{build_snapshot, RepositorySnapshot};
use std::sync::Arc;

/// One repository snapshot plus the collaborators needed to resolve content
pub struct LoadedSnapshot {
    pub snapshot: RepositorySnapshot,
    pub cache: ContentCache,
    pub source: RepoContentSource,
}

/// Explicit context for one command invocation
pub struct Session {
    client: Arc<GithubClient>,
    locator: RepoLocator,
    pub settings: Settings,
}

impl Session {
    /// Parse the repository argument and set up the client. The token falls
    /// back to the `GITHUB_TOKEN` environment variable.
    pub fn open(repo: &str, token: Option<String>) -> Result<Self> {
        let locator = RepoLocator::parse(repo)?;
        let token = token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| std::env::var("GITHUB_TOKEN").ok());
        Ok(Self {
            client: Arc::new(GithubClient::new(token)),
            locator,
            settings: Settings::load_or_default(),
        })
    }

    pub fn client(&self) -> &Arc<GithubClient> {
        &self.client
    }

    pub fn locator(&self) -> &RepoLocator {
        &self.locator
    }

    /// Fetch the listing and build a fresh snapshot at the given reference,
    /// defaulting to the repository's default branch.
    pub async fn load(&self, reference: Option<&str>, limit: usize) -> Result<LoadedSnapshot> {
        let repo = self.client.repository(&self.locator).await?;
        let reference = reference
            .map(str::to_string)
            .unwrap_or_else(|| repo.default_branch.clone());

        let entries = self.client.tree(&self.locator, &reference).await?;
        log::debug!(
            "listed {} entries for {} at {reference}",
            entries.len(),
            repo.full_name
        );

        let snapshot = build_snapshot(repo, reference.clone(), entries, limit);
        log::debug!(
            "snapshot at {reference}: {} accepted, {} skipped, fetched {}",
            snapshot.accepted.len(),
            snapshot.skipped_count(),
            snapshot.fetched_at
        );
        let source =
            RepoContentSource::new(Arc::clone(&self.client), self.locator.clone(), reference);

        Ok(LoadedSnapshot {
            snapshot,
            cache: ContentCache::new(),
            source,
        })
    }

    /// Persist settings, logging rather than failing: preferences are
    /// best-effort by contract.
    pub fn save_settings(&self) {
        if let Err(err) = self.settings.save() {
            log::warn!("Could not persist settings: {err}");
        }
    }
}
