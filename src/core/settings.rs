//! Persistent user preferences.
//!
//! A small JSON file under the platform config directory holding the two
//! scalar settings that survive across sessions: the page-size preference
//! and the file-count-limit override. Loading is strictly best-effort:
//! an absent, unreadable, or corrupted file silently falls back to defaults.

use crate::core::budget::MAX_FILE_LIMIT;
use crate::core::dirs::get_config_directory;
use crate::core::error::{RepoRenderError, Result};
use crate::core::pagination::PageSize;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Stored as its display form: a number or "all"
    pub page_size: Option<String>,
    pub file_limit: Option<usize>,
    pub last_updated: DateTime<Utc>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_size: None,
            file_limit: None,
            last_updated: Utc::now(),
        }
    }
}

impl Settings {
    /// Load settings from the config directory, falling back to defaults on
    /// any failure. Never errors.
    pub fn load_or_default() -> Self {
        let path = match settings_path() {
            Ok(path) => path,
            Err(_) => return Self::default(),
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                log::warn!("Ignoring corrupt settings file '{}': {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = settings_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .map_err(|source| RepoRenderError::settings_write_failed(&path, source))
    }

    /// The persisted page size, if present and still parseable.
    pub fn page_size(&self) -> Option<PageSize> {
        self.page_size.as_deref().and_then(|s| s.parse().ok())
    }

    /// The persisted file limit, if present and within bounds.
    pub fn file_limit(&self) -> Option<usize> {
        self.file_limit.filter(|&limit| limit >= 1 && limit <= MAX_FILE_LIMIT)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = Some(page_size.to_string());
        self.last_updated = Utc::now();
    }

    pub fn set_file_limit(&mut self, limit: usize) {
        self.file_limit = Some(limit.clamp(1, MAX_FILE_LIMIT));
        self.last_updated = Utc::now();
    }
}

fn settings_path() -> Result<PathBuf> {
    Ok(get_config_directory()?.join(SETTINGS_FILE))
}
