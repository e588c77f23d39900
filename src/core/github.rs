//! GitHub REST API client: repository listing, branch/tag enumeration, and
//! the three content retrieval tiers.
//!
//! # Public API
//! - [`RepoLocator`]: Parsed owner/name pair, from a URL or shorthand
//! - [`GithubClient`]: Thin wrapper over `reqwest` with auth headers
//! - [`RepoContentSource`]: Binds a client to one repository and reference,
//!   implementing [`ContentProvider`](crate::core::cache::ContentProvider)
//! - [`ReferenceEntry`]: One branch or tag with its commit SHA
//!
//! Error mapping is uniform across endpoints: 404 becomes `NotFound`, 403
//! becomes `RateLimited` (carrying the reset header when present), 401
//! becomes `Unauthorized`, and any other non-success status becomes
//! `UnexpectedStatus`. Blob and contents payloads arrive base64-encoded and
//! are decoded to text before being returned; the raw endpoint passes
//! through unchanged.

use crate::core::cache::ContentProvider;
use crate::core::error::{RepoRenderError, Result};
use crate::core::snapshot::{FileDescriptor, RepoMetadata};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;

const API_BASE: &str = "https://api.github.com";
const RAW_BASE: &str = "https://raw.githubusercontent.com";
const USER_AGENT: &str = concat!("repo-render/", env!("CARGO_PKG_VERSION"));

/// Only the 20 most recent tags are listed, matching typical selector depth.
const MAX_LISTED_TAGS: usize = 20;

/// Owner and repository name identifying one GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocator {
    pub owner: String,
    pub name: String,
}

impl RepoLocator {
    /// Parse a repository from a full GitHub URL or `owner/name` shorthand.
    /// A trailing `.git` suffix is stripped.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        let remainder = match trimmed.find("github.com/") {
            Some(pos) => &trimmed[pos + "github.com/".len()..],
            None => trimmed,
        };

        let mut segments = remainder.split('/').filter(|s| !s.is_empty());
        let owner = segments.next().unwrap_or_default();
        let name_raw = segments.next().unwrap_or_default();
        // Anything past owner/name (tree/…, blob/…) is not part of the locator
        let name_clean = name_raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches(".git");

        let valid_segment = |s: &str| {
            !s.is_empty()
                && s.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        };

        if !valid_segment(owner) || !valid_segment(name_clean) {
            return Err(RepoRenderError::invalid_repo_url(input));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name_clean.to_string(),
        })
    }
}

/// One branch or tag available for snapshot selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub name: String,
    pub sha: String,
    pub is_tag: bool,
    pub protected: bool,
}

#[derive(Deserialize)]
struct RepoInfoResponse {
    full_name: String,
    description: Option<String>,
    language: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    default_branch: String,
    html_url: String,
}

#[derive(Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    entry_type: String,
    #[serde(default)]
    size: u64,
    sha: String,
}

#[derive(Deserialize)]
struct EncodedContentResponse {
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Deserialize)]
struct BranchResponse {
    name: String,
    commit: CommitRef,
    #[serde(default)]
    protected: bool,
}

#[derive(Deserialize)]
struct TagResponse {
    name: String,
    commit: CommitRef,
}

#[derive(Deserialize)]
struct RateLimitResponse {
    rate: RateLimitCore,
}

#[derive(Deserialize)]
struct RateLimitCore {
    remaining: u64,
    reset: i64,
}

/// Thin GitHub API client holding the HTTP client and optional token
pub struct GithubClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        if let Some(t) = &token {
            if t.len() < 20 {
                log::warn!("GitHub token seems too short, please verify it's correct");
            }
        }
        Self {
            http: reqwest::Client::new(),
            token,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn api_request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http
            .get(url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }
        request
    }

    /// Map a non-success response to the listing error taxonomy.
    fn status_error(response: &reqwest::Response) -> RepoRenderError {
        match response.status().as_u16() {
            404 => RepoRenderError::NotFound,
            403 => {
                let reset = response
                    .headers()
                    .get("X-RateLimit-Reset")
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.parse::<i64>().ok())
                    .and_then(|epoch| DateTime::<Utc>::from_timestamp(epoch, 0))
                    .map(|time| time.format("%H:%M:%S UTC").to_string());
                RepoRenderError::rate_limited(reset)
            }
            401 => RepoRenderError::Unauthorized,
            status => RepoRenderError::unexpected_status(status),
        }
    }

    async fn get_api(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.api_request(url).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(&response));
        }
        Ok(response)
    }

    /// Fetch repository-level metadata.
    pub async fn repository(&self, locator: &RepoLocator) -> Result<RepoMetadata> {
        let url = format!("{API_BASE}/repos/{}/{}", locator.owner, locator.name);
        let info: RepoInfoResponse = self.get_api(&url).await?.json().await?;
        Ok(RepoMetadata {
            full_name: info.full_name,
            description: info.description,
            language: info.language,
            stars: info.stargazers_count,
            forks: info.forks_count,
            default_branch: info.default_branch,
            html_url: info.html_url,
        })
    }

    /// Fetch the flat file listing for one reference. Only blob entries
    /// become descriptors; trees and submodule links are skipped.
    pub async fn tree(&self, locator: &RepoLocator, reference: &str) -> Result<Vec<FileDescriptor>> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/git/trees/{reference}?recursive=1",
            locator.owner, locator.name
        );
        let listing: TreeResponse = self.get_api(&url).await?.json().await?;
        if listing.truncated {
            log::warn!(
                "GitHub truncated the tree listing for {}/{}; the snapshot may be incomplete",
                locator.owner,
                locator.name
            );
        }
        Ok(listing
            .tree
            .into_iter()
            .filter(|entry| entry.entry_type == "blob")
            .map(|entry| FileDescriptor::new(entry.path, entry.size, entry.sha))
            .collect())
    }

    /// List branches plus the most recent tags for reference selection.
    pub async fn references(&self, locator: &RepoLocator) -> Result<Vec<ReferenceEntry>> {
        let branches_url = format!(
            "{API_BASE}/repos/{}/{}/branches",
            locator.owner, locator.name
        );
        let branches: Vec<BranchResponse> = self.get_api(&branches_url).await?.json().await?;

        let tags_url = format!("{API_BASE}/repos/{}/{}/tags", locator.owner, locator.name);
        let tags: Vec<TagResponse> = self.get_api(&tags_url).await?.json().await?;

        let mut references: Vec<ReferenceEntry> = branches
            .into_iter()
            .map(|branch| ReferenceEntry {
                name: branch.name,
                sha: branch.commit.sha,
                is_tag: false,
                protected: branch.protected,
            })
            .collect();
        references.extend(tags.into_iter().take(MAX_LISTED_TAGS).map(|tag| {
            ReferenceEntry {
                name: tag.name,
                sha: tag.commit.sha,
                is_tag: true,
                protected: false,
            }
        }));
        Ok(references)
    }

    /// Query the remaining request budget and log a warning when it is low.
    /// Failures here are advisory only and never abort anything.
    pub async fn check_rate_limit(&self) {
        let url = format!("{API_BASE}/rate_limit");
        let result: Result<RateLimitResponse> = async {
            Ok(self.get_api(&url).await?.json().await?)
        }
        .await;

        match result {
            Ok(limits) => {
                let reset = DateTime::<Utc>::from_timestamp(limits.rate.reset, 0)
                    .map(|time| time.format("%H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                log::info!(
                    "GitHub API: {} requests remaining, resets at {reset}",
                    limits.rate.remaining
                );
                if limits.rate.remaining < 10 && !self.has_token() {
                    log::warn!(
                        "Only {} API requests remaining. Consider adding a GitHub token to avoid rate limits.",
                        limits.rate.remaining
                    );
                }
            }
            Err(err) => log::warn!("Could not check rate limit: {err}"),
        }
    }

    async fn raw_content(
        &self,
        locator: &RepoLocator,
        reference: &str,
        path: &str,
    ) -> Result<String> {
        let url = format!(
            "{RAW_BASE}/{}/{}/{reference}/{path}",
            locator.owner, locator.name
        );
        // The raw host needs no API headers and does not count against the
        // API request budget for public repositories
        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::status_error(&response));
        }
        Ok(response.text().await?)
    }

    async fn blob_content(&self, locator: &RepoLocator, sha: &str) -> Result<String> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/git/blobs/{sha}",
            locator.owner, locator.name
        );
        let payload: EncodedContentResponse = self.get_api(&url).await?.json().await?;
        decode_payload(sha, &payload)
    }

    async fn contents_content(
        &self,
        locator: &RepoLocator,
        reference: &str,
        path: &str,
    ) -> Result<String> {
        let url = format!(
            "{API_BASE}/repos/{}/{}/contents/{path}?ref={reference}",
            locator.owner, locator.name
        );
        let payload: EncodedContentResponse = self.get_api(&url).await?.json().await?;
        decode_payload(path, &payload)
    }
}

/// Decode an API content payload: base64 with embedded newlines, or plain
/// text passed through unchanged.
fn decode_payload(key: &str, payload: &EncodedContentResponse) -> Result<String> {
    if payload.encoding == "base64" || payload.encoding.is_empty() {
        let compact: String = payload
            .content
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        let bytes = BASE64
            .decode(compact.as_bytes())
            .map_err(|err| RepoRenderError::content_decode(key, err.to_string()))?;
        String::from_utf8(bytes)
            .map_err(|err| RepoRenderError::content_decode(key, err.to_string()))
    } else {
        Ok(payload.content.clone())
    }
}

/// A GitHub client bound to one repository and reference, usable as the
/// single-file content provider for the fetch strategy
pub struct RepoContentSource {
    client: Arc<GithubClient>,
    locator: RepoLocator,
    reference: String,
}

impl RepoContentSource {
    pub fn new(client: Arc<GithubClient>, locator: RepoLocator, reference: String) -> Self {
        Self {
            client,
            locator,
            reference,
        }
    }
}

#[async_trait]
impl ContentProvider for RepoContentSource {
    async fn fetch_raw(&self, path: &str) -> Result<String> {
        self.client
            .raw_content(&self.locator, &self.reference, path)
            .await
    }

    async fn fetch_blob(&self, sha: &str) -> Result<String> {
        self.client.blob_content(&self.locator, sha).await
    }

    async fn fetch_contents(&self, path: &str) -> Result<String> {
        self.client
            .contents_content(&self.locator, &self.reference, path)
            .await
    }
}
