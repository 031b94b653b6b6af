//! GitHub REST API client.
//!
//! Tree listings come from `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`
//! against branch `main`, retried once against `master`. File content comes
//! from the blob URL each tree entry carries, base64-encoded with embedded
//! newlines.

use crate::error::{Result, TfViewError};
use crate::provider::{decode_base64_content, map_error_response, ApiClient, RepoProvider};
use crate::types::{EntryKind, RepoReference, TreeEntry};
use async_trait::async_trait;
use serde::Deserialize;

/// Branches tried for the tree listing, in order.
const TREE_BRANCH_CANDIDATES: [&str; 2] = ["main", "master"];

/// GitHub API client.
pub struct GitHubApi {
    client: ApiClient,
    api_base_url: String,
}

impl GitHubApi {
    /// Create a client against the public GitHub API.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            api_base_url: "https://api.github.com".to_string(),
        }
    }

    /// Point the client at a different API base URL (mock servers in tests).
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: &str) -> Self {
        self.api_base_url = api_base_url.trim_end_matches('/').to_string();
        self
    }

    fn get(&self, url: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut request = self.client.inner().get(url);
        if let Some(t) = token {
            request = request.header("Authorization", format!("Bearer {t}"));
        }
        request
    }
}

#[async_trait]
impl RepoProvider for GitHubApi {
    fn name(&self) -> &'static str {
        "GitHub"
    }

    async fn fetch_tree(
        &self,
        repo: &RepoReference,
        token: Option<&str>,
    ) -> Result<Vec<TreeEntry>> {
        let mut last_error = None;

        for branch in TREE_BRANCH_CANDIDATES {
            let url = format!(
                "{}/repos/{}/{}/git/trees/{}?recursive=1",
                self.api_base_url, repo.owner, repo.repo, branch
            );
            tracing::debug!(url = %url, branch = %branch, "Fetching GitHub tree");

            let response = self.get(&url, token).send().await?;
            if !response.status().is_success() {
                last_error = Some(map_error_response(self.name(), repo, response).await);
                continue;
            }

            let tree: GitHubTree = response.json().await.map_err(|e| TfViewError::Provider {
                provider: self.name(),
                status: None,
                message: format!("Failed to parse tree response: {e}"),
            })?;

            tracing::debug!(
                branch = %branch,
                entries = tree.tree.len(),
                truncated = tree.truncated,
                "GitHub tree fetched"
            );

            return Ok(tree
                .tree
                .into_iter()
                .map(|e| TreeEntry {
                    path: e.path,
                    // Submodule ("commit") entries fold into Tree; only
                    // blobs survive filtering anyway.
                    kind: if e.kind == "blob" {
                        EntryKind::Blob
                    } else {
                        EntryKind::Tree
                    },
                    blob_url: e.url,
                })
                .collect());
        }

        Err(last_error.unwrap_or_else(|| TfViewError::Provider {
            provider: self.name(),
            status: None,
            message: "No branch candidates to try".to_string(),
        }))
    }

    async fn fetch_file_content(
        &self,
        repo: &RepoReference,
        entry: &TreeEntry,
        token: Option<&str>,
    ) -> Result<(String, u64)> {
        let blob_url = entry.blob_url.as_deref().ok_or_else(|| TfViewError::Provider {
            provider: self.name(),
            status: None,
            message: format!("Tree entry '{}' has no blob URL", entry.path),
        })?;

        tracing::debug!(path = %entry.path, "Fetching GitHub blob");
        let response = self.get(blob_url, token).send().await?;
        if !response.status().is_success() {
            return Err(map_error_response(self.name(), repo, response).await);
        }

        let blob: GitHubBlob = response.json().await.map_err(|e| TfViewError::Provider {
            provider: self.name(),
            status: None,
            message: format!("Failed to parse blob response: {e}"),
        })?;

        let content = decode_base64_content(self.name(), &blob.content)?;
        Ok((content, blob.size))
    }
}

/// GitHub tree listing response.
#[derive(Debug, Deserialize)]
struct GitHubTree {
    tree: Vec<GitHubTreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct GitHubTreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
    url: Option<String>,
}

/// GitHub blob response.
#[derive(Debug, Deserialize)]
struct GitHubBlob {
    content: String,
    #[serde(default)]
    size: u64,
}
