//! GitLab REST API (v4) client.
//!
//! Tree listings come from
//! `GET /api/v4/projects/{encoded path}/repository/tree?recursive=true&per_page=100`.
//! File content comes from the files endpoint, trying a fixed list of
//! candidate branches until one returns content. Project and file paths
//! are percent-encoded into a single path segment, as the API requires.

use crate::error::{Result, TfViewError};
use crate::provider::{decode_base64_content, map_error_response, ApiClient, RepoProvider};
use crate::types::{EntryKind, RepoReference, TreeEntry};
use async_trait::async_trait;
use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;

/// Branches tried for file content, in priority order.
///
/// The order is a contract: when several of these branches exist, the
/// first one that returns content wins.
pub const GITLAB_BRANCH_CANDIDATES: [&str; 4] = ["main", "master", "develop", "development"];

/// GitLab API client, bound to one host (gitlab.com or a private instance).
pub struct GitLabApi {
    client: ApiClient,
    base_url: String,
}

impl GitLabApi {
    /// Create a client for the given GitLab host.
    #[must_use]
    pub fn new(client: ApiClient, host: &str) -> Self {
        Self {
            client,
            base_url: format!("https://{host}"),
        }
    }

    /// Replace the base URL entirely (mock servers in tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn get(&self, url: &str, token: Option<&str>) -> reqwest::RequestBuilder {
        let mut request = self.client.inner().get(url);
        if let Some(t) = token {
            request = request.header("PRIVATE-TOKEN", t);
        }
        request
    }
}

/// Encode a project or file path into a single URL path segment
/// (`team/sub/project` → `team%2Fsub%2Fproject`).
fn encode_path(path: &str) -> String {
    percent_encode(path.as_bytes(), NON_ALPHANUMERIC).to_string()
}

#[async_trait]
impl RepoProvider for GitLabApi {
    fn name(&self) -> &'static str {
        "GitLab"
    }

    async fn fetch_tree(
        &self,
        repo: &RepoReference,
        token: Option<&str>,
    ) -> Result<Vec<TreeEntry>> {
        let url = format!(
            "{}/api/v4/projects/{}/repository/tree?recursive=true&per_page=100",
            self.base_url,
            encode_path(&repo.project_path)
        );
        tracing::debug!(url = %url, "Fetching GitLab tree");

        let response = self.get(&url, token).send().await?;
        if !response.status().is_success() {
            return Err(map_error_response(self.name(), repo, response).await);
        }

        let entries: Vec<GitLabTreeEntry> =
            response.json().await.map_err(|e| TfViewError::Provider {
                provider: self.name(),
                status: None,
                message: format!("Failed to parse tree response: {e}"),
            })?;

        tracing::debug!(entries = entries.len(), "GitLab tree fetched");

        Ok(entries
            .into_iter()
            .map(|e| TreeEntry {
                path: e.path,
                kind: if e.kind == "blob" {
                    EntryKind::Blob
                } else {
                    EntryKind::Tree
                },
                blob_url: None,
            })
            .collect())
    }

    async fn fetch_file_content(
        &self,
        repo: &RepoReference,
        entry: &TreeEntry,
        token: Option<&str>,
    ) -> Result<(String, u64)> {
        let project = encode_path(&repo.project_path);
        let file = encode_path(&entry.path);

        for branch in GITLAB_BRANCH_CANDIDATES {
            let url = format!(
                "{}/api/v4/projects/{}/repository/files/{}?ref={}",
                self.base_url, project, file, branch
            );
            tracing::debug!(path = %entry.path, branch = %branch, "Fetching GitLab file");

            let response = self.get(&url, token).send().await?;
            if !response.status().is_success() {
                tracing::debug!(
                    path = %entry.path,
                    branch = %branch,
                    status = %response.status(),
                    "Branch attempt failed, trying next"
                );
                continue;
            }

            let blob: GitLabFile = response.json().await.map_err(|e| TfViewError::Provider {
                provider: self.name(),
                status: None,
                message: format!("Failed to parse file response: {e}"),
            })?;

            let content = decode_base64_content(self.name(), &blob.content)?;
            return Ok((content, blob.size));
        }

        Err(TfViewError::BranchesExhausted {
            path: entry.path.clone(),
        })
    }
}

/// GitLab tree entry response shape.
#[derive(Debug, Deserialize)]
struct GitLabTreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// GitLab file response shape. Content is base64 without embedded newlines.
#[derive(Debug, Deserialize)]
struct GitLabFile {
    content: String,
    #[serde(default)]
    size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_project_path_is_a_single_segment() {
        assert_eq!(encode_path("team/sub/project"), "team%2Fsub%2Fproject");
    }

    #[test]
    fn file_path_dots_are_encoded() {
        assert_eq!(encode_path("env/prod.tfvars"), "env%2Fprod%2Etfvars");
    }

    #[test]
    fn branch_priority_order_is_fixed() {
        assert_eq!(
            GITLAB_BRANCH_CANDIDATES,
            ["main", "master", "develop", "development"]
        );
    }
}
