//! # tfview
//!
//! Fetch and view Terraform files from GitHub and GitLab repositories via
//! their REST APIs.
//!
//! tfview takes a repository URL, lists the repository tree through the
//! hosting provider's API, keeps the `.tf`/`.tfvars` blobs, fetches their
//! content concurrently, and returns a uniform, ordered list of files.
//!
//! ## Features
//!
//! - **GitHub and GitLab support**: public hosts, subdomains, and configured
//!   private GitLab instances (nested subgroups included)
//! - **Branch fallback**: GitHub trees fall back `main` → `master`; GitLab
//!   file content tries `main`, `master`, `develop`, `development` in order
//! - **Fault isolation**: one file failing to download never fails the batch;
//!   the record carries a placeholder message instead
//! - **Multiple output formats**: plain text and JSON reports
//!
//! ## Example
//!
//! ```rust,no_run
//! use tfview::{Config, RepoFetcher};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let fetcher = RepoFetcher::new(Config::default());
//!
//!     let result = fetcher
//!         .fetch("https://github.com/acme/infra", None)
//!         .await?;
//!
//!     for file in &result.files {
//!         println!("{} ({} bytes)", file.path, file.size);
//!     }
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod provider;
pub mod reporter;
pub mod types;

// Re-export commonly used types at crate root
pub use config::Config;
pub use error::{Result, TfViewError};
pub use types::{
    FetchResult, FetchedFile, Provider, RepoReference, ReportFormat, TreeEntry,
};

use provider::{ApiClient, GitHubApi, GitLabApi, RepoProvider};

/// Main orchestrator: classify, list the tree, filter, fetch content.
///
/// `RepoFetcher` is the primary entry point for using tfview as a library.
/// Each call to [`fetch`](Self::fetch) is one self-contained operation; no
/// state is shared between calls beyond the HTTP connection pool.
pub struct RepoFetcher {
    config: Config,
    client: ApiClient,
    github_api_base_url: Option<String>,
    gitlab_base_url: Option<String>,
}

impl RepoFetcher {
    /// Create a new fetcher with the given configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: ApiClient::new(),
            github_api_base_url: None,
            gitlab_base_url: None,
        }
    }

    /// Override the GitHub API base URL (mock servers in tests).
    #[must_use]
    pub fn with_github_api_base_url(mut self, url: &str) -> Self {
        self.github_api_base_url = Some(url.to_string());
        self
    }

    /// Override the GitLab base URL (mock servers in tests).
    #[must_use]
    pub fn with_gitlab_base_url(mut self, url: &str) -> Self {
        self.gitlab_base_url = Some(url.to_string());
        self
    }

    /// Fetch every Terraform file in the repository at `url`.
    ///
    /// Files come back in tree-listing order. Per-file retrieval failures
    /// are recorded inline on the corresponding [`FetchedFile`]; only
    /// classification, authentication, tree-listing, and the empty-filter
    /// condition fail the operation as a whole.
    ///
    /// # Errors
    ///
    /// See [`TfViewError`] for the taxonomy. Nothing partial is returned
    /// on error.
    pub async fn fetch(&self, url: &str, token: Option<&str>) -> Result<FetchResult> {
        let repo = classify::classify(url, &self.config.gitlab.hosts)?;
        let token = self.resolve_token(&repo, token)?;
        let provider = self.provider_for(&repo);

        tracing::info!(repo = %repo, "Fetching repository");
        let entries = filtered_tree(provider.as_ref(), &repo, token.as_deref()).await?;
        tracing::info!(repo = %repo, files = entries.len(), "Fetching file contents");

        let fetches = entries.iter().map(|entry| {
            let provider = provider.as_ref();
            let repo = &repo;
            let token = token.as_deref();
            async move {
                match provider.fetch_file_content(repo, entry, token).await {
                    Ok((content, size)) => FetchedFile {
                        path: entry.path.clone(),
                        content,
                        size,
                        error: false,
                    },
                    Err(e) => {
                        tracing::warn!(path = %entry.path, error = %e, "Failed to fetch file");
                        FetchedFile::from_failure(entry.path.clone(), &e)
                    }
                }
            }
        });

        // join_all preserves input order, so the batch stays in
        // tree-listing order regardless of completion order.
        let files = futures::future::join_all(fetches).await;

        let errors = files.iter().filter(|f| f.error).count();
        tracing::info!(repo = %repo, files = files.len(), errors, "Fetch complete");

        Ok(FetchResult { repo, files })
    }

    /// List the Terraform file paths in the repository without fetching
    /// content. Same error taxonomy as [`fetch`](Self::fetch).
    ///
    /// # Errors
    ///
    /// Fails like the classification and tree stages of `fetch`, including
    /// `NoMatchingFiles` when the tree holds no Terraform blobs.
    pub async fn list(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<(RepoReference, Vec<TreeEntry>)> {
        let repo = classify::classify(url, &self.config.gitlab.hosts)?;
        let token = self.resolve_token(&repo, token)?;
        let provider = self.provider_for(&repo);

        let entries = filtered_tree(provider.as_ref(), &repo, token.as_deref()).await?;
        Ok((repo, entries))
    }

    /// Pick the explicit token, then the configured one. A configured
    /// private GitLab host with no token at all is rejected up front.
    fn resolve_token(
        &self,
        repo: &RepoReference,
        explicit: Option<&str>,
    ) -> Result<Option<String>> {
        let token = explicit
            .map(str::to_string)
            .or_else(|| self.config.auth.token_for(repo.provider).map(str::to_string));

        if token.is_none() && classify::is_private_host(&repo.host, &self.config.gitlab.hosts) {
            return Err(TfViewError::AuthenticationRequired {
                host: repo.host.clone(),
                message: "this host is configured as private and requires an access token"
                    .to_string(),
            });
        }

        Ok(token)
    }

    fn provider_for(&self, repo: &RepoReference) -> Box<dyn RepoProvider> {
        match repo.provider {
            Provider::GitHub => {
                let mut api = GitHubApi::new(self.client.clone());
                if let Some(url) = &self.github_api_base_url {
                    api = api.with_api_base_url(url);
                }
                Box::new(api)
            }
            Provider::GitLab => {
                let mut api = GitLabApi::new(self.client.clone(), &repo.host);
                if let Some(url) = &self.gitlab_base_url {
                    api = api.with_base_url(url);
                }
                Box::new(api)
            }
        }
    }
}

/// Shared tree-then-filter stage for `fetch` and `list`.
async fn filtered_tree(
    provider: &dyn RepoProvider,
    repo: &RepoReference,
    token: Option<&str>,
) -> Result<Vec<TreeEntry>> {
    let tree = provider.fetch_tree(repo, token).await?;
    let entries: Vec<TreeEntry> = tree
        .into_iter()
        .filter(TreeEntry::is_terraform_file)
        .collect();

    if entries.is_empty() {
        return Err(TfViewError::NoMatchingFiles {
            repo: repo.project_path.clone(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private_host_config() -> Config {
        let mut config = Config::default();
        config
            .gitlab
            .hosts
            .push("gitlab.internal.example.com".to_string());
        config
    }

    #[test]
    fn private_host_without_token_is_rejected() {
        let fetcher = RepoFetcher::new(private_host_config());
        let repo =
            classify::classify("https://gitlab.internal.example.com/ops/tf", &fetcher.config.gitlab.hosts)
                .unwrap();

        let err = fetcher.resolve_token(&repo, None).unwrap_err();
        assert!(matches!(err, TfViewError::AuthenticationRequired { .. }));
    }

    #[test]
    fn explicit_token_wins_over_config() {
        let mut config = Config::default();
        config.auth.github_token = Some("from-config".to_string());
        let fetcher = RepoFetcher::new(config);
        let repo = classify::classify("https://github.com/acme/infra", &[]).unwrap();

        let token = fetcher.resolve_token(&repo, Some("explicit")).unwrap();
        assert_eq!(token.as_deref(), Some("explicit"));
    }

    #[test]
    fn config_token_is_used_when_no_explicit_token() {
        let mut config = Config::default();
        config.auth.gitlab_token = Some("from-config".to_string());
        let fetcher = RepoFetcher::new(config);
        let repo = classify::classify("https://gitlab.com/team/project", &[]).unwrap();

        let token = fetcher.resolve_token(&repo, None).unwrap();
        assert_eq!(token.as_deref(), Some("from-config"));
    }
}
