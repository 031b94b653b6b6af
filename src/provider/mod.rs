//! Git provider API implementations.
//!
//! Each provider implements [`RepoProvider`] to handle its own request
//! shapes for the two capabilities the fetch pipeline needs: listing a
//! repository tree and retrieving one file's raw content. Selection is a
//! tagged-variant dispatch on [`Provider`], not inheritance.

mod github;
mod gitlab;

pub use github::GitHubApi;
pub use gitlab::{GitLabApi, GITLAB_BRANCH_CANDIDATES};

use crate::error::{Result, TfViewError};
use crate::types::{RepoReference, TreeEntry};
use async_trait::async_trait;
use base64::engine::{general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

/// Shared HTTP client for provider APIs.
///
/// Timeouts are left to reqwest's defaults; there is no retry policy
/// beyond the GitLab branch fallback documented on
/// [`GITLAB_BRANCH_CANDIDATES`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    /// Create the client. GitHub rejects requests without a User-Agent.
    ///
    /// # Panics
    ///
    /// Panics if the underlying TLS backend cannot be initialized.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tfview/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }

    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for provider API implementations.
#[async_trait]
pub trait RepoProvider: Send + Sync {
    /// Provider name for error messages and logs.
    fn name(&self) -> &'static str;

    /// List every entry in the repository tree, recursively, in the
    /// provider's listing order.
    async fn fetch_tree(
        &self,
        repo: &RepoReference,
        token: Option<&str>,
    ) -> Result<Vec<TreeEntry>>;

    /// Fetch one file's decoded content and reported size.
    async fn fetch_file_content(
        &self,
        repo: &RepoReference,
        entry: &TreeEntry,
        token: Option<&str>,
    ) -> Result<(String, u64)>;
}

/// Error message body shape shared by the GitHub and GitLab APIs.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Map a non-success provider response onto the error taxonomy.
///
/// Consumes the response to read the provider's message body.
pub(crate) async fn map_error_response(
    provider: &'static str,
    repo: &RepoReference,
    response: reqwest::Response,
) -> TfViewError {
    let status = response.status();
    let provider_message = response
        .json::<ApiErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    match status.as_u16() {
        404 => TfViewError::RepositoryNotFound {
            repo: repo.project_path.clone(),
        },
        401 | 403 => TfViewError::AuthenticationRequired {
            host: repo.host.clone(),
            message: provider_message,
        },
        code => TfViewError::Provider {
            provider,
            status: Some(code),
            message: provider_message,
        },
    }
}

/// Decode base64 blob content to UTF-8 text.
///
/// GitHub embeds newlines in its base64 payloads, GitLab does not; all
/// whitespace is stripped before decoding either way. Decoded bytes are
/// read strictly as UTF-8.
pub(crate) fn decode_base64_content(provider: &'static str, raw: &str) -> Result<String> {
    let compact: String = raw.split_whitespace().collect();
    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| TfViewError::Provider {
            provider,
            status: None,
            message: format!("Invalid base64 content: {e}"),
        })?;
    String::from_utf8(bytes).map_err(|e| TfViewError::Provider {
        provider,
        status: None,
        message: format!("File content is not valid UTF-8: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_round_trip() {
        let decoded = decode_base64_content("GitHub", "cmVzb3VyY2UgImF3c19zMyI=").unwrap();
        assert_eq!(decoded, "resource \"aws_s3\"");
    }

    #[test]
    fn base64_with_embedded_newlines() {
        // GitHub wraps blob content at 60 characters
        let decoded =
            decode_base64_content("GitHub", "cmVzb3Vy\nY2UgImF3c19zMyI=\n").unwrap();
        assert_eq!(decoded, "resource \"aws_s3\"");
    }

    #[test]
    fn base64_preserves_trailing_newline_of_source() {
        // "a\n" encodes to "YQo="; decoding must not add or drop anything
        assert_eq!(decode_base64_content("GitLab", "YQo=").unwrap(), "a\n");
        assert_eq!(decode_base64_content("GitLab", "YQ==").unwrap(), "a");
    }

    #[test]
    fn garbage_base64_is_a_provider_error() {
        let err = decode_base64_content("GitLab", "!!!not base64!!!").unwrap_err();
        assert!(matches!(err, TfViewError::Provider { .. }));
    }

    #[test]
    fn non_utf8_bytes_are_rejected() {
        // 0xFF 0xFE is not valid UTF-8; "//4=" is its base64 encoding
        let err = decode_base64_content("GitHub", "//4=").unwrap_err();
        assert!(matches!(err, TfViewError::Provider { .. }));
    }
}
