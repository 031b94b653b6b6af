//! Error types for tfview.
//!
//! This module defines the error hierarchy using `thiserror`. Every failure
//! surfaced to the caller carries enough context to produce a single
//! human-readable message.
//!
//! # Error Categories
//!
//! - **Classification errors**: unparseable URLs, unknown hosts, short paths
//! - **Provider errors**: non-success HTTP statuses mapped by meaning
//!   (404 → not found, 401/403 → authentication, the rest → provider error)
//! - **Ambient errors**: transport failures, IO, configuration, reporting
//!
//! Classification and tree-listing failures abort a fetch operation.
//! Per-file content failures never reach the caller as errors; the
//! orchestrator folds them into the corresponding [`crate::types::FetchedFile`].

use thiserror::Error;

/// A specialized Result type for tfview operations.
pub type Result<T> = std::result::Result<T, TfViewError>;

/// The main error type for tfview.
#[derive(Error, Debug)]
pub enum TfViewError {
    // =========================================================================
    // URL Classification Errors
    // =========================================================================
    /// The input could not be parsed as a URL.
    #[error("Invalid repository URL '{url}': {message}")]
    InvalidUrl {
        /// The input that failed to parse
        url: String,
        /// Parser error message
        message: String,
    },

    /// The URL's hostname is not in the allow-list.
    #[error("Unsupported repository host '{host}'. Only GitHub and GitLab are supported.")]
    UnsupportedHost {
        /// The rejected hostname
        host: String,
    },

    /// The URL path does not contain an owner and a repository name.
    #[error("Invalid repository path in '{url}': expected at least owner/repository")]
    InvalidRepoPath {
        /// The offending URL
        url: String,
    },

    // =========================================================================
    // Provider API Errors
    // =========================================================================
    /// The provider requires authentication (401/403, or a private host
    /// reached without a token).
    #[error("Authentication required for '{host}': {message}")]
    AuthenticationRequired {
        /// The host that rejected the request
        host: String,
        /// Details (provider message or local reason)
        message: String,
    },

    /// The provider returned 404 for the repository.
    #[error("Repository '{repo}' not found. Make sure the URL is correct and the repository is accessible.")]
    RepositoryNotFound {
        /// owner/repository (or full project path for GitLab)
        repo: String,
    },

    /// Any other non-success response from a provider API.
    #[error(
        "{} API error{}: {}",
        .provider,
        .status.map(|s| format!(" (status {s})")).unwrap_or_default(),
        .message
    )]
    Provider {
        /// Provider name ("GitHub" or "GitLab")
        provider: &'static str,
        /// HTTP status code, when the response got that far
        status: Option<u16>,
        /// Provider-supplied message or status text
        message: String,
    },

    /// The tree listing contained no `.tf`/`.tfvars` blobs.
    #[error("No Terraform files (.tf or .tfvars) found in repository '{repo}'")]
    NoMatchingFiles {
        /// owner/repository (or full project path for GitLab)
        repo: String,
    },

    /// A file could not be retrieved from any candidate branch.
    ///
    /// Per-file only; the orchestrator converts this into the fixed
    /// placeholder content rather than failing the batch.
    #[error("Could not find file in any branch")]
    BranchesExhausted {
        /// The file path that was tried
        path: String,
    },

    // =========================================================================
    // Ambient Errors
    // =========================================================================
    /// HTTP transport failure (connection, TLS, body read).
    #[error("HTTP request failed: {message}")]
    Http {
        /// Transport error message
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parsing error.
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        /// Error message
        message: String,
        /// The underlying error (if any)
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Report generation error.
    #[error("Failed to generate report: {message}")]
    ReportGeneration {
        /// Error message
        message: String,
    },
}

impl From<reqwest::Error> for TfViewError {
    fn from(source: reqwest::Error) -> Self {
        Self::Http {
            message: source.to_string(),
        }
    }
}

impl TfViewError {
    /// Returns the appropriate process exit code for the error.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidUrl { .. } | Self::InvalidRepoPath { .. } => 10,
            Self::UnsupportedHost { .. } => 11,
            Self::AuthenticationRequired { .. } => 12,
            Self::RepositoryNotFound { .. } => 13,
            Self::NoMatchingFiles { .. } => 14,
            Self::ConfigParse { .. } => 18,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_includes_status_when_present() {
        let err = TfViewError::Provider {
            provider: "GitHub",
            status: Some(500),
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "GitHub API error (status 500): boom");

        let err = TfViewError::Provider {
            provider: "GitLab",
            status: None,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "GitLab API error: boom");
    }

    #[test]
    fn branches_exhausted_has_fixed_message() {
        let err = TfViewError::BranchesExhausted {
            path: "main.tf".to_string(),
        };
        assert_eq!(err.to_string(), "Could not find file in any branch");
    }

    #[test]
    fn exit_codes_are_distinct_per_user_error() {
        let not_found = TfViewError::RepositoryNotFound {
            repo: "acme/infra".to_string(),
        };
        let no_files = TfViewError::NoMatchingFiles {
            repo: "acme/infra".to_string(),
        };
        assert_ne!(not_found.exit_code(), no_files.exit_code());
    }
}
