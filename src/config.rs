//! Configuration module for tfview.
//!
//! This module handles loading and validating configuration from:
//! - YAML configuration files (`tfview.yaml`)
//! - Environment variables
//! - CLI arguments
//!
//! # Configuration File Format
//!
//! ```yaml
//! # tfview.yaml
//!
//! # Access tokens (also settable via TFVIEW_GITHUB_TOKEN / TFVIEW_GITLAB_TOKEN)
//! auth:
//!   github_token: null
//!   gitlab_token: null
//!
//! # Self-hosted GitLab instances; requests to these hosts require a token
//! gitlab:
//!   hosts:
//!     - gitlab.internal.example.com
//!
//! # Output options
//! output:
//!   colored: true
//!   pretty: true
//! ```

use crate::error::{Result, TfViewError};
use crate::types::Provider;
use serde::{Deserialize, Serialize};

/// Authentication options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AuthOptions {
    /// GitHub personal access token
    pub github_token: Option<String>,

    /// GitLab personal/group access token
    pub gitlab_token: Option<String>,
}

impl AuthOptions {
    /// Get the configured token for a provider, if any.
    #[must_use]
    pub fn token_for(&self, provider: Provider) -> Option<&str> {
        match provider {
            Provider::GitHub => self.github_token.as_deref(),
            Provider::GitLab => self.gitlab_token.as_deref(),
        }
    }

    /// Load tokens from environment variables when not set in the config file.
    pub fn load_from_env(&mut self) {
        let get_non_empty_env =
            |var: &str| -> Option<String> { std::env::var(var).ok().filter(|s| !s.is_empty()) };

        if self.github_token.is_none() {
            if let Some(token) = get_non_empty_env("TFVIEW_GITHUB_TOKEN") {
                tracing::debug!("Loaded GitHub token from TFVIEW_GITHUB_TOKEN");
                self.github_token = Some(token);
            }
        }

        if self.gitlab_token.is_none() {
            if let Some(token) = get_non_empty_env("TFVIEW_GITLAB_TOKEN") {
                tracing::debug!("Loaded GitLab token from TFVIEW_GITLAB_TOKEN");
                self.gitlab_token = Some(token);
            }
        }
    }
}

/// GitLab options.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GitLabOptions {
    /// Self-hosted GitLab instances accepted by the URL classifier.
    ///
    /// These hosts are treated as private: fetching from them without a
    /// token fails up front with an authentication error.
    pub hosts: Vec<String>,
}

/// Output options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Use colored output.
    pub colored: bool,

    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            colored: true,
            pretty: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Authentication options
    pub auth: AuthOptions,
    /// GitLab options
    pub gitlab: GitLabOptions,
    /// Output options
    pub output: OutputOptions,
}

impl Config {
    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigParse` error if the YAML is invalid.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| TfViewError::ConfigParse {
            message: format!("Invalid YAML configuration: {e}"),
            source: Some(Box::new(e)),
        })
    }

    /// Load tokens from environment variables when not set in the file.
    pub fn load_tokens_from_env(&mut self) {
        self.auth.load_from_env();
    }

    /// An example configuration file, used by `tfview init`.
    #[must_use]
    pub fn example_yaml() -> &'static str {
        r"# tfview configuration

# Access tokens. Leave unset for public repositories; tfview also reads
# TFVIEW_GITHUB_TOKEN and TFVIEW_GITLAB_TOKEN from the environment.
auth:
  github_token: null
  gitlab_token: null

# Self-hosted GitLab instances. URLs pointing at these hosts are treated
# as GitLab projects and always require a token.
gitlab:
  hosts: []
  # hosts:
  #   - gitlab.internal.example.com

# Output options
output:
  colored: true
  pretty: true
"
    }
}
