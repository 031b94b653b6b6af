//! Core types shared across tfview.
//!
//! Everything here lives only for the duration of one fetch operation;
//! nothing is persisted.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The hosting service whose REST API is targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// github.com and subdomains
    GitHub,
    /// gitlab.com, subdomains, and configured private hosts
    GitLab,
}

impl Provider {
    /// Human-readable provider name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::GitLab => "GitLab",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified repository reference, derived once from the input URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoReference {
    /// Which provider API to talk to
    pub provider: Provider,
    /// The hostname the URL pointed at (matters for private GitLab hosts)
    pub host: String,
    /// First path segment (user or top-level group)
    pub owner: String,
    /// Last path segment (repository or project name)
    pub repo: String,
    /// Slash-joined API path: `owner/repo` for GitHub, the full
    /// namespace/subgroup/project path for GitLab
    pub project_path: String,
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.project_path)
    }
}

/// Kind of a repository tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file
    Blob,
    /// A directory
    Tree,
}

/// One entry from a provider's recursive tree listing.
///
/// Transient; discarded after filtering and content retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Path relative to the repository root
    pub path: String,
    /// Blob or tree
    pub kind: EntryKind,
    /// GitHub blob API URL from the tree listing; `None` for GitLab,
    /// whose content endpoint is addressed by file path instead
    pub blob_url: Option<String>,
}

impl TreeEntry {
    /// True when the entry is a file with a `.tf` or `.tfvars` extension
    /// (case-insensitive, text after the last dot).
    #[must_use]
    pub fn is_terraform_file(&self) -> bool {
        if self.kind != EntryKind::Blob {
            return false;
        }
        self.path
            .rsplit_once('.')
            .is_some_and(|(_, ext)| {
                ext.eq_ignore_ascii_case("tf") || ext.eq_ignore_ascii_case("tfvars")
            })
    }
}

/// A fetched repository file, normalized across providers.
///
/// When `error` is true, `content` holds a human-readable placeholder
/// message, never raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchedFile {
    /// Path relative to the repository root
    pub path: String,
    /// Decoded UTF-8 content, or the error placeholder
    pub content: String,
    /// Size in bytes as reported by the provider (0 on error)
    pub size: u64,
    /// True when content could not be retrieved
    pub error: bool,
}

impl FetchedFile {
    /// Build the placeholder record for a file whose retrieval failed.
    #[must_use]
    pub fn from_failure(path: String, error: &crate::error::TfViewError) -> Self {
        let content = match error {
            // The branch-exhaustion message stands alone, without a prefix.
            crate::error::TfViewError::BranchesExhausted { .. } => error.to_string(),
            _ => format!("Error loading file: {error}"),
        };
        Self {
            path,
            content,
            size: 0,
            error: true,
        }
    }
}

/// The result of one complete fetch operation.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    /// The classified repository the files came from
    pub repo: RepoReference,
    /// Fetched files, in tree-listing order
    pub files: Vec<FetchedFile>,
}

impl FetchResult {
    /// Number of files whose content could not be retrieved.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.files.iter().filter(|f| f.error).count()
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable CLI output
    Text,
    /// Machine-readable structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TfViewError;

    fn blob(path: &str) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind: EntryKind::Blob,
            blob_url: None,
        }
    }

    #[test]
    fn terraform_extension_matching() {
        assert!(blob("main.tf").is_terraform_file());
        assert!(blob("env/prod.tfvars").is_terraform_file());
        assert!(blob("UPPER.TF").is_terraform_file());
        assert!(!blob("README.md").is_terraform_file());
        assert!(!blob("notes.tfstate").is_terraform_file());
        assert!(!blob("tf").is_terraform_file());
    }

    #[test]
    fn directories_never_match() {
        let dir = TreeEntry {
            path: "modules.tf".to_string(),
            kind: EntryKind::Tree,
            blob_url: None,
        };
        assert!(!dir.is_terraform_file());
    }

    #[test]
    fn failure_placeholder_wraps_message() {
        let err = TfViewError::Http {
            message: "connection reset".to_string(),
        };
        let file = FetchedFile::from_failure("main.tf".to_string(), &err);
        assert!(file.error);
        assert_eq!(file.size, 0);
        assert_eq!(
            file.content,
            "Error loading file: HTTP request failed: connection reset"
        );
    }

    #[test]
    fn failure_placeholder_for_exhausted_branches_is_bare() {
        let err = TfViewError::BranchesExhausted {
            path: "main.tf".to_string(),
        };
        let file = FetchedFile::from_failure("main.tf".to_string(), &err);
        assert_eq!(file.content, "Could not find file in any branch");
    }
}
