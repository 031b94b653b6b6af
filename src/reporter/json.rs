//! JSON report generator.

use crate::config::Config;
use crate::error::TfViewError;
use crate::reporter::ReportGenerator;
use crate::types::{FetchResult, FetchedFile, RepoReference};
use serde::Serialize;

/// JSON report generator.
pub struct JsonReporter {
    /// Whether to pretty-print the output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            pretty: config.output.pretty,
        }
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, result: &FetchResult) -> crate::error::Result<String> {
        let report = JsonReport::from(result);

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        };

        json.map_err(|e| TfViewError::ReportGeneration {
            message: format!("Failed to serialize JSON report: {e}"),
        })
    }
}

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// The repository the files came from
    pub repository: RepoReference,
    /// Summary statistics
    pub summary: ReportSummary,
    /// The fetched files, in tree-listing order
    pub files: Vec<FetchedFile>,
}

impl From<&FetchResult> for JsonReport {
    fn from(result: &FetchResult) -> Self {
        Self {
            metadata: ReportMetadata {
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            },
            repository: result.repo.clone(),
            summary: ReportSummary {
                total_files: result.files.len(),
                errors: result.error_count(),
            },
            files: result.files.clone(),
        }
    }
}

/// Report metadata.
#[derive(Debug, Serialize)]
pub struct ReportMetadata {
    /// tfview version
    pub version: String,
    /// Report generation timestamp (RFC 3339)
    pub timestamp: String,
}

/// Report summary.
#[derive(Debug, Serialize)]
pub struct ReportSummary {
    /// Total files in the batch
    pub total_files: usize,
    /// Files whose content could not be retrieved
    pub errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use pretty_assertions::assert_eq;

    #[test]
    fn json_report_structure() {
        let result = FetchResult {
            repo: classify("https://gitlab.com/team/sub/project", &[]).unwrap(),
            files: vec![FetchedFile {
                path: "main.tf".to_string(),
                content: "locals {}".to_string(),
                size: 9,
                error: false,
            }],
        };

        let mut config = Config::default();
        config.output.pretty = false;
        let json = JsonReporter::new(&config).generate(&result).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["metadata"]["version"].is_string());
        assert_eq!(parsed["repository"]["provider"], "gitlab");
        assert_eq!(parsed["repository"]["project_path"], "team/sub/project");
        assert_eq!(parsed["summary"]["total_files"], 1);
        assert_eq!(parsed["summary"]["errors"], 0);
        assert_eq!(parsed["files"][0]["path"], "main.tf");
    }
}
