//! Text report generator.

use crate::config::Config;
use crate::error::Result;
use crate::reporter::ReportGenerator;
use crate::types::FetchResult;
use colored::Colorize;
use std::fmt::Write as _;

/// Human-readable CLI report generator.
pub struct TextReporter {
    colored: bool,
}

impl TextReporter {
    /// Create a new text reporter.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            colored: config.output.colored,
        }
    }
}

impl ReportGenerator for TextReporter {
    fn generate(&self, result: &FetchResult) -> Result<String> {
        if !self.colored {
            colored::control::set_override(false);
        }

        let mut out = String::new();
        let errors = result.error_count();

        let _ = writeln!(
            out,
            "{} {} ({} file{}, {} error{})",
            "Repository:".bold(),
            result.repo,
            result.files.len(),
            if result.files.len() == 1 { "" } else { "s" },
            errors,
            if errors == 1 { "" } else { "s" },
        );

        for file in &result.files {
            let _ = writeln!(out);
            if file.error {
                let _ = writeln!(out, "{} {}", "✗".red().bold(), file.path.red().bold());
                let _ = writeln!(out, "  {}", file.content.red());
            } else {
                let _ = writeln!(
                    out,
                    "{} {} {}",
                    "─".dimmed(),
                    file.path.bold(),
                    format!("({} bytes)", file.size).dimmed()
                );
                for line in file.content.lines() {
                    let _ = writeln!(out, "  {line}");
                }
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use crate::types::FetchedFile;

    fn sample_result() -> FetchResult {
        FetchResult {
            repo: classify("https://github.com/acme/infra", &[]).unwrap(),
            files: vec![
                FetchedFile {
                    path: "main.tf".to_string(),
                    content: "resource \"aws_s3\" \"b\" {}".to_string(),
                    size: 24,
                    error: false,
                },
                FetchedFile {
                    path: "broken.tf".to_string(),
                    content: "Could not find file in any branch".to_string(),
                    size: 0,
                    error: true,
                },
            ],
        }
    }

    #[test]
    fn text_report_lists_files_and_errors() {
        let mut config = Config::default();
        config.output.colored = false;

        let text = TextReporter::new(&config).generate(&sample_result()).unwrap();
        assert!(text.contains("GitHub:acme/infra"));
        assert!(text.contains("2 files, 1 error"));
        assert!(text.contains("main.tf"));
        assert!(text.contains("resource \"aws_s3\""));
        assert!(text.contains("Could not find file in any branch"));
    }
}
