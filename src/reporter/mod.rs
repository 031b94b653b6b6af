//! Report generation module.
//!
//! This module renders a [`FetchResult`] in multiple formats:
//! - Text: human-readable CLI output
//! - JSON: machine-readable structured output

mod json;
mod text;

use crate::config::Config;
use crate::error::Result;
use crate::types::{FetchResult, ReportFormat};

pub use json::JsonReporter;
pub use text::TextReporter;

/// Report generator that supports multiple output formats.
pub struct Reporter {
    config: Config,
}

impl Reporter {
    /// Create a new reporter with the given configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Generate a report in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if report generation fails.
    pub fn generate(&self, result: &FetchResult, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Json => JsonReporter::new(&self.config).generate(result),
            ReportFormat::Text => TextReporter::new(&self.config).generate(result),
        }
    }
}

/// Trait for report generators.
pub trait ReportGenerator {
    /// Generate a report from a fetch result.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails.
    fn generate(&self, result: &FetchResult) -> Result<String>;
}
