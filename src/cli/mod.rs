//! Command-line interface module.
//!
//! This module defines the CLI structure using Clap, including
//! all commands, arguments, and options.
//!
//! # Commands
//!
//! - `fetch`: Fetch and print a repository's Terraform files
//! - `list`: List the matching Terraform file paths without content
//! - `init`: Create an example configuration file
//! - `validate`: Validate a configuration file
//!
//! # Example Usage
//!
//! ```bash
//! # Fetch Terraform files from a public repository
//! tfview fetch https://github.com/acme/infra
//!
//! # JSON output into a file
//! tfview fetch https://gitlab.com/team/sub/project --format json --output files.json
//!
//! # Private repository
//! tfview fetch https://gitlab.internal.example.com/ops/tf --token glpat-...
//!
//! # Just the paths
//! tfview list https://github.com/acme/infra
//!
//! # Initialize configuration
//! tfview init
//! ```

use crate::types::ReportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// tfview - fetch and view Terraform files from remote repositories.
#[derive(Parser, Debug)]
#[command(
    name = "tfview",
    author,
    version,
    about = "Fetch and view Terraform files from GitHub and GitLab repositories",
    long_about = "tfview takes a GitHub or GitLab repository URL, lists the repository \
                  tree through the provider's REST API, and fetches every .tf and \
                  .tfvars file it finds."
)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, env = "TFVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a repository's Terraform files
    #[command(visible_alias = "f")]
    Fetch(FetchArgs),

    /// List matching Terraform file paths without fetching content
    #[command(visible_alias = "ls")]
    List(ListArgs),

    /// Create an example configuration file
    Init,

    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Arguments for the fetch command.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Repository URL (GitHub or GitLab)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Access token for private repositories
    #[arg(short, long, env = "TFVIEW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_enum)]
    pub format: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Repository URL (GitHub or GitLab)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Access token for private repositories
    #[arg(short, long, env = "TFVIEW_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

/// Arguments for the validate command.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(id = "config_file", value_name = "FILE", default_value = "tfview.yaml")]
    pub config: PathBuf,
}
