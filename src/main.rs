//! tfview CLI entry point.
//!
//! This binary provides the command-line interface for tfview.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use tfview::cli::{Cli, Commands};
use tfview::reporter::Reporter;
use tfview::{Config, RepoFetcher, TfViewError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Run the appropriate command
    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            let code = e
                .downcast_ref::<TfViewError>()
                .map_or(1, TfViewError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // First try RUST_LOG from the environment, otherwise use the verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // tfview at the requested level, everything else at warn
            EnvFilter::new(format!("warn,tfview={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    tracing::debug!("Loading configuration");
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Fetch(args) => {
            let fetcher = RepoFetcher::new(config.clone());
            let result = fetcher.fetch(&args.url, args.token.as_deref()).await?;

            let reporter = Reporter::new(&config);
            let report = reporter.generate(&result, args.format)?;

            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &report)?;
                tracing::info!(path = %output_path.display(), "Report written");
            } else {
                println!("{report}");
            }

            // Per-file errors don't fail the operation, but they do show
            // in the exit code.
            let exit_code = if result.error_count() > 0 { 2 } else { 0 };
            Ok(ExitCode::from(exit_code))
        }

        Commands::List(args) => {
            let fetcher = RepoFetcher::new(config);
            let (repo, entries) = fetcher.list(&args.url, args.token.as_deref()).await?;

            tracing::info!(repo = %repo, files = entries.len(), "Tree listed");
            for entry in entries {
                println!("{}", entry.path);
            }

            Ok(ExitCode::from(0))
        }

        Commands::Init => {
            let config_path = std::path::Path::new("tfview.yaml");

            if config_path.exists() {
                anyhow::bail!("Configuration file already exists: {}", config_path.display());
            }

            std::fs::write(config_path, Config::example_yaml())?;
            println!("Created example configuration: tfview.yaml");
            Ok(ExitCode::from(0))
        }

        Commands::Validate(args) => {
            let config_content = std::fs::read_to_string(&args.config)?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::from(0))
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        let mut config = Config::from_yaml(&content)?;
        config.load_tokens_from_env();
        return Ok(config);
    }

    // Look for default config files
    let default_paths = ["tfview.yaml", "tfview.yml", ".tfview.yaml"];
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            let mut config = Config::from_yaml(&content)?;
            config.load_tokens_from_env();
            return Ok(config);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    let mut config = Config::default();
    config.load_tokens_from_env();
    Ok(config)
}
