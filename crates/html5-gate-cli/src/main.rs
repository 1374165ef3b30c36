//! html5-gate - HTML5 validation from the command line
//!
//! ## Commands
//!
//! - `check`: validate HTML files (or fragments) against the validator service
//! - `probe`: report whether the validator service is reachable

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use html5_gate::{
    Html5ValidationConfig, HttpBackend, IgnoreRules, ValidationBackend, ValidationGate,
    ValidationOutcome, DEFAULT_DOCUMENT_WRAPPER,
};
use tracing::{debug, Level};

mod logging;

#[derive(Parser)]
#[command(name = "html5-gate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate HTML5 documents against a validator service", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    /// JSON configuration file (defaults to HTML5_* environment variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Validator service URL (overrides configuration)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate one or more HTML files
    Check {
        /// Files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Treat the files as fragments and embed them into a document wrapper
        #[arg(long)]
        snippet: bool,

        /// Wrapper template file containing one <<CONTENT>> placeholder
        #[arg(long, requires = "snippet")]
        wrapper: Option<PathBuf>,

        /// Label used in failure reports (default: file name)
        #[arg(short, long)]
        label: Option<String>,

        /// Extra pattern matched against message text
        #[arg(long = "ignore")]
        ignores: Vec<String>,

        /// Extra pattern matched against the extract
        #[arg(long = "ignore-extract")]
        ignores_extract: Vec<String>,
    },

    /// Check whether the validator service is reachable
    Probe,
}

struct CheckArgs {
    files: Vec<PathBuf>,
    snippet: bool,
    wrapper: Option<PathBuf>,
    label: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    logging::init(cli.json, level);

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.url = (!url.trim().is_empty()).then_some(url);
    }

    let ok = match cli.command {
        Commands::Check {
            files,
            snippet,
            wrapper,
            label,
            ignores,
            ignores_extract,
        } => {
            config.ignores.extend(ignores);
            config.ignores_extract.extend(ignores_extract);
            let args = CheckArgs {
                files,
                snippet,
                wrapper,
                label,
            };
            cmd_check(&config, &args).await?
        }
        Commands::Probe => cmd_probe(&config).await?,
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_config(path: Option<&Path>) -> Result<Html5ValidationConfig> {
    let mut config = match path {
        Some(path) => Html5ValidationConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Html5ValidationConfig::from_env().context("Invalid HTML5_* environment")?,
    };
    // running the tool is an explicit request to validate
    config.enabled = true;
    Ok(config)
}

fn build_gate(config: &Html5ValidationConfig) -> Result<ValidationGate<HttpBackend>> {
    let backend =
        HttpBackend::new(config.backend_config()).context("Failed to create HTTP client")?;
    let ignores: IgnoreRules = config.ignore_rules().context("Invalid ignore pattern")?;
    Ok(ValidationGate::new(backend).with_ignores(ignores))
}

/// Returns `false` when at least one file failed validation.
async fn cmd_check(config: &Html5ValidationConfig, args: &CheckArgs) -> Result<bool> {
    let mut gate = build_gate(config)?;

    if args.snippet {
        let template = match &args.wrapper {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read wrapper {}", path.display()))?,
            None => DEFAULT_DOCUMENT_WRAPPER.to_string(),
        };
        gate.set_wrapper(template)?;
    }

    let mut failed = 0usize;
    for file in &args.files {
        let html = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let label = args.label.clone().unwrap_or_else(|| file_label(file));
        debug!(file = %file.display(), %label, "checking");

        let outcome = if args.snippet {
            gate.evaluate_snippet(&html, Some(&label)).await
        } else {
            gate.evaluate(&html, Some(&label)).await
        };

        match outcome {
            ValidationOutcome::Pass => println!("PASS {}", file.display()),
            ValidationOutcome::Skip { reason } => {
                println!("SKIP {}: {}", file.display(), reason)
            }
            ValidationOutcome::Fail { rendered_report } => {
                failed += 1;
                println!("FAIL {}", file.display());
                print!("{}", rendered_report);
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "{} of {} file(s) failed HTML5 validation",
            failed,
            args.files.len()
        );
    }
    Ok(failed == 0)
}

async fn cmd_probe(config: &Html5ValidationConfig) -> Result<bool> {
    let gate = build_gate(config)?;
    let url = gate.backend().service_url().unwrap_or("").to_string();

    if gate.check_availability().await {
        println!("HTML5 Validator service available at '{}'", url);
        Ok(true)
    } else {
        println!("{}", gate.unavailable_reason());
        Ok(false)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
