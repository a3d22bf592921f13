// SPDX-License-Identifier: PMPL-1.0-or-later
//! Pageauditbot CLI - SEO and Accessibility Page Auditor
//!
//! Part of the gitbot-fleet ecosystem.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pageauditbot::config::{self, Config};
use pageauditbot::report::{generate_report, OutputFormat};
use pageauditbot::{scanner, Auditor};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// SEO and accessibility auditor for HTML pages
#[derive(Parser)]
#[command(name = "pageauditbot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single HTML page
    Audit {
        /// Page to audit
        file: PathBuf,

        /// URL the page is served from (defaults to its file:// URL)
        #[arg(long)]
        url: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the page with flagged elements marked to this file
        #[arg(long)]
        annotate: Option<PathBuf>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Audit every HTML page under a directory
    Check {
        /// Directory to scan
        dir: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the rule catalog in execution order
    Rules {
        /// Configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Write a default configuration file
    InitConfig {
        /// Destination (defaults to .pageauditbot.toml)
        path: Option<PathBuf>,
    },
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pageauditbot=debug")
    } else {
        EnvFilter::new("pageauditbot=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            file,
            url,
            format,
            output,
            annotate,
            config,
            verbose,
        } => {
            init_logging(verbose);
            let auditor = Auditor::new(load(config.as_deref())?);
            let audit = scanner::audit_file(&file, url.as_deref(), &auditor, annotate.is_some())
                .with_context(|| format!("Failed to audit {}", file.display()))?;

            if let (Some(path), Some(html)) = (annotate.as_deref(), audit.annotated_html.as_deref()) {
                std::fs::write(path, html)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!("Annotated page written to {}", path.display());
            }

            let report = generate_report(std::slice::from_ref(&audit.report), format.into());
            write_output(&report, output.as_deref())?;
        }

        Commands::Check {
            dir,
            format,
            output,
            config,
            verbose,
        } => {
            init_logging(verbose);
            let config = load(config.as_deref())?;
            let scan = config.scan.clone();
            let auditor = Auditor::new(config);
            let reports = scanner::scan_directory(&dir, &auditor, &scan)?;
            let report = generate_report(&reports, format.into());
            write_output(&report, output.as_deref())?;
        }

        Commands::Rules { config } => {
            let auditor = Auditor::new(load(config.as_deref())?);
            for (idx, rule) in auditor.rules().iter().enumerate() {
                println!(
                    "{:>2}. {:<18} {:<14} {}",
                    idx + 1,
                    rule.id(),
                    rule.category().to_string(),
                    rule.description()
                );
            }
        }

        Commands::InitConfig { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)?;
            println!("Default configuration written to {}", path.display());
        }
    }

    // Findings are informational; a completed audit always exits 0
    Ok(())
}

/// Load an explicit config file, or the default one when present
fn load(path: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(p) = path {
        anyhow::ensure!(p.exists(), "Config file not found: {}", p.display());
    }
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path);
    config::load_config(&path).with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
