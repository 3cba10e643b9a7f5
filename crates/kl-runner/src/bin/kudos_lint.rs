//! CLI for the KUDOS source style checks.
//!
//! # Usage
//!
//! ```bash
//! # Both checks from the repository root
//! kudos-lint check
//!
//! # Guards only, JSON output, without gcc
//! kudos-lint guards --builtin-normalizer --format json
//!
//! # Comments only, for one subtree
//! kudos-lint comments --comment-root kudos/drivers
//! ```
//!
//! Exit status: 0 when clean, 1 when violations were reported, 2 when the
//! run could not complete.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use kl_core::CheckReport;
use kl_normalize::{CommentStripper, Normalizer, PreprocessorNormalizer};
use kl_runner::{GuardRoot, LintConfig, Runner};
use tracing_subscriber::EnvFilter;

/// Style checker for the KUDOS C sources.
#[derive(Parser, Debug)]
#[command(name = "kudos-lint", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON config file (defaults to the KUDOS layout)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Guard root and its prefix; replaces the configured roots
    #[arg(long = "root", global = true, value_name = "PATH=PREFIX")]
    roots: Vec<String>,

    /// Comment root; replaces the configured roots
    #[arg(long = "comment-root", global = true, value_name = "PATH")]
    comment_roots: Vec<PathBuf>,

    /// Preprocessor executable used to strip comments
    #[arg(long, global = true)]
    preprocessor: Option<String>,

    /// Preprocessor timeout per file, in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Strip comments in-process instead of running the preprocessor
    #[arg(long, global = true)]
    builtin_normalizer: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Check include guards of headers.
    Guards,
    /// Check that sources use only `//` comments.
    Comments,
    /// Run both checks.
    Check,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = run(&cli);
    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

/// 0 clean, 1 violations reported, 2 run aborted.
fn exit_status(result: &anyhow::Result<CheckReport>) -> u8 {
    match result {
        Ok(report) if report.passes() => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}

fn run(cli: &Cli) -> anyhow::Result<CheckReport> {
    let config = build_config(cli)?;

    let normalizer: Box<dyn Normalizer> = if cli.builtin_normalizer {
        Box::new(CommentStripper::new())
    } else {
        Box::new(
            PreprocessorNormalizer::new(config.preprocessor.clone())
                .context("failed to set up preprocessor")?,
        )
    };
    let runner = Runner::new(config, normalizer);

    let report = match cli.command {
        Command::Guards => runner.run_guards(),
        Command::Comments => runner.run_comments(),
        Command::Check => runner.run_all(),
    }
    .context("style check aborted")?;

    match cli.format {
        Format::Text => print!("{}", report.format_lines()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    tracing::info!("{}", report.format_summary());

    Ok(report)
}

/// Defaults, then the config file, then flags.
fn build_config(cli: &Cli) -> anyhow::Result<LintConfig> {
    let mut config = match &cli.config {
        Some(path) => LintConfig::from_json_file(path)?,
        None => LintConfig::default(),
    };

    if !cli.roots.is_empty() {
        config.guard_roots = cli
            .roots
            .iter()
            .map(|spec| GuardRoot::parse(spec))
            .collect::<Result<Vec<_>, _>>()?;
    }
    if !cli.comment_roots.is_empty() {
        config.comment_roots = cli.comment_roots.clone();
    }
    if let Some(program) = &cli.preprocessor {
        config.preprocessor.program = program.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        config.preprocessor.timeout_secs = secs;
    }

    Ok(config)
}
