//! CLI definition and handler

use crate::config::{load_config_file, load_project_config, ProjectConfig};
use crate::error::{GapScoreError, Suite};
use crate::gate;
use crate::models::ResultSet;
use crate::report::{ReportBuilder, ScoreFlavor};
use crate::reporters::{self, OutputFormat, RenderOptions};
use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Parse and validate a threshold percentage
fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("threshold must be a finite number".to_string())
    }
}

/// gap-score - score a sealed test suite against an implementation
#[derive(Parser, Debug)]
#[command(name = "gap-score")]
#[command(
    version,
    about = "Compute the Gap Score: the share of a sealed test suite an implementation fails",
    long_about = "Reads sealed test results (written from the requirements, hidden from the \
implementer) and optionally the implementer's own open test results, then reports the \
percentage of sealed tests that failed, its severity level, and how the two suites \
cover each scenario category.\n\n\
Exit codes: 0 = ok, 1 = threshold exceeded, 2 = usage or input error.",
    after_help = "\
Examples:
  gap-score --sealed sealed-results.json                       JSON report
  gap-score --sealed sealed.json --open open.json              Include coverage comparison
  gap-score --sealed sealed.json --format summary              Human-readable digest
  gap-score --sealed sealed.json --threshold 15                Exit 1 if score > 15 (CI mode)
  gap-score --sealed sealed.json --flavor shadow -o report.json  Shadow Score keys, to a file"
)]
pub struct Cli {
    /// Path to sealed test results JSON
    #[arg(long, value_name = "PATH")]
    pub sealed: PathBuf,

    /// Path to open test results JSON (enables coverage comparison)
    #[arg(long, value_name = "PATH")]
    pub open: Option<PathBuf>,

    /// Exit with code 1 if the score exceeds this threshold
    #[arg(
        long,
        env = "GAP_SCORE_THRESHOLD",
        value_parser = parse_threshold,
        allow_negative_numbers = true
    )]
    pub threshold: Option<f64>,

    /// Output format: json (default), summary
    #[arg(long, short = 'f', env = "GAP_SCORE_FORMAT", value_parser = ["json", "summary"])]
    pub format: Option<String>,

    /// Report flavor: gap (default), shadow
    #[arg(long, env = "GAP_SCORE_FLAVOR", value_parser = ["gap", "shadow"])]
    pub flavor: Option<String>,

    /// Output file path (default: stdout)
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Disable emoji in summary output (cleaner for CI logs)
    #[arg(long)]
    pub no_emoji: bool,

    /// Config file (default: gap-score.toml or .gap-score.json in the working directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,
}

/// Effective options after merging flags, environment and config
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub format: OutputFormat,
    pub flavor: ScoreFlavor,
    pub threshold: Option<f64>,
    pub render: RenderOptions,
}

impl Settings {
    /// Flags and environment win over config, config wins over built-ins
    pub fn resolve(cli: &Cli, config: &ProjectConfig) -> Result<Self> {
        let format = match cli.format.as_deref() {
            Some(f) => OutputFormat::from_str(f)?,
            None => config.format().unwrap_or_default(),
        };
        let flavor = match cli.flavor.as_deref() {
            Some(f) => ScoreFlavor::from_str(f).map_err(anyhow::Error::msg)?,
            None => config.flavor().unwrap_or_default(),
        };
        Ok(Self {
            format,
            flavor,
            threshold: cli.threshold.or(config.threshold()),
            render: RenderOptions {
                no_emoji: cli.no_emoji || config.no_emoji(),
            },
        })
    }
}

fn load_config(cli: &Cli) -> Result<ProjectConfig> {
    match &cli.config {
        Some(path) => Ok(load_config_file(path)?),
        None => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Ok(load_project_config(&cwd))
        }
    }
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered).map_err(|source| GapScoreError::WriteOutput {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Wrote report to {}", path.display());
        }
        None => write_stdout(&mut std::io::stdout().lock(), rendered)?,
    }
    Ok(())
}

/// Write the report to stdout, surfacing a closed pipe as an error
fn write_stdout<W: Write>(out: &mut W, rendered: &str) -> Result<(), GapScoreError> {
    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .map_err(GapScoreError::WriteStdout)
}

/// Run one scoring pass and return the process exit code.
///
/// Errors are usage or input failures; the caller maps them to exit 2.
pub fn run(cli: Cli) -> Result<u8> {
    let config = load_config(&cli)?;
    let settings = Settings::resolve(&cli, &config)?;
    debug!("Settings: {:?}", settings);

    let sealed = ResultSet::load(&cli.sealed, Suite::Sealed)?;
    let open = cli
        .open
        .as_deref()
        .map(|path| ResultSet::load(path, Suite::Open))
        .transpose()?;

    let report = ReportBuilder::new(&sealed)
        .with_open_opt(open.as_ref())
        .with_flavor(settings.flavor)
        .build();

    let mut rendered = reporters::report_with_format(&report, settings.format, settings.render)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }
    write_output(&rendered, cli.output.as_deref())?;

    let outcome = gate::evaluate(report.score(), settings.threshold);
    debug!("Gate: {}", outcome);
    if outcome.is_failure() {
        eprintln!("Failing: {}", outcome);
    }
    Ok(outcome.exit_code())
}
