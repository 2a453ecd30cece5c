//! cxxlex CLI - Command line interface
//!
//! Tokenizes one C/C++ source file. Settings come from `cxxlex.json`
//! (or `--config`), and command line flags override them.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;

mod config;
mod logging;
mod platform;

use crate::config::LogConfig;
use crate::logging::LogFormat;
use crate::platform::{print_diagnostic, print_error_with_source};
use cxxlex_api::{
    check_invalid, init_config, load_config, load_source, render::render, tokenize,
    CxxlexConfig, CxxlexError, LogLevel, OutputFormat, RunConfig,
};
use tracing::{debug, info};

/// 默认配置文件名（在当前目录查找）
const DEFAULT_CONFIG: &str = "cxxlex.json";

/// 退出码：读文件或配置失败
const EXIT_FAILURE: i32 = 1;
/// 退出码：`--deny-invalid` 下出现非法 token
const EXIT_INVALID: i32 = 2;

#[derive(Parser)]
#[command(
    name = "cxxlex",
    about = "Lossless C-family tokenizer",
    version = "0.1.0"
)]
struct Cli {
    /// Source file to tokenize
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Leave whitespace and comments out of the output
    #[arg(long)]
    skip_trivia: bool,

    /// Exit with status 2 if any invalid token is produced
    #[arg(long)]
    deny_invalid: bool,

    /// Configuration file path (default: ./cxxlex.json if present)
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "silent", "error", "warn", "info", "debug", "trace"
    #[arg(long, value_name = "LEVEL", value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    /// Also append logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Summary,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Read cxxlex.json
    let file_config = match read_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            print_error_with_source(&e, &error_source(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    let log_config = LogConfig::from_logging(&file_config.logging, cli.log_level);
    if let Err(e) = logging::init_with_file(&log_config, cli.log_format, cli.log_file.as_deref())
    {
        eprintln!("error: cannot initialize logging: {}", e);
        process::exit(EXIT_FAILURE);
    }

    // Build run configuration and initialize API config (global singleton for convenience)
    let run_config = build_run_config(&cli, file_config);
    init_config(run_config.clone());
    debug!(target: "cxxlex::cli", ?run_config, "Resolved configuration");

    let source = match load_source(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            print_error_with_source(&e, &error_source(&e));
            process::exit(EXIT_FAILURE);
        }
    };

    let report = tokenize(&source, &run_config);

    match render(&report, &run_config.output) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            print_error_with_source(&e, &source);
            process::exit(EXIT_FAILURE);
        }
    }

    for diagnostic in &report.diagnostics {
        print_diagnostic(diagnostic, &source);
    }

    info!(
        target: "cxxlex::cli",
        file = %cli.file.display(),
        tokens = report.tokens.len(),
        invalid = report.invalid_count(),
        "Done"
    );

    if let Err(e) = check_invalid(&report, &run_config.output) {
        eprintln!("{}", e.to_report());
        process::exit(EXIT_INVALID);
    }
}

/// Load the explicit config file, or `cxxlex.json` in the current directory if present
fn read_config(explicit: Option<&Path>) -> Result<CxxlexConfig, CxxlexError> {
    match explicit {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(Path::new(DEFAULT_CONFIG)),
        None => Ok(CxxlexConfig::default()),
    }
}

/// Text to show around an error position; config errors point into the config file
fn error_source(e: &CxxlexError) -> String {
    match e {
        CxxlexError::Config { path, .. } => std::fs::read_to_string(path).unwrap_or_default(),
        _ => String::new(),
    }
}

/// Apply command line overrides on top of the file configuration
fn build_run_config(cli: &Cli, file_config: CxxlexConfig) -> RunConfig {
    let mut run_config = RunConfig::from_config(&file_config);
    if let Some(format) = cli.format {
        run_config.output.format = format.into();
    }
    run_config.output.skip_trivia |= cli.skip_trivia;
    run_config.output.deny_invalid |= cli.deny_invalid;
    run_config
}

/// Parse log level string
fn parse_log_level(s: &str) -> Result<LogLevel, String> {
    LogLevel::parse(s).ok_or_else(|| format!("unknown log level '{}'", s))
}
