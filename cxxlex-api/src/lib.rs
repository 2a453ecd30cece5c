//! cxxlex API - Tokenization orchestration layer
//!
//! Provides unified tokenization interface, including:
//! - Tokenization with diagnostics (LexReport)
//! - Configuration abstraction (RunConfig)
//! - Unified error handling (CxxlexError)
//! - Output rendering (JSON lines, table, summary)
//!
//! For CLI convenience, this crate provides a global singleton API.
//! For library use, prefer the explicit `tokenize(source, &config)` API.

use std::path::Path;

use tracing::{debug, info};

use cxxlex_core::Lexer;

// Re-export config
pub mod config;
pub use config::{config as get_config, init as init_config, is_initialized, RunConfig};

// Re-export config types from cxxlex_config
pub use cxxlex_config::{
    CxxlexConfig, LexerConfig, LogLevel, LoggingConfig, OutputConfig, OutputFormat, Phase,
};

// Re-export error and types
pub mod error;
pub mod render;
pub mod types;
pub use error::{CxxlexError, ErrorDetails, ErrorReport, LexerError};
pub use types::LexReport;

// Re-export core types
pub use cxxlex_config;
pub use cxxlex_core::{
    Directive, Encoding, InvalidReason, Radix, SourcePosition, SourceSpan, Token, TokenKind,
};

/// Tokenize with explicit configuration
///
/// This is the recommended API for library users. Never fails: invalid input
/// shows up as `Invalid` tokens and matching entries in `diagnostics`.
pub fn tokenize(source: &str, config: &RunConfig) -> LexReport {
    info!(target: "cxxlex::api", bytes = source.len(), "Starting tokenization");

    let mut lexer = Lexer::with_config(source, config.lexer.clone());
    let tokens: Vec<Token> = lexer.by_ref().collect();
    let conditionals = lexer.conditionals();

    let report = LexReport {
        diagnostics: tokens.iter().filter_map(LexerError::from_token).collect(),
        unclosed_conditionals: conditionals.unclosed().to_vec(),
        stray_conditionals: conditionals.stray().to_vec(),
        tokens,
    };

    debug!(
        target: "cxxlex::api",
        tokens = report.tokens.len(),
        diagnostics = report.diagnostics.len(),
        "Tokenization completed"
    );
    report
}

/// Tokenize and fail if `output.deny_invalid` is set and any token is invalid
pub fn tokenize_checked(source: &str, config: &RunConfig) -> Result<LexReport, CxxlexError> {
    let report = tokenize(source, config);
    check_invalid(&report, &config.output)?;
    Ok(report)
}

/// Fail with `InvalidTokens` when `deny_invalid` is set and the report has diagnostics
pub fn check_invalid(report: &LexReport, output: &OutputConfig) -> Result<(), CxxlexError> {
    match report.diagnostics.first() {
        Some(first) if output.deny_invalid => Err(CxxlexError::InvalidTokens {
            count: report.diagnostics.len(),
            first: first.clone(),
        }),
        _ => Ok(()),
    }
}

/// Read a source file
pub fn load_source(path: &Path) -> Result<String, CxxlexError> {
    debug!(target: "cxxlex::api", path = %path.display(), "Reading source");
    std::fs::read_to_string(path).map_err(|source| CxxlexError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and parse a `cxxlex.json` configuration file
pub fn load_config(path: &Path) -> Result<CxxlexConfig, CxxlexError> {
    debug!(target: "cxxlex::api", path = %path.display(), "Loading config");
    let content = std::fs::read_to_string(path).map_err(|source| CxxlexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CxxlexConfig::from_json_str(&content).map_err(|source| CxxlexError::Config {
        path: path.to_path_buf(),
        source,
    })
}

// ==================== Global config API ====================

/// Tokenize using the global config
///
/// # Panics
/// If global config is not initialized
pub fn tokenize_global(source: &str) -> Result<LexReport, CxxlexError> {
    tokenize_checked(source, get_config())
}

/// Quick tokenize with default config (auto-initializes if needed)
pub fn quick_tokenize(source: &str) -> LexReport {
    tokenize(source, config::config_or_default())
}
