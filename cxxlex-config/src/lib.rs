//! cxxlex Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It serves as the shared configuration vocabulary across all cxxlex crates.
//!
//! Every struct deserializes with `#[serde(default)]`, so a config file only
//! needs to name the fields it overrides.

use serde::Deserialize;

/// Configuration for lexer behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Track `#if`/`#endif` nesting and report imbalance at end of input
    pub track_conditionals: bool,
    /// Recognize the digraphs `<% %> <: :> %: %:%:`
    pub digraphs: bool,
    /// Accept `$` in identifiers (GCC/Clang extension)
    pub dollar_in_identifiers: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            track_conditionals: true,
            digraphs: true,
            dollar_in_identifiers: false,
        }
    }
}

/// Token output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON record per line
    #[default]
    Json,
    /// Aligned human-readable table
    Table,
    /// Token counts and diagnostics only
    Summary,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Summary => "summary",
        }
    }
}

/// Configuration for rendering results
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Leave whitespace and comment tokens out of the rendered output
    pub skip_trivia: bool,
    /// Treat any invalid token as a failure
    pub deny_invalid: bool,
}

/// Log level, ordered from most to least severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse a level name; "silent" maps to errors only
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "silent" | "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Tokenization phase, used to address per-phase log levels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Scanner,
    Classifier,
    Lexer,
    Api,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Scanner, Phase::Classifier, Phase::Lexer, Phase::Api];

    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Scanner => "scanner",
            Phase::Classifier => "classifier",
            Phase::Lexer => "lexer",
            Phase::Api => "api",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("cxxlex::{}", self.as_str())
    }
}

/// Logging configuration: a global level plus optional per-phase overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub scanner: Option<LogLevel>,
    pub classifier: Option<LogLevel>,
    pub lexer: Option<LogLevel>,
    pub api: Option<LogLevel>,
}

impl LoggingConfig {
    /// Effective level for a phase
    pub fn level_for(&self, phase: Phase) -> LogLevel {
        let specific = match phase {
            Phase::Scanner => self.scanner,
            Phase::Classifier => self.classifier,
            Phase::Lexer => self.lexer,
            Phase::Api => self.api,
        };
        specific.unwrap_or(self.level)
    }
}

/// Top-level configuration file (`cxxlex.json`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CxxlexConfig {
    pub lexer: LexerConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl CxxlexConfig {
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexer_config() {
        let cfg = LexerConfig::default();
        assert!(cfg.track_conditionals);
        assert!(cfg.digraphs);
        assert!(!cfg.dollar_in_identifiers);
    }

    #[test]
    fn test_phase_as_str() {
        assert_eq!(Phase::Classifier.as_str(), "classifier");
        assert_eq!(Phase::Scanner.target(), "cxxlex::scanner");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("silent"), Some(LogLevel::Error));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("loud"), None);
    }

    #[test]
    fn test_level_for_falls_back_to_global() {
        let cfg = LoggingConfig {
            level: LogLevel::Info,
            classifier: Some(LogLevel::Trace),
            ..Default::default()
        };
        assert_eq!(cfg.level_for(Phase::Classifier), LogLevel::Trace);
        assert_eq!(cfg.level_for(Phase::Scanner), LogLevel::Info);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg = CxxlexConfig::from_json_str(
            r#"{ "lexer": { "digraphs": false }, "output": { "format": "table" } }"#,
        )
        .unwrap();
        assert!(!cfg.lexer.digraphs);
        assert!(cfg.lexer.track_conditionals);
        assert_eq!(cfg.output.format, OutputFormat::Table);
        assert!(!cfg.output.skip_trivia);
        assert_eq!(cfg.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_empty_json_is_default() {
        let cfg = CxxlexConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, CxxlexConfig::default());
    }
}
