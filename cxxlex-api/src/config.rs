//! API 层配置
//!
//! 包含运行配置 RunConfig 和全局单例（供 CLI 使用）

use cxxlex_config::{CxxlexConfig, LexerConfig, OutputConfig};
use once_cell::sync::OnceCell;

/// Tokenization configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Lexer behavior
    pub lexer: LexerConfig,
    /// Rendering and failure policy
    pub output: OutputConfig,
}

impl RunConfig {
    /// Build from a loaded config file; logging settings stay with the CLI
    pub fn from_config(config: &CxxlexConfig) -> Self {
        Self {
            lexer: config.lexer.clone(),
            output: config.output.clone(),
        }
    }
}

// Global config singleton for CLI convenience
static GLOBAL_CONFIG: OnceCell<RunConfig> = OnceCell::new();

/// Initialize global configuration (must be called once before any operation)
///
/// # Panics
/// If config is already initialized
pub fn init(config: RunConfig) {
    GLOBAL_CONFIG
        .set(config)
        .expect("Config already initialized");
}

/// Get global config reference
///
/// # Panics
/// If config is not initialized
pub fn config() -> &'static RunConfig {
    GLOBAL_CONFIG.get().expect("Config not initialized")
}

/// Get global config, initializing it with defaults on first use
pub fn config_or_default() -> &'static RunConfig {
    GLOBAL_CONFIG.get_or_init(RunConfig::default)
}

/// Check if config is initialized
pub fn is_initialized() -> bool {
    GLOBAL_CONFIG.get().is_some()
}
