//! CLI 配置
//!
//! 包含 CLI 特有的配置：把文件中的日志配置映射到 tracing 级别

use cxxlex_api::{LogLevel, LoggingConfig, Phase};
use tracing::Level;

/// CLI 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub scanner: Option<Level>,
    pub classifier: Option<Level>,
    pub lexer: Option<Level>,
    pub api: Option<Level>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            scanner: None,
            classifier: None,
            lexer: None,
            api: None,
        }
    }
}

impl LogConfig {
    /// 从配置文件的日志段构建；`override_level` 来自 `--log-level`，覆盖全局级别
    pub fn from_logging(logging: &LoggingConfig, override_level: Option<LogLevel>) -> Self {
        let phase_level =
            |phase: Phase, specific: Option<LogLevel>| specific.map(|_| to_level(logging.level_for(phase)));
        Self {
            global: to_level(override_level.unwrap_or(logging.level)),
            scanner: phase_level(Phase::Scanner, logging.scanner),
            classifier: phase_level(Phase::Classifier, logging.classifier),
            lexer: phase_level(Phase::Lexer, logging.lexer),
            api: phase_level(Phase::Api, logging.api),
        }
    }

    /// Get log level for a specific phase
    pub fn level_for(&self, phase: Phase) -> Level {
        let specific = match phase {
            Phase::Scanner => self.scanner,
            Phase::Classifier => self.classifier,
            Phase::Lexer => self.lexer,
            Phase::Api => self.api,
        };
        specific.unwrap_or(self.global)
    }
}

pub fn to_level(level: LogLevel) -> Level {
    match level {
        LogLevel::Error => Level::ERROR,
        LogLevel::Warn => Level::WARN,
        LogLevel::Info => Level::INFO,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Trace => Level::TRACE,
    }
}
