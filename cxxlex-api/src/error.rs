//! API 错误类型
//!
//! 词法分析本身从不失败；这里覆盖的是外围可失败的操作
//! （读文件、加载配置、渲染输出）以及调用方要求拒绝非法 token 的情况。

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// 词法诊断（结构化）
pub use cxxlex_core::LexerError;

/// cxxlex 错误类型
#[derive(Error, Debug)]
pub enum CxxlexError {
    /// 读取源文件失败
    #[error("cannot read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件无法解析
    #[error("invalid config {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// 输出序列化失败
    #[error("render error: {0}")]
    Render(#[from] serde_json::Error),

    /// 存在非法 token 且调用方要求拒绝
    #[error("{count} invalid token(s), first at {first}")]
    InvalidTokens { count: usize, first: LexerError },
}

impl CxxlexError {
    /// 获取错误行号（如果有）
    pub fn line(&self) -> Option<usize> {
        match self {
            CxxlexError::InvalidTokens { first, .. } => Some(first.line()),
            CxxlexError::Config { source, .. } if source.line() > 0 => Some(source.line()),
            _ => None,
        }
    }

    /// 获取错误列号（如果有）
    pub fn column(&self) -> Option<usize> {
        match self {
            CxxlexError::InvalidTokens { first, .. } => Some(first.column()),
            CxxlexError::Config { source, .. } if source.line() > 0 => Some(source.column()),
            _ => None,
        }
    }

    /// 获取错误阶段名称
    pub fn phase(&self) -> &'static str {
        match self {
            CxxlexError::Io { .. } => "io",
            CxxlexError::Config { .. } => "config",
            CxxlexError::Render(_) => "render",
            CxxlexError::InvalidTokens { .. } => "lexer",
        }
    }

    /// 转换为结构化错误报告
    ///
    /// CLI 可以直接打印，上层应用可以序列化为 JSON。
    ///
    /// # Example
    /// ```ignore
    /// match tokenize_checked(source, &config) {
    ///     Err(e) => {
    ///         let report = e.to_report();
    ///         eprintln!("{}", report);
    ///         let json = report.to_json()?;
    ///     }
    ///     Ok(report) => { /* ... */ }
    /// }
    /// ```
    pub fn to_report(&self) -> ErrorReport {
        let error_kind = match self {
            CxxlexError::Io { source, .. } => format!("{:?}", source.kind()),
            CxxlexError::Config { .. } => "InvalidConfig".to_string(),
            CxxlexError::Render(_) => "RenderError".to_string(),
            CxxlexError::InvalidTokens { first, .. } => format!("{:?}", first.kind),
        };
        let details = match self {
            CxxlexError::Io { path, .. } | CxxlexError::Config { path, .. } => {
                Some(ErrorDetails::File {
                    path: path.display().to_string(),
                })
            }
            CxxlexError::InvalidTokens { count, .. } => {
                Some(ErrorDetails::InvalidTokens { count: *count })
            }
            CxxlexError::Render(_) => None,
        };
        let message = match self {
            CxxlexError::InvalidTokens { first, .. } => first.message.clone(),
            other => other.to_string(),
        };

        ErrorReport {
            phase: self.phase(),
            line: self.line(),
            column: self.column(),
            error_kind,
            message,
            details,
        }
    }
}

/// 结构化错误报告
///
/// 上层应用（CLI、Web、LSP）可以根据自己的需求格式化。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    /// 错误阶段: io, config, render, lexer
    pub phase: &'static str,
    /// 错误行号（1-based，如果有）
    pub line: Option<usize>,
    /// 错误列号（1-based，如果有）
    pub column: Option<usize>,
    /// 错误类型（可用于程序化处理）
    pub error_kind: String,
    /// 人类可读的错误消息
    pub message: String,
    /// 额外详情
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// 错误额外详情
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDetails {
    /// 出错的文件
    File { path: String },
    /// 非法 token 总数
    InvalidTokens { count: usize },
}

impl std::fmt::Display for ErrorReport {
    /// 默认的 CLI 友好格式
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(col)) => {
                write!(f, "[{}:{}] {} error: {}", line, col, self.phase, self.message)
            }
            _ => write!(f, "[{}] {} error: {}", self.phase, self.phase, self.message),
        }
    }
}

impl ErrorReport {
    /// 转换为 JSON 格式（Web API 使用）
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 简洁格式（适合终端）
    pub fn to_short(&self) -> String {
        format!("{}: {}", self.phase, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxxlex_core::{InvalidReason, SourcePosition, SourceSpan};

    fn lexer_error() -> LexerError {
        let start = SourcePosition::new(100, 10, 5, 4);
        let end = SourcePosition::new(101, 10, 6, 5);
        LexerError::at(
            InvalidReason::UnrecognizedCharacter,
            SourceSpan::range(start, end),
            "@",
        )
    }

    #[test]
    fn test_invalid_tokens_line_column() {
        let err = CxxlexError::InvalidTokens {
            count: 3,
            first: lexer_error(),
        };

        assert_eq!(err.line(), Some(10));
        assert_eq!(err.column(), Some(5));
        assert_eq!(err.phase(), "lexer");
        assert!(err.to_string().contains("3 invalid token(s)"));
    }

    #[test]
    fn test_io_error() {
        let err = CxxlexError::Io {
            path: PathBuf::from("missing.cpp"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.line(), None);
        assert_eq!(err.phase(), "io");
        assert!(err.to_string().contains("missing.cpp"));

        let report = err.to_report();
        assert_eq!(report.error_kind, "NotFound");
        assert_eq!(
            report.details,
            Some(ErrorDetails::File {
                path: "missing.cpp".to_string()
            })
        );
    }

    #[test]
    fn test_config_error_has_location() {
        let source = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err = CxxlexError::Config {
            path: PathBuf::from("cxxlex.json"),
            source,
        };
        assert_eq!(err.phase(), "config");
        assert_eq!(err.line(), Some(2));
        assert!(err.column().is_some());
    }

    #[test]
    fn test_render_error_from() {
        let json_err = serde_json::from_str::<u32>("x").unwrap_err();
        let err: CxxlexError = json_err.into();
        assert_eq!(err.phase(), "render");
        assert_eq!(err.to_report().details, None);
    }

    #[test]
    fn test_invalid_tokens_report() {
        let err = CxxlexError::InvalidTokens {
            count: 2,
            first: lexer_error(),
        };
        let report = err.to_report();
        assert_eq!(report.phase, "lexer");
        assert_eq!(report.error_kind, "UnrecognizedCharacter");
        assert!(report.message.contains("Unrecognized character '@'"));
        assert_eq!(report.details, Some(ErrorDetails::InvalidTokens { count: 2 }));
    }

    #[test]
    fn test_error_report_display_with_location() {
        let report = ErrorReport {
            phase: "lexer",
            line: Some(10),
            column: Some(5),
            error_kind: "UnterminatedLiteral".to_string(),
            message: "Unterminated literal starting at 10:5".to_string(),
            details: None,
        };

        let display = format!("{}", report);
        assert!(display.contains("[10:5]"));
        assert!(display.contains("lexer"));
        assert!(display.contains("Unterminated literal"));
    }

    #[test]
    fn test_error_report_display_without_location() {
        let report = ErrorReport {
            phase: "io",
            line: None,
            column: None,
            error_kind: "NotFound".to_string(),
            message: "cannot read".to_string(),
            details: None,
        };

        let display = format!("{}", report);
        assert!(display.contains("[io]"));
        assert!(display.contains("io error"));
        assert_eq!(report.to_short(), "io: cannot read");
    }

    #[test]
    fn test_error_report_to_json() {
        let report = ErrorReport {
            phase: "lexer",
            line: Some(1),
            column: Some(2),
            error_kind: "UnrecognizedCharacter".to_string(),
            message: "Unrecognized character '\"' at 1:2".to_string(),
            details: Some(ErrorDetails::InvalidTokens { count: 1 }),
        };

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["phase"], "lexer");
        assert_eq!(json["line"], 1);
        assert_eq!(json["message"], "Unrecognized character '\"' at 1:2");
        assert_eq!(json["details"]["type"], "invalid_tokens");
        assert_eq!(json["details"]["count"], 1);
    }
}
