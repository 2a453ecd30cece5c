//! Lexer 诊断类型
//!
//! 词法分析从不失败：非法输入变成 `Invalid` token。
//! `LexerError` 是从这些 token 构建出的结构化诊断，包含原因、区间和详细消息。

use serde::Serialize;

use super::core::SourceSpan;
use super::token::Token;

/// `Invalid` token 的原因
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum InvalidReason {
    #[error("unterminated literal")]
    UnterminatedLiteral,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("malformed raw string delimiter")]
    MalformedRawStringDelimiter,
    #[error("unbalanced attribute brackets")]
    UnbalancedAttributeBrackets,
    #[error("unbalanced preprocessor conditional ({unclosed} unclosed, {stray} stray)")]
    UnbalancedPreprocessorConditional { unclosed: usize, stray: usize },
    #[error("unrecognized character")]
    UnrecognizedCharacter,
    #[error("unknown preprocessor directive")]
    UnknownDirective,
    #[error("empty character literal")]
    EmptyCharacterLiteral,
}

/// 词法诊断，包含结构化信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexerError {
    /// 错误类型
    pub kind: InvalidReason,
    /// 出错 token 的区间
    pub span: SourceSpan,
    /// 详细错误消息
    pub message: String,
}

impl LexerError {
    /// 在指定区间创建诊断，`text` 是出错 token 的源文本
    pub fn at(kind: InvalidReason, span: SourceSpan, text: &str) -> Self {
        let message = Self::format_message(&kind, span, text);
        Self {
            kind,
            span,
            message,
        }
    }

    /// 从 `Invalid` token 构建诊断；其他 token 返回 None
    pub fn from_token(token: &Token) -> Option<Self> {
        let reason = token.kind.invalid_reason()?;
        Some(Self::at(reason.clone(), token.span, &token.text))
    }

    /// 获取行号（1-based）
    pub fn line(&self) -> usize {
        self.span.start.line
    }

    /// 获取列号（1-based）
    pub fn column(&self) -> usize {
        self.span.start.column
    }

    fn format_message(kind: &InvalidReason, span: SourceSpan, text: &str) -> String {
        let line = span.start.line;
        let column = span.start.column;
        match kind {
            InvalidReason::UnrecognizedCharacter => {
                format!("Unrecognized character '{}' at {}:{}", text.escape_debug(), line, column)
            }
            InvalidReason::UnterminatedLiteral => {
                format!("Unterminated literal starting at {}:{}", line, column)
            }
            InvalidReason::UnterminatedComment => {
                format!("Unterminated block comment starting at {}:{}", line, column)
            }
            InvalidReason::MalformedRawStringDelimiter => {
                format!(
                    "Malformed or unmatched raw string delimiter at {}:{}",
                    line, column
                )
            }
            InvalidReason::UnbalancedAttributeBrackets => {
                format!("Unbalanced attribute brackets starting at {}:{}", line, column)
            }
            InvalidReason::UnknownDirective => {
                let name = text.lines().next().unwrap_or_default().trim();
                format!("Unknown preprocessor directive '{}' at {}:{}", name, line, column)
            }
            InvalidReason::EmptyCharacterLiteral => {
                format!("Empty character literal at {}:{}", line, column)
            }
            InvalidReason::UnbalancedPreprocessorConditional { unclosed, stray } => {
                format!(
                    "Unbalanced preprocessor conditionals at end of input: {} unclosed, {} stray",
                    unclosed, stray
                )
            }
        }
    }
}

impl std::fmt::Display for LexerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}:{}] {}", self.line(), self.column(), self.kind)
    }
}

impl std::error::Error for LexerError {}
