//! cxxlex Lexer
//!
//! 无损的 C++ 词法分析器，设计目标：
//! - 无损：所有 token 文本按顺序拼接即为原始输入
//! - 完全：任何输入都能切分，非法输入变成 `Invalid` token
//! - IDE友好：精准位置追踪，LSP协议兼容

pub mod classifier;
pub mod conditional;
pub mod core;
pub mod error;
pub mod lexer;
pub mod tables;
pub mod token;

pub use classifier::Classifier;
pub use conditional::{ConditionalTracker, OpenConditional};
pub use self::core::{CharStream, SourcePosition, SourceSpan};
pub use error::{InvalidReason, LexerError};
pub use lexer::Lexer;
pub use token::{Directive, Encoding, Radix, Token, TokenKind};

use cxxlex_config::LexerConfig;

/// 使用默认配置切分整个输入
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}

/// 使用指定配置切分整个输入
pub fn tokenize_with(source: &str, config: LexerConfig) -> Vec<Token> {
    Lexer::with_config(source, config).tokenize()
}
