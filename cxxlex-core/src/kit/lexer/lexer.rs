//! Lexer 主入口
//!
//! 把分类器包装成惰性、只进、有限的 token 序列：
//! 源文本耗尽后先输出（可选的）条件配平汇总，再输出唯一的 `EndOfFile`。
//!
//! # 示例
//!
//! ```rust
//! use cxxlex_core::kit::lexer::Lexer;
//!
//! let tokens = Lexer::new("int x = 0x2A;").tokenize();
//! assert!(tokens.last().unwrap().is_eof());
//! assert!(tokens.iter().all(|t| !t.kind.is_invalid()));
//! ```

use std::iter::FusedIterator;

use cxxlex_config::LexerConfig;
use tracing::{debug, trace, warn};

use super::classifier::Classifier;
use super::conditional::ConditionalTracker;
use super::core::{CharStream, SourcePosition, SourceSpan};
use super::token::{Token, TokenKind};

/// C++ Lexer
pub struct Lexer<'src> {
    classifier: Classifier,
    stream: CharStream<'src>,
    summary_emitted: bool,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// 使用默认配置创建 Lexer
    pub fn new(source: &'src str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &'src str, config: LexerConfig) -> Self {
        trace!(target: "cxxlex::lexer", bytes = source.len(), "Creating new Lexer");
        Self {
            classifier: Classifier::new(config),
            stream: CharStream::new(source),
            summary_emitted: false,
            finished: false,
        }
    }

    /// 获取下一个 Token；`EndOfFile` 之后返回 None
    pub fn next_token(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        trace!(target: "cxxlex::lexer", "Requesting next token");

        if let Some(token) = self.classifier.next_token(&mut self.stream) {
            self.report(&token);
            return Some(token);
        }

        let end = SourceSpan::at(self.stream.position());

        if !self.summary_emitted {
            self.summary_emitted = true;
            if let Some(reason) = self.classifier.conditional_summary() {
                let token = Token::new(TokenKind::Invalid { reason }, end, "");
                self.report(&token);
                return Some(token);
            }
        }

        trace!(target: "cxxlex::lexer", offset = end.start.offset, "Reached end of input");
        self.finished = true;
        Some(Token::new(TokenKind::EndOfFile, end, ""))
    }

    /// 消费整个序列
    pub fn tokenize(self) -> Vec<Token> {
        self.collect()
    }

    /// 条件编译追踪状态
    pub fn conditionals(&self) -> &ConditionalTracker {
        self.classifier.conditionals()
    }

    /// 当前扫描位置
    pub fn position(&self) -> SourcePosition {
        self.stream.position()
    }

    fn report(&self, token: &Token) {
        debug!(
            target: "cxxlex::lexer",
            kind = token.kind.name(),
            text = ?token.text,
            line = token.span.start.line,
            column = token.span.start.column,
            "Produced token"
        );
        if let Some(reason) = token.kind.invalid_reason() {
            warn!(
                target: "cxxlex::lexer",
                line = token.span.start.line,
                column = token.span.start.column,
                %reason,
                "Invalid token"
            );
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

impl FusedIterator for Lexer<'_> {}
