//! 测试辅助工具
//!
//! 提供词法分析集成测试的辅助函数

#![allow(dead_code)]

use cxxlex_core::{tokenize, Token, TokenKind};

/// 切分输入并检查基本不变量（无损、全覆盖、唯一 EOF）
///
/// # Example
/// ```
/// let tokens = lex_checked("int x;");
/// assert_eq!(tokens.len(), 5);
/// ```
pub fn lex_checked(source: &str) -> Vec<Token> {
    let tokens = tokenize(source);
    assert_round_trip(source, &tokens);
    assert_contiguous(source, &tokens);
    assert_single_eof(&tokens);
    tokens
}

/// 拼接所有 token 文本
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

pub fn assert_round_trip(source: &str, tokens: &[Token]) {
    assert_eq!(reconstruct(tokens), source, "token texts must reproduce the input");
}

/// 相邻 token 首尾相接；只有末尾的合成 token 长度为零
pub fn assert_contiguous(source: &str, tokens: &[Token]) {
    let mut offset = 0;
    for token in tokens {
        assert_eq!(token.span.start.offset, offset, "gap before {:?}", token);
        let synthetic = token.is_eof() || (token.kind.is_invalid() && token.text.is_empty());
        if synthetic {
            assert_eq!(token.span.start.offset, source.len());
            assert!(token.span.is_empty());
        } else {
            assert!(!token.span.is_empty(), "empty span for {:?}", token);
        }
        assert_eq!(&source[token.span.start.offset..token.span.end.offset], token.text);
        offset = token.span.end.offset;
    }
}

pub fn assert_single_eof(tokens: &[Token]) {
    assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);
    assert!(tokens.last().is_some_and(Token::is_eof), "EndOfFile must be last");
}

/// 非空白、非 EOF 的 token：(种类, 文本)
pub fn significant(source: &str) -> Vec<(TokenKind, String)> {
    lex_checked(source)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Whitespace && !t.is_eof())
        .map(|t| (t.kind, t.text))
        .collect()
}

/// 只取种类名称，便于整体比较
pub fn kind_names(source: &str) -> Vec<&'static str> {
    significant(source)
        .iter()
        .map(|(kind, _)| kind.name())
        .collect()
}

pub fn invalid_tokens(tokens: &[Token]) -> Vec<&Token> {
    tokens.iter().filter(|t| t.kind.is_invalid()).collect()
}
