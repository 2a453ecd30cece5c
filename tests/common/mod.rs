//! 测试辅助工具
//!
//! 提供端到端测试的辅助函数

#![allow(dead_code)]

use cxxlex::{tokenize, Directive, LexReport, RunConfig, TokenKind};

/// 完整的 C++ 示例源码
pub const SHOWCASE: &str = include_str!("../fixtures/showcase.cpp");

/// 使用默认配置切分
pub fn lex(source: &str) -> LexReport {
    tokenize(source, &RunConfig::default())
}

/// 统计满足条件的 token 数量
pub fn count_kind(report: &LexReport, pred: impl Fn(&TokenKind) -> bool) -> usize {
    report.tokens.iter().filter(|t| pred(&t.kind)).count()
}

pub fn count_directive(report: &LexReport, directive: Directive) -> usize {
    count_kind(report, |k| {
        matches!(k, TokenKind::PreprocessorDirective { directive: d } if *d == directive)
    })
}

/// 写入临时文件，返回其路径
pub fn temp_file(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("cxxlex-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}
