//! API 类型定义
//!
//! 词法分析的输出类型。

use std::collections::BTreeMap;

use cxxlex_core::kit::lexer::OpenConditional;
use cxxlex_core::{LexerError, SourceSpan, Token};
use serde::Serialize;

/// 一次词法分析的完整结果
#[derive(Debug, Clone, Serialize)]
pub struct LexReport {
    /// 全部 token（含空白、注释和末尾的 EndOfFile）
    pub tokens: Vec<Token>,
    /// 每个 `Invalid` token 对应的诊断，按出现顺序
    pub diagnostics: Vec<LexerError>,
    /// 输入末尾仍未关闭的条件组
    pub unclosed_conditionals: Vec<OpenConditional>,
    /// 游离的 `#elif`/`#else`/`#endif`
    pub stray_conditionals: Vec<SourceSpan>,
}

impl LexReport {
    pub fn has_invalid(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn invalid_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// 非空白、非注释的 token
    pub fn significant(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(|t| !t.kind.is_trivia())
    }

    /// 按种类名称统计 token 数量
    pub fn counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for token in &self.tokens {
            *counts.entry(token.kind.name()).or_insert(0) += 1;
        }
        counts
    }

    /// 拼接所有 token 文本，应与输入完全一致
    pub fn reconstruct(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}
