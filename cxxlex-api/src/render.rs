//! 输出渲染
//!
//! - JSON Lines：每个 token 一条记录，种类字段平铺到记录顶层
//! - 表格：对齐的 `行:列  种类  文本`
//! - 摘要：按种类计数加诊断列表

use std::fmt::Write as _;

use cxxlex_config::{OutputConfig, OutputFormat};
use cxxlex_core::{SourcePosition, Token, TokenKind};
use serde::Serialize;
use tracing::debug;

use crate::error::CxxlexError;
use crate::types::LexReport;

/// 表格中文本列的最大字符数
const TABLE_TEXT_WIDTH: usize = 48;

#[derive(Serialize)]
struct TokenRecord<'a> {
    #[serde(flatten)]
    kind: &'a TokenKind,
    text: &'a str,
    start: SourcePosition,
    end: SourcePosition,
}

/// 每个 token 一行 JSON
pub fn to_json_lines<'a>(
    tokens: impl IntoIterator<Item = &'a Token>,
) -> Result<String, CxxlexError> {
    let mut out = String::new();
    for token in tokens {
        let record = TokenRecord {
            kind: &token.kind,
            text: &token.text,
            start: token.span.start,
            end: token.span.end,
        };
        out.push_str(&serde_json::to_string(&record)?);
        out.push('\n');
    }
    Ok(out)
}

/// 人类可读的对齐表格
pub fn to_table<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut out = String::new();
    for token in tokens {
        let position = format!("{}:{}", token.span.start.line, token.span.start.column);
        let _ = writeln!(
            out,
            "{:<9} {:<17} {}",
            position,
            describe_kind(&token.kind),
            clip(&token.text)
        );
    }
    out
}

/// 按种类计数和诊断列表
pub fn to_summary(report: &LexReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "tokens: {}", report.tokens.len());
    for (kind, count) in report.counts() {
        let _ = writeln!(out, "  {:<17} {}", kind, count);
    }
    let _ = writeln!(out, "diagnostics: {}", report.diagnostics.len());
    for diagnostic in &report.diagnostics {
        let _ = writeln!(out, "  {}", diagnostic.message);
    }
    out
}

/// 按输出配置渲染
pub fn render(report: &LexReport, output: &OutputConfig) -> Result<String, CxxlexError> {
    debug!(
        target: "cxxlex::api",
        format = output.format.as_str(),
        skip_trivia = output.skip_trivia,
        "Rendering report"
    );
    let tokens = report
        .tokens
        .iter()
        .filter(|t| !(output.skip_trivia && t.kind.is_trivia()));

    match output.format {
        OutputFormat::Json => to_json_lines(tokens),
        OutputFormat::Table => Ok(to_table(tokens)),
        OutputFormat::Summary => Ok(to_summary(report)),
    }
}

/// 种类名称，带上区分性的属性
fn describe_kind(kind: &TokenKind) -> String {
    match kind {
        TokenKind::IntegerLiteral { radix, suffix } => match suffix {
            Some(suffix) => format!("integer/{}/{}", radix.value(), suffix),
            None => format!("integer/{}", radix.value()),
        },
        TokenKind::FloatLiteral {
            suffix: Some(suffix),
        } => format!("float/{}", suffix),
        TokenKind::CharLiteral { encoding } | TokenKind::StringLiteral { encoding, .. }
            if !encoding.prefix().is_empty() =>
        {
            format!("{}/{}", kind.name(), encoding.prefix())
        }
        TokenKind::PreprocessorDirective { directive } => format!("#{}", directive.as_str()),
        TokenKind::Invalid { reason } => format!("invalid/{:?}", reason),
        other => other.name().to_string(),
    }
}

fn clip(text: &str) -> String {
    let escaped: String = text.escape_debug().collect();
    if escaped.chars().count() <= TABLE_TEXT_WIDTH {
        escaped
    } else {
        let head: String = escaped.chars().take(TABLE_TEXT_WIDTH - 3).collect();
        format!("{}...", head)
    }
}
