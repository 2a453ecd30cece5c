//! CLI 格式化输出
//!
//! 提供命令行友好的错误显示和源码上下文打印。

use std::fmt::Write as _;

use cxxlex_api::{CxxlexError, LexerError};

/// 错误行前后显示的上下文行数
const CONTEXT_LINES: usize = 2;

/// 打印错误并显示源代码上下文
pub fn print_error_with_source(e: &CxxlexError, source: &str) {
    eprintln!("error: {}", e);

    if let (Some(line), Some(column)) = (e.line(), e.column()) {
        eprint!("{}", source_context(source, line, column));
    }
}

/// 打印一条词法诊断及其源码位置
pub fn print_diagnostic(diagnostic: &LexerError, source: &str) {
    eprintln!("warning: {}", diagnostic);
    eprint!(
        "{}",
        source_context(source, diagnostic.line(), diagnostic.column())
    );
}

/// 源代码上下文（显示错误行前后几行，并用 `^` 标出列）
///
/// 行号越界时返回空字符串，例如文件末尾的零长度 token。
pub fn source_context(source: &str, error_line: usize, error_col: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();

    if error_line == 0 || error_line > total_lines {
        return String::new();
    }

    let start_line = error_line.saturating_sub(CONTEXT_LINES).max(1);
    let end_line = (error_line + CONTEXT_LINES).min(total_lines);
    let width = end_line.to_string().len();
    let separator = "-".repeat(width + 1);

    let mut out = String::new();
    let _ = writeln!(out, "{}|--", separator);
    for line_idx in start_line..=end_line {
        let _ = writeln!(out, "{:>width$} | {}", line_idx, lines[line_idx - 1]);
        if line_idx == error_line {
            // 列号按字符计，制表符原样保留以便对齐
            let marker: String = lines[line_idx - 1]
                .chars()
                .take(error_col.saturating_sub(1))
                .map(|c| if c == '\t' { '\t' } else { ' ' })
                .collect();
            let _ = writeln!(out, "{:width$} | {}^", "", marker);
        }
    }
    let _ = writeln!(out, "{}|--", separator);
    out
}
