//! 源代码位置追踪
//!
//! 支持多坐标系统，满足不同场景需求：
//! - line/column: 人类可读的诊断显示（1-based）
//! - offset: 字节偏移，用于切片和文件跳转（0-based）
//! - utf16_column: LSP协议通信（0-based，UTF-16单元）

use serde::Serialize;

/// 源代码位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourcePosition {
    /// 字节偏移，0-based，UTF-8编码
    pub offset: usize,
    /// 行号，1-based
    pub line: usize,
    /// 列号，1-based，Unicode码点计数
    pub column: usize,
    /// 行内UTF-16偏移，0-based，用于LSP Position.character
    pub utf16_column: usize,
}

impl SourcePosition {
    pub fn new(offset: usize, line: usize, column: usize, utf16_column: usize) -> Self {
        Self {
            offset,
            line,
            column,
            utf16_column,
        }
    }

    /// 文件起始位置
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
            utf16_column: 0,
        }
    }

    /// 前进一个字符
    ///
    /// `\n` 换行并重置列号；`\r` 与其他字符一样只推进列号，
    /// 因此 `\r\n` 只计为一次换行。
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.utf16_column = 0;
        } else {
            self.column += 1;
            self.utf16_column += c.len_utf16();
        }

        self.offset += c.len_utf8();
    }
}

/// 源代码区间（半开区间 `[start, end)`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceSpan {
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    /// 零长度区间（仅用于输入末尾的合成 token）
    pub fn at(pos: SourcePosition) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn range(start: SourcePosition, end: SourcePosition) -> Self {
        Self { start, end }
    }

    /// 字节长度
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
