//! 字符流抽象
//!
//! 包装完整的输入缓冲区，提供字符级预读、消费与位置追踪。
//! 多字节UTF-8字符总是整体推进，字面量内容只作为不透明的字节区间截取。

use super::position::SourcePosition;
use tracing::trace;

/// 字符流
pub struct CharStream<'src> {
    /// 不可变的输入缓冲区
    source: &'src str,
    /// 当前位置
    position: SourcePosition,
}

impl<'src> CharStream<'src> {
    pub fn new(source: &'src str) -> Self {
        trace!(target: "cxxlex::scanner", bytes = source.len(), "Creating char stream");
        Self {
            source,
            position: SourcePosition::start(),
        }
    }

    /// 获取当前位置
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// 记录当前位置，用于之后截取区间
    pub fn mark(&self) -> SourcePosition {
        self.position
    }

    /// 从 `start` 到当前位置的源文本
    pub fn slice_from(&self, start: SourcePosition) -> &'src str {
        &self.source[start.offset..self.position.offset]
    }

    /// 尚未消费的输入
    pub fn remaining(&self) -> &'src str {
        &self.source[self.position.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    /// 预读第n个字符（不消费），越过末尾返回 None
    pub fn peek(&self, offset: usize) -> Option<char> {
        let mut chars = self.remaining().chars();
        if offset == 0 {
            chars.next()
        } else {
            chars.nth(offset)
        }
    }

    /// 读取并消费一个字符
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.position.advance(c);
        Some(c)
    }

    /// 消费n个字符，返回实际消费的数量
    pub fn advance_n(&mut self, n: usize) -> usize {
        let mut consumed = 0;
        while consumed < n && self.advance().is_some() {
            consumed += 1;
        }
        consumed
    }

    /// 消费剩余输入的前 `len` 个字节（`len` 必须落在字符边界上）
    pub fn advance_bytes(&mut self, len: usize) {
        let target = self.position.offset + len;
        while self.position.offset < target && self.advance().is_some() {}
    }

    /// 消费满足条件的最长前缀，返回消费的字符数
    pub fn advance_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(char) -> bool,
    {
        let mut consumed = 0;
        while let Some(c) = self.peek(0) {
            if !predicate(c) {
                break;
            }
            self.position.advance(c);
            consumed += 1;
        }
        consumed
    }

    /// 检查当前字符是否匹配（不消费）
    pub fn check(&self, expected: char) -> bool {
        self.peek(0) == Some(expected)
    }

    /// 检查剩余输入是否以 `prefix` 开头（不消费）
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// 消费当前字符如果匹配
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}
