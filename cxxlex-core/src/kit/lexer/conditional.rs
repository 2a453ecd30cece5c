//! 预处理条件嵌套追踪
//!
//! 只校验 `#if`/`#ifdef`/`#ifndef` ... `#endif` 是否配平，
//! 不求值条件，也不抑制非活动分支中的 token。

use serde::Serialize;

use super::core::SourceSpan;
use super::error::InvalidReason;
use super::token::Directive;

/// 尚未关闭的条件组
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenConditional {
    /// 开启该组的指令
    pub directive: Directive,
    /// 开启指令的区间
    pub span: SourceSpan,
    /// 是否已经出现过 `#else`
    pub seen_else: bool,
}

/// 条件组栈 + 游离指令列表
#[derive(Debug, Clone, Default)]
pub struct ConditionalTracker {
    stack: Vec<OpenConditional>,
    stray: Vec<SourceSpan>,
}

impl ConditionalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条指令；与条件无关的指令被忽略
    pub fn record(&mut self, directive: Directive, span: SourceSpan) {
        match directive {
            d if d.opens_conditional() => self.stack.push(OpenConditional {
                directive: d,
                span,
                seen_else: false,
            }),
            Directive::Else => match self.stack.last_mut() {
                Some(top) if !top.seen_else => top.seen_else = true,
                _ => self.stray.push(span),
            },
            d if d.continues_conditional() => match self.stack.last() {
                Some(top) if !top.seen_else => {}
                _ => self.stray.push(span),
            },
            Directive::Endif => {
                if self.stack.pop().is_none() {
                    self.stray.push(span);
                }
            }
            _ => {}
        }
    }

    /// 当前嵌套深度
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// 仍未关闭的条件组（由外到内）
    pub fn unclosed(&self) -> &[OpenConditional] {
        &self.stack
    }

    /// 没有匹配 `#if` 的 `#elif`/`#else`/`#endif`，以及重复的 `#else`
    pub fn stray(&self) -> &[SourceSpan] {
        &self.stray
    }

    pub fn is_balanced(&self) -> bool {
        self.stack.is_empty() && self.stray.is_empty()
    }

    /// 输入末尾的汇总诊断；配平时返回 None
    pub fn summary(&self) -> Option<InvalidReason> {
        if self.is_balanced() {
            None
        } else {
            Some(InvalidReason::UnbalancedPreprocessorConditional {
                unclosed: self.stack.len(),
                stray: self.stray.len(),
            })
        }
    }
}
