//! Token 类型定义
//!
//! `TokenKind` 是封闭的和类型；`Token` 是不可变值，持有自己的源文本副本。

use serde::Serialize;

use super::core::{SourcePosition, SourceSpan};
use super::error::InvalidReason;

/// 整数字面量的进制
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    pub fn value(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    pub fn is_digit(self, c: char) -> bool {
        c.is_digit(self.value())
    }
}

impl From<Radix> for u32 {
    fn from(radix: Radix) -> Self {
        radix.value()
    }
}

/// 字符/字符串字面量的编码前缀
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// 无前缀
    Ordinary,
    /// `u8`
    Utf8,
    /// `u`
    Utf16,
    /// `U`
    Utf32,
    /// `L`
    Wide,
}

impl Encoding {
    /// 按最长优先排列的前缀表（`u8` 必须在 `u` 之前）
    pub const PREFIXES: [(&'static str, Encoding); 4] = [
        ("u8", Encoding::Utf8),
        ("u", Encoding::Utf16),
        ("U", Encoding::Utf32),
        ("L", Encoding::Wide),
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Encoding::Ordinary => "",
            Encoding::Utf8 => "u8",
            Encoding::Utf16 => "u",
            Encoding::Utf32 => "U",
            Encoding::Wide => "L",
        }
    }
}

/// 预处理指令
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Directive {
    Include,
    Define,
    Undef,
    If,
    Ifdef,
    Ifndef,
    Elif,
    Elifdef,
    Elifndef,
    Else,
    Endif,
    Pragma,
    Error,
    Warning,
    Line,
    /// 单独一个 `#` 的空指令
    Null,
}

impl Directive {
    pub fn as_str(self) -> &'static str {
        match self {
            Directive::Include => "include",
            Directive::Define => "define",
            Directive::Undef => "undef",
            Directive::If => "if",
            Directive::Ifdef => "ifdef",
            Directive::Ifndef => "ifndef",
            Directive::Elif => "elif",
            Directive::Elifdef => "elifdef",
            Directive::Elifndef => "elifndef",
            Directive::Else => "else",
            Directive::Endif => "endif",
            Directive::Pragma => "pragma",
            Directive::Error => "error",
            Directive::Warning => "warning",
            Directive::Line => "line",
            Directive::Null => "",
        }
    }

    /// 是否开启一个条件组
    pub fn opens_conditional(self) -> bool {
        matches!(self, Directive::If | Directive::Ifdef | Directive::Ifndef)
    }

    /// 是否是条件组中间的分支
    pub fn continues_conditional(self) -> bool {
        matches!(
            self,
            Directive::Elif | Directive::Elifdef | Directive::Elifndef | Directive::Else
        )
    }
}

/// Token 种类
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    Identifier,
    Keyword,
    /// `and`、`bitor` 等关键字拼写的运算符，不与符号形式归一化
    AlternativeToken,
    IntegerLiteral {
        radix: Radix,
        suffix: Option<String>,
    },
    FloatLiteral {
        suffix: Option<String>,
    },
    CharLiteral {
        encoding: Encoding,
    },
    StringLiteral {
        encoding: Encoding,
        raw: bool,
    },
    Operator,
    Punctuator,
    PreprocessorDirective {
        directive: Directive,
    },
    Comment {
        block: bool,
    },
    /// 完整的 `[[ ... ]]`
    Attribute,
    Whitespace,
    EndOfFile,
    Invalid {
        reason: InvalidReason,
    },
}

impl TokenKind {
    /// 简短名称，用于表格输出和统计
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::AlternativeToken => "alternative-token",
            TokenKind::IntegerLiteral { .. } => "integer",
            TokenKind::FloatLiteral { .. } => "float",
            TokenKind::CharLiteral { .. } => "char",
            TokenKind::StringLiteral { raw: true, .. } => "raw-string",
            TokenKind::StringLiteral { .. } => "string",
            TokenKind::Operator => "operator",
            TokenKind::Punctuator => "punctuator",
            TokenKind::PreprocessorDirective { .. } => "directive",
            TokenKind::Comment { .. } => "comment",
            TokenKind::Attribute => "attribute",
            TokenKind::Whitespace => "whitespace",
            TokenKind::EndOfFile => "eof",
            TokenKind::Invalid { .. } => "invalid",
        }
    }

    /// 空白与注释
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment { .. })
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TokenKind::Invalid { .. })
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral { .. }
                | TokenKind::FloatLiteral { .. }
                | TokenKind::CharLiteral { .. }
                | TokenKind::StringLiteral { .. }
        )
    }

    pub fn invalid_reason(&self) -> Option<&InvalidReason> {
        match self {
            TokenKind::Invalid { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Token 结构
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: SourceSpan,
    /// 原始文本（逐字节，包括空白与注释）
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, span: SourceSpan, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }

    pub fn start(&self) -> SourcePosition {
        self.span.start
    }

    pub fn end(&self) -> SourcePosition {
        self.span.end
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }
}
