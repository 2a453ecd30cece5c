//! C++ Token 分类器
//!
//! 每次调用从流的当前位置切出恰好一个 token，按固定优先级分发：
//! 空白 → 注释 → 预处理指令 → 原始字符串 → 带前缀的字符/字符串 →
//! 数字 → 标识符/关键字 → 属性 → 运算符/标点 → 非法字符。
//!
//! 分类器从不失败：非法输入产出 `Invalid` token，扫描从其后继续。

use cxxlex_config::LexerConfig;
use tracing::{debug, trace};

use super::conditional::ConditionalTracker;
use super::core::{CharStream, SourceSpan};
use super::error::InvalidReason;
use super::tables::{self, SymbolClass};
use super::token::{Directive, Encoding, Radix, Token, TokenKind};

/// 原始字符串分隔符的最大长度
const MAX_RAW_DELIMITER_LEN: usize = 16;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// C++ 分类器
pub struct Classifier {
    config: LexerConfig,
    /// 当前位置是否是逻辑行的第一个非空白位置
    at_line_start: bool,
    conditionals: ConditionalTracker,
}

impl Classifier {
    pub fn new(config: LexerConfig) -> Self {
        trace!(target: "cxxlex::classifier", ?config, "Creating new Classifier");
        Self {
            config,
            at_line_start: true,
            conditionals: ConditionalTracker::new(),
        }
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn conditionals(&self) -> &ConditionalTracker {
        &self.conditionals
    }

    /// 输入末尾的条件配平诊断；关闭追踪时总是 None
    pub fn conditional_summary(&self) -> Option<InvalidReason> {
        if self.config.track_conditionals {
            self.conditionals.summary()
        } else {
            None
        }
    }

    /// 切出下一个 token；输入耗尽时返回 None
    pub fn next_token(&mut self, stream: &mut CharStream) -> Option<Token> {
        if stream.is_eof() {
            return None;
        }

        let start = stream.mark();
        let kind = self.scan(stream);
        let text = stream.slice_from(start);
        let span = SourceSpan::range(start, stream.position());

        self.update_line_start(&kind, text);
        if let TokenKind::PreprocessorDirective { directive } = kind {
            if self.config.track_conditionals {
                self.conditionals.record(directive, span);
            }
        }

        trace!(
            target: "cxxlex::classifier",
            kind = kind.name(),
            line = start.line,
            column = start.column,
            len = span.len(),
            "Classified token"
        );
        Some(Token::new(kind, span, text))
    }

    fn scan(&mut self, stream: &mut CharStream) -> TokenKind {
        let Some(c) = stream.peek(0) else {
            return TokenKind::EndOfFile;
        };

        match c {
            // 文件开头的 BOM 单独成为空白 token，不影响行首判断
            BYTE_ORDER_MARK if stream.position().offset == 0 => {
                stream.advance();
                TokenKind::Whitespace
            }
            c if is_whitespace(c) => self.scan_whitespace(stream),
            '\\' if is_line_splice(stream) => self.scan_whitespace(stream),

            '/' if stream.starts_with("//") => self.scan_line_comment(stream),
            '/' if stream.starts_with("/*") => self.scan_block_comment(stream),

            '#' if self.at_line_start && !stream.starts_with("##") => {
                self.scan_directive(stream, 1)
            }
            '%' if self.at_line_start
                && self.config.digraphs
                && stream.starts_with("%:")
                && !stream.starts_with("%:%:") =>
            {
                self.scan_directive(stream, 2)
            }

            '"' => self.scan_quoted(stream, 0, '"', Encoding::Ordinary),
            '\'' => self.scan_quoted(stream, 0, '\'', Encoding::Ordinary),

            '0'..='9' => self.scan_number(stream),
            '.' if stream.peek(1).is_some_and(|n| n.is_ascii_digit()) => {
                self.scan_number(stream)
            }

            c if self.is_identifier_start(c) => match literal_prefix(stream) {
                Some(LiteralPrefix::Raw { encoding, len }) => {
                    self.scan_raw_string(stream, len, encoding)
                }
                Some(LiteralPrefix::Quoted {
                    encoding,
                    len,
                    quote,
                }) => self.scan_quoted(stream, len, quote, encoding),
                None => self.scan_word(stream),
            },

            '[' if stream.starts_with("[[") => self.scan_attribute(stream),

            _ => self.scan_symbol(stream),
        }
    }

    fn update_line_start(&mut self, kind: &TokenKind, text: &str) {
        self.at_line_start = match kind {
            TokenKind::Whitespace => self.at_line_start || has_logical_newline(text),
            // 注释在语义上等同一个空格，跨行的块注释也不开启新行
            TokenKind::Comment { .. } => self.at_line_start,
            _ => false,
        };
    }

    // ==================== 空白与注释 ====================

    fn scan_whitespace(&mut self, stream: &mut CharStream) -> TokenKind {
        loop {
            match stream.peek(0) {
                Some(c) if is_whitespace(c) => {
                    stream.advance();
                }
                Some('\\') if is_line_splice(stream) => consume_line_splice(stream),
                _ => break,
            }
        }
        TokenKind::Whitespace
    }

    fn scan_line_comment(&mut self, stream: &mut CharStream) -> TokenKind {
        skip_line_comment(stream);
        TokenKind::Comment { block: false }
    }

    fn scan_block_comment(&mut self, stream: &mut CharStream) -> TokenKind {
        stream.advance_n(2);
        loop {
            if stream.starts_with("*/") {
                stream.advance_n(2);
                return TokenKind::Comment { block: true };
            }
            if stream.advance().is_none() {
                return TokenKind::Invalid {
                    reason: InvalidReason::UnterminatedComment,
                };
            }
        }
    }

    // ==================== 预处理指令 ====================

    /// 扫描整条逻辑行；`introducer` 是 `#` 或 `%:` 的长度
    fn scan_directive(&mut self, stream: &mut CharStream, introducer: usize) -> TokenKind {
        stream.advance_n(introducer);
        loop {
            match stream.peek(0) {
                Some(c) if is_horizontal_whitespace(c) => {
                    stream.advance();
                }
                Some('\\') if is_line_splice(stream) => consume_line_splice(stream),
                _ => break,
            }
        }

        let name_start = stream.mark();
        let directive = match stream.peek(0) {
            // GCC 行标记：`# 42 "file.cpp"`
            Some(c) if c.is_ascii_digit() => Some(Directive::Line),
            _ => {
                let name = scan_directive_name(stream);
                if name.is_empty() {
                    at_directive_end(stream).then_some(Directive::Null)
                } else {
                    tables::lookup_directive(&name)
                }
            }
        };

        self.scan_directive_body(stream);

        match directive {
            Some(directive) => {
                debug!(
                    target: "cxxlex::classifier",
                    directive = directive.as_str(),
                    line = name_start.line,
                    "Matched preprocessor directive"
                );
                TokenKind::PreprocessorDirective { directive }
            }
            None => TokenKind::Invalid {
                reason: InvalidReason::UnknownDirective,
            },
        }
    }

    /// 指令体延伸到逻辑行末尾（不含换行）
    ///
    /// 字符串/字符字面量（包括跨行的原始字符串）整体跳过，
    /// 块注释被吸收，`//` 注释结束指令。
    fn scan_directive_body(&mut self, stream: &mut CharStream) {
        let mut prev = None;
        loop {
            let Some(c) = stream.peek(0) else {
                break;
            };
            match c {
                '\n' => break,
                '\r' if stream.starts_with("\r\n") => break,
                '\\' if is_line_splice(stream) => consume_line_splice(stream),
                '/' if stream.starts_with("//") => break,
                // 未闭合的块注释留给下一个 token 报告
                '/' if stream.starts_with("/*") => {
                    if !skip_closed_block_comment(stream) {
                        break;
                    }
                }
                'R' | 'u' | 'U' | 'L'
                    if !prev.is_some_and(|p: char| self.is_identifier_continue(p)) =>
                {
                    if skip_prefixed_literal(stream) {
                        prev = Some('"');
                        continue;
                    }
                    stream.advance();
                }
                '"' => skip_quoted_in_line(stream, '"'),
                '\'' if !prev.is_some_and(|p: char| p.is_ascii_alphanumeric()) => {
                    skip_quoted_in_line(stream, '\'')
                }
                _ => {
                    stream.advance();
                }
            }
            prev = Some(c);
        }
    }

    // ==================== 字符与字符串 ====================

    fn scan_raw_string(
        &mut self,
        stream: &mut CharStream,
        prefix_len: usize,
        encoding: Encoding,
    ) -> TokenKind {
        let malformed = TokenKind::Invalid {
            reason: InvalidReason::MalformedRawStringDelimiter,
        };

        match raw_string_extent(stream.remaining(), prefix_len) {
            RawExtent::Closed(end) => {
                stream.advance_bytes(end);
                TokenKind::StringLiteral {
                    encoding,
                    raw: true,
                }
            }
            RawExtent::BadDelimiter(end) => {
                stream.advance_bytes(end);
                malformed
            }
            RawExtent::Unclosed => {
                stream.advance_while(|_| true);
                malformed
            }
        }
    }

    /// 普通字符/字符串字面量；在行尾或输入末尾未闭合时，区间止于换行之前
    fn scan_quoted(
        &mut self,
        stream: &mut CharStream,
        prefix_len: usize,
        quote: char,
        encoding: Encoding,
    ) -> TokenKind {
        stream.advance_n(prefix_len + 1);

        if quote == '\'' && stream.check('\'') {
            stream.advance();
            return TokenKind::Invalid {
                reason: InvalidReason::EmptyCharacterLiteral,
            };
        }

        let unterminated = TokenKind::Invalid {
            reason: InvalidReason::UnterminatedLiteral,
        };
        loop {
            match stream.peek(0) {
                None | Some('\n') => return unterminated,
                Some('\r') if stream.starts_with("\r\n") => return unterminated,
                Some('\\') => {
                    stream.advance();
                    if stream.starts_with("\r\n") {
                        stream.advance_n(2);
                    } else {
                        stream.advance();
                    }
                }
                Some(c) if c == quote => {
                    stream.advance();
                    break;
                }
                Some(_) => {
                    stream.advance();
                }
            }
        }

        if quote == '\'' {
            TokenKind::CharLiteral { encoding }
        } else {
            TokenKind::StringLiteral {
                encoding,
                raw: false,
            }
        }
    }

    // ==================== 数字 ====================

    fn scan_number(&mut self, stream: &mut CharStream) -> TokenKind {
        let start = stream.mark();
        let mut is_float = false;

        let radix = if stream.starts_with("0x") || stream.starts_with("0X") {
            stream.advance_n(2);
            eat_digits(stream, Radix::Hexadecimal);
            if stream.check('.') {
                stream.advance();
                eat_digits(stream, Radix::Hexadecimal);
                is_float = true;
            }
            is_float |= eat_exponent(stream, ['p', 'P']);
            Radix::Hexadecimal
        } else if stream.starts_with("0b") || stream.starts_with("0B") {
            stream.advance_n(2);
            eat_digits(stream, Radix::Binary);
            Radix::Binary
        } else {
            eat_digits(stream, Radix::Decimal);
            if stream.check('.') && stream.peek(1) != Some('.') {
                stream.advance();
                eat_digits(stream, Radix::Decimal);
                is_float = true;
            }
            is_float |= eat_exponent(stream, ['e', 'E']);

            let digits = stream.slice_from(start);
            if !is_float && digits.len() > 1 && digits.starts_with('0') {
                Radix::Octal
            } else {
                Radix::Decimal
            }
        };

        let suffix = self.scan_numeric_suffix(stream, is_float);
        if is_float {
            TokenKind::FloatLiteral { suffix }
        } else {
            TokenKind::IntegerLiteral { radix, suffix }
        }
    }

    /// 标识符延续串是后缀候选；只吸收 `resolve_numeric_suffix` 认可的部分
    fn scan_numeric_suffix(&mut self, stream: &mut CharStream, is_float: bool) -> Option<String> {
        let remaining = stream.remaining();
        let candidate_len = remaining
            .char_indices()
            .find(|&(_, c)| !self.is_identifier_continue(c))
            .map_or(remaining.len(), |(index, _)| index);
        let candidate = &remaining[..candidate_len];

        let taken = tables::resolve_numeric_suffix(candidate, is_float);
        if taken == 0 {
            return None;
        }
        let suffix = &candidate[..taken];
        if taken < candidate.len() {
            trace!(
                target: "cxxlex::classifier",
                suffix,
                rest = &candidate[taken..],
                "Split numeric suffix"
            );
        }
        stream.advance_n(suffix.chars().count());
        Some(suffix.to_string())
    }

    // ==================== 标识符 ====================

    fn scan_word(&mut self, stream: &mut CharStream) -> TokenKind {
        let start = stream.mark();
        stream.advance_while(|c| self.is_identifier_continue(c));
        let word = stream.slice_from(start);

        if tables::is_keyword(word) {
            debug!(target: "cxxlex::classifier", keyword = word, "Matched keyword");
            TokenKind::Keyword
        } else if tables::is_alternative_token(word) {
            debug!(target: "cxxlex::classifier", token = word, "Matched alternative token");
            TokenKind::AlternativeToken
        } else {
            TokenKind::Identifier
        }
    }

    fn is_identifier_start(&self, c: char) -> bool {
        c.is_ascii_alphabetic()
            || c == '_'
            || (c == '$' && self.config.dollar_in_identifiers)
            || (!c.is_ascii() && !c.is_whitespace() && c != BYTE_ORDER_MARK)
    }

    fn is_identifier_continue(&self, c: char) -> bool {
        self.is_identifier_start(c) || c.is_ascii_digit()
    }

    // ==================== 属性 ====================

    /// `[[` 到匹配的 `]]`，平衡嵌套方括号并跳过字面量和注释
    fn scan_attribute(&mut self, stream: &mut CharStream) -> TokenKind {
        let unbalanced = TokenKind::Invalid {
            reason: InvalidReason::UnbalancedAttributeBrackets,
        };

        stream.advance_n(2);
        let mut depth = 2usize;
        let mut prev = Some('[');
        loop {
            let Some(c) = stream.peek(0) else {
                return unbalanced;
            };
            match c {
                '[' => {
                    depth += 1;
                    stream.advance();
                }
                ']' => {
                    depth -= 1;
                    stream.advance();
                    if depth == 1 {
                        // 外层必须紧接着 `]]` 关闭
                        if !stream.match_char(']') {
                            return unbalanced;
                        }
                        return TokenKind::Attribute;
                    }
                }
                '/' if stream.starts_with("//") => skip_line_comment(stream),
                '/' if stream.starts_with("/*") => {
                    if !skip_closed_block_comment(stream) {
                        return unbalanced;
                    }
                }
                '"' => skip_quoted_in_line(stream, '"'),
                '\'' if !prev.is_some_and(|p: char| p.is_ascii_alphanumeric()) => {
                    skip_quoted_in_line(stream, '\'')
                }
                _ => {
                    stream.advance();
                }
            }
            prev = Some(c);
        }
    }

    // ==================== 运算符与标点 ====================

    fn scan_symbol(&mut self, stream: &mut CharStream) -> TokenKind {
        match tables::match_symbol(stream.remaining(), self.config.digraphs) {
            Some(symbol) => {
                stream.advance_n(symbol.text.len());
                match symbol.class {
                    SymbolClass::Operator => TokenKind::Operator,
                    SymbolClass::Punctuator => TokenKind::Punctuator,
                }
            }
            None => {
                let c = stream.advance();
                debug!(target: "cxxlex::classifier", character = ?c, "Unrecognized character");
                TokenKind::Invalid {
                    reason: InvalidReason::UnrecognizedCharacter,
                }
            }
        }
    }
}

/// 字面量前缀识别结果；`len` 是引号之前的字符数
enum LiteralPrefix {
    Raw { encoding: Encoding, len: usize },
    Quoted { encoding: Encoding, len: usize, quote: char },
}

fn literal_prefix(stream: &CharStream) -> Option<LiteralPrefix> {
    let remaining = stream.remaining();

    let (encoding, rest) = Encoding::PREFIXES
        .iter()
        .find_map(|&(prefix, encoding)| {
            let rest = remaining.strip_prefix(prefix)?;
            (rest.starts_with('"') || rest.starts_with('\'') || rest.starts_with("R\""))
                .then_some((encoding, rest))
        })
        .unwrap_or((Encoding::Ordinary, remaining));
    let len = encoding.prefix().len();

    if rest.starts_with("R\"") {
        Some(LiteralPrefix::Raw {
            encoding,
            len: len + 1,
        })
    } else if len > 0 {
        let quote = if rest.starts_with('"') { '"' } else { '\'' };
        Some(LiteralPrefix::Quoted {
            encoding,
            len,
            quote,
        })
    } else {
        None
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

fn is_horizontal_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0B' | '\x0C')
}

fn is_line_splice(stream: &CharStream) -> bool {
    stream.starts_with("\\\n") || stream.starts_with("\\\r\n")
}

fn consume_line_splice(stream: &mut CharStream) {
    if stream.starts_with("\\\r\n") {
        stream.advance_n(3);
    } else {
        stream.advance_n(2);
    }
}

/// 文本中是否有不属于行拼接的换行
fn has_logical_newline(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(index, &b)| {
        if b != b'\n' {
            return false;
        }
        let before = &bytes[..index];
        let before = before.strip_suffix(b"\r").unwrap_or(before);
        !before.ends_with(b"\\")
    })
}

/// 指令名，允许中间出现行拼接（拼接不计入名称）
fn scan_directive_name(stream: &mut CharStream) -> String {
    let mut name = String::new();
    loop {
        match stream.peek(0) {
            Some(c) if c.is_ascii_alphanumeric() || c == '_' => {
                name.push(c);
                stream.advance();
            }
            Some('\\') if !name.is_empty() && is_line_splice(stream) => {
                consume_line_splice(stream)
            }
            _ => break,
        }
    }
    name
}

/// 指令名为空时，行的剩余部分是否只有注释
fn at_directive_end(stream: &CharStream) -> bool {
    stream.is_eof()
        || stream.starts_with("\n")
        || stream.starts_with("\r\n")
        || stream.starts_with("//")
        || stream.starts_with("/*")
}

fn is_raw_delimiter_char(c: char) -> bool {
    !matches!(c, ' ' | '(' | ')' | '\\') && !c.is_control()
}

/// 原始字符串的范围，字节长度从前缀开头算起
enum RawExtent {
    Closed(usize),
    BadDelimiter(usize),
    Unclosed,
}

/// `text` 以前缀（含 `R`）开头，`prefix_len` 是前缀长度
fn raw_string_extent(text: &str, prefix_len: usize) -> RawExtent {
    let open = prefix_len + 1;
    let after = &text[open..];

    // 上限按字符数计，`delimiter_len` 是字节长度
    let mut delimiter_len = 0;
    for (count, c) in after.chars().enumerate() {
        if c == '(' {
            break;
        }
        if !is_raw_delimiter_char(c) || count >= MAX_RAW_DELIMITER_LEN {
            return RawExtent::BadDelimiter(open + delimiter_len);
        }
        delimiter_len += c.len_utf8();
    }
    if !after[delimiter_len..].starts_with('(') {
        return RawExtent::BadDelimiter(open + delimiter_len);
    }

    let closing = format!("){}\"", &after[..delimiter_len]);
    let body_start = open + delimiter_len + 1;
    match text[body_start..].find(&closing) {
        Some(index) => RawExtent::Closed(body_start + index + closing.len()),
        None => RawExtent::Unclosed,
    }
}

/// 消费数字串，`'` 分隔符只能出现在两个数字之间
fn eat_digits(stream: &mut CharStream, radix: Radix) {
    let mut seen_digit = false;
    loop {
        match stream.peek(0) {
            Some(c) if radix.is_digit(c) => {
                stream.advance();
                seen_digit = true;
            }
            Some('\'') if seen_digit && stream.peek(1).is_some_and(|n| radix.is_digit(n)) => {
                stream.advance();
            }
            _ => break,
        }
    }
}

/// 指数部分：标记字符、可选符号、至少一位十进制数字
fn eat_exponent(stream: &mut CharStream, markers: [char; 2]) -> bool {
    let Some(marker) = stream.peek(0) else {
        return false;
    };
    if !markers.contains(&marker) {
        return false;
    }
    let digit_at = match stream.peek(1) {
        Some('+') | Some('-') => 2,
        _ => 1,
    };
    if !stream.peek(digit_at).is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }
    stream.advance_n(digit_at);
    eat_digits(stream, Radix::Decimal);
    true
}

/// 指令体中带前缀的字面量；原始字符串可以跨行
fn skip_prefixed_literal(stream: &mut CharStream) -> bool {
    match literal_prefix(stream) {
        Some(LiteralPrefix::Raw { len, .. }) => match raw_string_extent(stream.remaining(), len) {
            RawExtent::Closed(end) => {
                stream.advance_bytes(end);
                true
            }
            RawExtent::BadDelimiter(_) | RawExtent::Unclosed => false,
        },
        Some(LiteralPrefix::Quoted { len, quote, .. }) => {
            stream.advance_n(len);
            skip_quoted_in_line(stream, quote);
            true
        }
        None => false,
    }
}

/// `//` 到行尾，不含换行；行拼接会延续注释
fn skip_line_comment(stream: &mut CharStream) {
    stream.advance_n(2);
    loop {
        match stream.peek(0) {
            None | Some('\n') => break,
            Some('\r') if stream.starts_with("\r\n") => break,
            Some('\\') if is_line_splice(stream) => consume_line_splice(stream),
            Some(_) => {
                stream.advance();
            }
        }
    }
}

/// 跳过一个已闭合的块注释；未闭合时什么也不消费并返回 false
fn skip_closed_block_comment(stream: &mut CharStream) -> bool {
    match stream.remaining()[2..].find("*/") {
        Some(index) => {
            stream.advance_bytes(index + 4);
            true
        }
        None => false,
    }
}

/// 在单行内跳过一个引号包围的字面量；遇到换行（非转义）即停止
fn skip_quoted_in_line(stream: &mut CharStream, quote: char) {
    stream.advance();
    loop {
        match stream.peek(0) {
            None | Some('\n') => return,
            Some('\r') if stream.starts_with("\r\n") => return,
            Some('\\') => {
                stream.advance();
                if stream.starts_with("\r\n") {
                    stream.advance_n(2);
                } else {
                    stream.advance();
                }
            }
            Some(c) if c == quote => {
                stream.advance();
                return;
            }
            Some(_) => {
                stream.advance();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_with(input: &str, config: LexerConfig) -> Vec<Token> {
        let mut stream = CharStream::new(input);
        let mut classifier = Classifier::new(config);
        let mut tokens = Vec::new();
        while let Some(token) = classifier.next_token(&mut stream) {
            tokens.push(token);
        }
        tokens
    }

    fn collect_tokens(input: &str) -> Vec<Token> {
        collect_with(input, LexerConfig::default())
    }

    /// 去掉空白后的 (kind, text)
    fn significant(input: &str) -> Vec<(TokenKind, String)> {
        collect_tokens(input)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    fn texts(input: &str) -> Vec<String> {
        collect_tokens(input).into_iter().map(|t| t.text).collect()
    }

    fn invalid(reason: InvalidReason) -> TokenKind {
        TokenKind::Invalid { reason }
    }

    fn directive(directive: Directive) -> TokenKind {
        TokenKind::PreprocessorDirective { directive }
    }

    fn int(radix: Radix, suffix: Option<&str>) -> TokenKind {
        TokenKind::IntegerLiteral {
            radix,
            suffix: suffix.map(str::to_string),
        }
    }

    fn float(suffix: Option<&str>) -> TokenKind {
        TokenKind::FloatLiteral {
            suffix: suffix.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(collect_tokens("").is_empty());
    }

    #[test]
    fn test_whitespace_run_is_one_token() {
        let tokens = collect_tokens(" \t\r\n\x0B\x0C x");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Whitespace);
        assert_eq!(tokens[0].text, " \t\r\n\x0B\x0C ");
    }

    #[test]
    fn test_line_splice_is_whitespace() {
        let tokens = collect_tokens("a\\\nb");
        assert_eq!(texts("a\\\nb"), vec!["a", "\\\n", "b"]);
        assert_eq!(tokens[1].kind, TokenKind::Whitespace);
    }

    #[test]
    fn test_maximal_munch() {
        let tokens = significant("a>>=b");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], (TokenKind::Operator, ">>=".to_string()));
    }

    #[test]
    fn test_operators_and_punctuators() {
        let tokens = significant("x->*y <=> z ... :: ; .* ##");
        let expected = [
            (TokenKind::Identifier, "x"),
            (TokenKind::Operator, "->*"),
            (TokenKind::Identifier, "y"),
            (TokenKind::Operator, "<=>"),
            (TokenKind::Identifier, "z"),
            (TokenKind::Punctuator, "..."),
            (TokenKind::Operator, "::"),
            (TokenKind::Punctuator, ";"),
            (TokenKind::Operator, ".*"),
            (TokenKind::Operator, "##"),
        ];
        assert_eq!(tokens.len(), expected.len());
        for ((kind, text), (expected_kind, expected_text)) in tokens.iter().zip(expected) {
            assert_eq!(kind, &expected_kind);
            assert_eq!(text, expected_text);
        }
    }

    #[test]
    fn test_double_dot_is_two_tokens() {
        assert_eq!(texts(".."), vec![".", "."]);
    }

    #[test]
    fn test_keywords_identifiers_alternatives() {
        let tokens = significant("class Foo bitor and_eq override co_await");
        assert_eq!(tokens[0].0, TokenKind::Keyword);
        assert_eq!(tokens[1].0, TokenKind::Identifier);
        assert_eq!(tokens[2].0, TokenKind::AlternativeToken);
        assert_eq!(tokens[3].0, TokenKind::AlternativeToken);
        assert_eq!(tokens[4].0, TokenKind::Identifier);
        assert_eq!(tokens[5].0, TokenKind::Keyword);
    }

    #[test]
    fn test_alternative_token_stays_distinct() {
        let words = significant("a and b");
        let symbols = significant("a && b");
        assert_eq!(words[1], (TokenKind::AlternativeToken, "and".to_string()));
        assert_eq!(symbols[1], (TokenKind::Operator, "&&".to_string()));
    }

    #[test]
    fn test_unicode_identifier() {
        let tokens = significant("int größe = 1;");
        assert_eq!(tokens[1], (TokenKind::Identifier, "größe".to_string()));
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let tokens = collect_tokens("\u{feff}int x;");
        assert_eq!(tokens[0].kind, TokenKind::Whitespace);
        assert_eq!(tokens[0].text, "\u{feff}");
        assert_eq!(tokens[1].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].text, "int");

        let tokens = significant("\u{feff}#include <a>\n");
        assert_eq!(tokens[0], (directive(Directive::Include), "#include <a>".to_string()));

        let tokens = significant("a\u{feff}");
        assert_eq!(tokens[0], (TokenKind::Identifier, "a".to_string()));
        assert_eq!(tokens[1].0, invalid(InvalidReason::UnrecognizedCharacter));
    }

    #[test]
    fn test_dollar_in_identifiers() {
        assert_eq!(
            significant("$x")[0],
            (invalid(InvalidReason::UnrecognizedCharacter), "$".to_string())
        );

        let config = LexerConfig {
            dollar_in_identifiers: true,
            ..LexerConfig::default()
        };
        let tokens = collect_with("$x", config);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_comments() {
        let tokens = collect_tokens("// line\n/* block\n */x");
        assert_eq!(tokens[0].kind, TokenKind::Comment { block: false });
        assert_eq!(tokens[0].text, "// line");
        assert_eq!(tokens[1].text, "\n");
        assert_eq!(tokens[2].kind, TokenKind::Comment { block: true });
        assert_eq!(tokens[2].text, "/* block\n */");
        assert_eq!(tokens[3].text, "x");
    }

    #[test]
    fn test_line_comment_excludes_crlf() {
        let tokens = collect_tokens("// c\r\nx");
        assert_eq!(tokens[0].text, "// c");
        assert_eq!(tokens[1].text, "\r\n");
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = collect_tokens("x /* open");
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, invalid(InvalidReason::UnterminatedComment));
        assert_eq!(last.text, "/* open");
    }

    #[test]
    fn test_directives() {
        let tokens = significant("#include <vector>\n#  define PI 3.14\n#pragma once");
        assert_eq!(tokens[0].0, directive(Directive::Include));
        assert_eq!(tokens[0].1, "#include <vector>");
        assert_eq!(tokens[1].0, directive(Directive::Define));
        assert_eq!(tokens[1].1, "#  define PI 3.14");
        assert_eq!(tokens[2].0, directive(Directive::Pragma));
    }

    #[test]
    fn test_indented_directive() {
        let tokens = significant("int x;\n    #ifdef A\n    #endif\n");
        assert_eq!(tokens[3].0, directive(Directive::Ifdef));
        assert_eq!(tokens[4].0, directive(Directive::Endif));
    }

    #[test]
    fn test_directive_continuation() {
        let tokens = collect_tokens("#define MAX(a, b) \\\n  ((a) > (b))\nx");
        assert_eq!(tokens[0].kind, directive(Directive::Define));
        assert_eq!(tokens[0].text, "#define MAX(a, b) \\\n  ((a) > (b))");
        assert_eq!(tokens[0].span.end.line, 2);
    }

    #[test]
    fn test_directive_body_skips_literals_and_comments() {
        let tokens = collect_tokens("#define S \"// not a comment\" /* a\n b */ 1 // tail\nx");
        assert_eq!(tokens[0].kind, directive(Directive::Define));
        assert_eq!(tokens[0].text, "#define S \"// not a comment\" /* a\n b */ 1 ");
        assert_eq!(tokens[1].kind, TokenKind::Comment { block: false });
        assert_eq!(tokens[1].text, "// tail");
    }

    #[test]
    fn test_directive_digit_separator_is_not_char_literal() {
        let tokens = collect_tokens("#if X > 1'000 // big\n#endif");
        assert_eq!(tokens[0].text, "#if X > 1'000 ");
        assert_eq!(tokens[1].kind, TokenKind::Comment { block: false });
    }

    #[test]
    fn test_directive_name_after_line_splice() {
        let tokens = collect_tokens("#\\\ndefine Z 1\n");
        assert_eq!(tokens[0].kind, directive(Directive::Define));
        assert_eq!(tokens[0].text, "#\\\ndefine Z 1");

        let tokens = collect_tokens("#  def\\\nine Z\n");
        assert_eq!(tokens[0].kind, directive(Directive::Define));

        let tokens = collect_tokens("# \\\n\nx");
        assert_eq!(tokens[0].kind, directive(Directive::Null));
        assert_eq!(tokens[0].text, "# \\\n");
    }

    #[test]
    fn test_directive_body_spans_raw_string() {
        let tokens = significant("#define X R\"(a\nb)\"\nint y;");
        assert_eq!(
            tokens[0],
            (directive(Directive::Define), "#define X R\"(a\nb)\"".to_string())
        );
        assert_eq!(tokens[1].0, TokenKind::Keyword);

        let tokens = significant("#define Q LR\"d(// no\n)d\" 2\nq");
        assert_eq!(tokens[0].1, "#define Q LR\"d(// no\n)d\" 2");
        assert_eq!(tokens[1], (TokenKind::Identifier, "q".to_string()));
    }

    #[test]
    fn test_null_and_line_marker_directives() {
        let tokens = significant("#\n# 1 \"main.cpp\"\n");
        assert_eq!(tokens[0], (directive(Directive::Null), "#".to_string()));
        assert_eq!(tokens[1].0, directive(Directive::Line));
    }

    #[test]
    fn test_unknown_directive() {
        let tokens = significant("#frobnicate all\nx");
        assert_eq!(tokens[0].0, invalid(InvalidReason::UnknownDirective));
        assert_eq!(tokens[0].1, "#frobnicate all");
        assert_eq!(tokens[1].0, TokenKind::Identifier);
    }

    #[test]
    fn test_hash_not_at_line_start_is_operator() {
        let tokens = significant("x # y");
        assert_eq!(tokens[1], (TokenKind::Operator, "#".to_string()));
    }

    #[test]
    fn test_hash_after_block_comment_on_same_line() {
        let tokens = significant("/* c */ #define X\nint /* c */ #");
        assert_eq!(tokens[1].0, directive(Directive::Define));
        assert_eq!(tokens[4], (TokenKind::Operator, "#".to_string()));
    }

    #[test]
    fn test_multiline_block_comment_keeps_line_state() {
        let tokens = significant("x /* c\n */ #define Y 1\n");
        assert_eq!(tokens[2], (TokenKind::Operator, "#".to_string()));

        let tokens = significant("/* c\n */ #define Y 1\n");
        assert_eq!(tokens[1].0, directive(Directive::Define));
    }

    #[test]
    fn test_hash_after_line_splice_is_operator() {
        let tokens = significant("x \\\n# y");
        assert_eq!(tokens[1], (TokenKind::Operator, "#".to_string()));
    }

    #[test]
    fn test_digraph_directive_introducer() {
        let tokens = significant("%:define X <%%>");
        assert_eq!(tokens[0].0, directive(Directive::Define));

        let tokens = significant("x %: y");
        assert_eq!(tokens[1], (TokenKind::Operator, "%:".to_string()));
    }

    #[test]
    fn test_conditional_tracking() {
        let mut stream = CharStream::new("#if A\n#else\n#endif\n#endif\n#ifdef B\n");
        let mut classifier = Classifier::new(LexerConfig::default());
        while classifier.next_token(&mut stream).is_some() {}

        assert_eq!(classifier.conditionals().depth(), 1);
        assert_eq!(classifier.conditionals().stray().len(), 1);
        assert_eq!(
            classifier.conditional_summary(),
            Some(InvalidReason::UnbalancedPreprocessorConditional { unclosed: 1, stray: 1 })
        );
    }

    #[test]
    fn test_conditional_tracking_disabled() {
        let config = LexerConfig {
            track_conditionals: false,
            ..LexerConfig::default()
        };
        let mut stream = CharStream::new("#endif\n");
        let mut classifier = Classifier::new(config);
        while classifier.next_token(&mut stream).is_some() {}
        assert_eq!(classifier.conditional_summary(), None);
    }

    #[test]
    fn test_string_and_char_literals() {
        let tokens = significant(r#""a\"b" 'x' '\n' u8"s" L'w' U"t" u'c' u8'A'"#);
        let ordinary = Encoding::Ordinary;
        assert_eq!(
            tokens[0].0,
            TokenKind::StringLiteral {
                encoding: ordinary,
                raw: false
            }
        );
        assert_eq!(tokens[0].1, r#""a\"b""#);
        assert_eq!(tokens[1].0, TokenKind::CharLiteral { encoding: ordinary });
        assert_eq!(tokens[2].0, TokenKind::CharLiteral { encoding: ordinary });
        assert_eq!(
            tokens[3].0,
            TokenKind::StringLiteral {
                encoding: Encoding::Utf8,
                raw: false
            }
        );
        assert_eq!(tokens[4].0, TokenKind::CharLiteral { encoding: Encoding::Wide });
        assert_eq!(
            tokens[5].0,
            TokenKind::StringLiteral {
                encoding: Encoding::Utf32,
                raw: false
            }
        );
        assert_eq!(tokens[6].0, TokenKind::CharLiteral { encoding: Encoding::Utf16 });
        assert_eq!(tokens[7].0, TokenKind::CharLiteral { encoding: Encoding::Utf8 });
        assert_eq!(tokens[7].1, "u8'A'");
    }

    #[test]
    fn test_prefix_letters_without_quote_are_identifiers() {
        let tokens = significant("u8 u U L R uR");
        assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Identifier));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_string_udl_suffix_is_separate() {
        let tokens = significant(r#""hi"s"#);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], (TokenKind::Identifier, "s".to_string()));
    }

    #[test]
    fn test_unterminated_string_recovers() {
        let tokens = collect_tokens("\"abc\nx");
        assert_eq!(tokens[0].kind, invalid(InvalidReason::UnterminatedLiteral));
        assert_eq!(tokens[0].text, "\"abc");
        assert_eq!(tokens[1].text, "\n");
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_unterminated_string_at_crlf() {
        let tokens = collect_tokens("'a\r\n");
        assert_eq!(tokens[0].text, "'a");
        assert_eq!(tokens[1].text, "\r\n");
    }

    #[test]
    fn test_empty_char_literal() {
        let tokens = collect_tokens("''x");
        assert_eq!(tokens[0].kind, invalid(InvalidReason::EmptyCharacterLiteral));
        assert_eq!(tokens[0].text, "''");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_raw_string_integrity() {
        let tokens = collect_tokens("R\"(a\\nb)\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(
            tokens[0].kind,
            TokenKind::StringLiteral {
                encoding: Encoding::Ordinary,
                raw: true
            }
        );
        assert_eq!(tokens[0].text, "R\"(a\\nb)\"");
    }

    #[test]
    fn test_raw_string_with_delimiter_and_newlines() {
        let source = "u8R\"xy(one )\" two\n)xy\";";
        let tokens = collect_tokens(source);
        assert_eq!(
            tokens[0].kind,
            TokenKind::StringLiteral {
                encoding: Encoding::Utf8,
                raw: true
            }
        );
        assert_eq!(tokens[0].text, "u8R\"xy(one )\" two\n)xy\"");
        assert_eq!(tokens[1].text, ";");
    }

    #[test]
    fn test_raw_string_malformed_delimiter() {
        let tokens = collect_tokens("R\"a b(x)a b\"");
        assert_eq!(tokens[0].kind, invalid(InvalidReason::MalformedRawStringDelimiter));
        assert_eq!(tokens[0].text, "R\"a");

        let too_long = format!("R\"{}(x){}\"", "d".repeat(17), "d".repeat(17));
        let tokens = collect_tokens(&too_long);
        assert_eq!(tokens[0].kind, invalid(InvalidReason::MalformedRawStringDelimiter));
    }

    #[test]
    fn test_raw_string_unterminated() {
        let tokens = collect_tokens("R\"x(never closed)\"");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, invalid(InvalidReason::MalformedRawStringDelimiter));
    }

    #[test]
    fn test_integer_literals() {
        let tokens = significant("0 42 017 0x1F 0b1010'1010 1'000'000");
        assert_eq!(tokens[0].0, int(Radix::Decimal, None));
        assert_eq!(tokens[1].0, int(Radix::Decimal, None));
        assert_eq!(tokens[2].0, int(Radix::Octal, None));
        assert_eq!(tokens[3].0, int(Radix::Hexadecimal, None));
        assert_eq!(tokens[4], (int(Radix::Binary, None), "0b1010'1010".to_string()));
        assert_eq!(tokens[5], (int(Radix::Decimal, None), "1'000'000".to_string()));
    }

    #[test]
    fn test_digit_separators_and_suffix() {
        let tokens = collect_tokens("0xDEAD'BEEFull");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, int(Radix::Hexadecimal, Some("ull")));
    }

    #[test]
    fn test_float_literals() {
        let tokens = significant("3.14 1. .5 1e10 2.5E-3f 0x1.8p3 1.0L 2.0f32");
        assert_eq!(tokens[0].0, float(None));
        assert_eq!(tokens[1], (float(None), "1.".to_string()));
        assert_eq!(tokens[2], (float(None), ".5".to_string()));
        assert_eq!(tokens[3].0, float(None));
        assert_eq!(tokens[4].0, float(Some("f")));
        assert_eq!(tokens[5], (float(None), "0x1.8p3".to_string()));
        assert_eq!(tokens[6].0, float(Some("L")));
        assert_eq!(tokens[7].0, float(Some("f32")));
    }

    #[test]
    fn test_user_defined_and_std_suffixes() {
        let tokens = significant("90.0_deg 10ms 3s 2i 5_km");
        assert_eq!(tokens[0].0, float(Some("_deg")));
        assert_eq!(tokens[1].0, int(Radix::Decimal, Some("ms")));
        assert_eq!(tokens[2].0, int(Radix::Decimal, Some("s")));
        assert_eq!(tokens[3].0, int(Radix::Decimal, Some("i")));
        assert_eq!(tokens[4].0, int(Radix::Decimal, Some("_km")));
    }

    #[test]
    fn test_invalid_suffix_remainder_is_next_token() {
        let tokens = collect_tokens("10ulx");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, int(Radix::Decimal, Some("ul")));
        assert_eq!(tokens[0].text, "10ul");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_exponent_needs_digits() {
        let tokens = collect_tokens("1e");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, int(Radix::Decimal, None));
        assert_eq!(tokens[1].text, "e");
    }

    #[test]
    fn test_range_dots_after_integer() {
        assert_eq!(texts("1..."), vec!["1", "..."]);
    }

    #[test]
    fn test_attribute_balance() {
        let tokens = significant("[[deprecated(\"x]]\")]] int f();");
        assert_eq!(tokens[0], (TokenKind::Attribute, "[[deprecated(\"x]]\")]]".to_string()));
        assert_eq!(tokens[1].0, TokenKind::Keyword);
    }

    #[test]
    fn test_attribute_nested_brackets() {
        let tokens = significant("[[gnu::aligned(a[1])]] x");
        assert_eq!(tokens[0].1, "[[gnu::aligned(a[1])]]");
    }

    #[test]
    fn test_attribute_digit_separator() {
        let tokens = significant("[[gnu::aligned(1'024)]]");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].0, TokenKind::Attribute);
    }

    #[test]
    fn test_unbalanced_attribute() {
        let tokens = collect_tokens("[[noreturn");
        assert_eq!(tokens[0].kind, invalid(InvalidReason::UnbalancedAttributeBrackets));

        let tokens = collect_tokens("[[likely] x");
        assert_eq!(tokens[0].kind, invalid(InvalidReason::UnbalancedAttributeBrackets));
        assert_eq!(tokens[0].text, "[[likely]");
    }

    #[test]
    fn test_attribute_skips_comments() {
        let tokens = significant("[[ /* ] */ nodiscard ]] int f();");
        assert_eq!(
            tokens[0],
            (TokenKind::Attribute, "[[ /* ] */ nodiscard ]]".to_string())
        );
        assert_eq!(tokens[1].0, TokenKind::Keyword);

        let tokens = significant("[[ deprecated // ]]\n ]] x");
        assert_eq!(
            tokens[0],
            (TokenKind::Attribute, "[[ deprecated // ]]\n ]]".to_string())
        );

        let tokens = significant("[[ a /* ]]");
        assert_eq!(tokens[0].0, invalid(InvalidReason::UnbalancedAttributeBrackets));
        assert_eq!(tokens[0].1, "[[ a ");
        assert_eq!(tokens[1].0, invalid(InvalidReason::UnterminatedComment));
    }

    #[test]
    fn test_digraphs_toggle() {
        let tokens = significant("<% %> <: :>");
        assert!(tokens.iter().all(|(kind, _)| *kind == TokenKind::Punctuator));

        let config = LexerConfig {
            digraphs: false,
            ..LexerConfig::default()
        };
        let tokens = collect_with("<%", config);
        assert_eq!(tokens[0].text, "<");
        assert_eq!(tokens[1].text, "%");
    }

    #[test]
    fn test_less_colon_colon() {
        let tokens = significant("std::vector<::T> v;");
        assert_eq!(tokens[3], (TokenKind::Operator, "<".to_string()));
        assert_eq!(tokens[4], (TokenKind::Operator, "::".to_string()));
    }

    #[test]
    fn test_member_pointer_operators() {
        let tokens = significant("int PMDemo::* p = &PMDemo::x; obj.*p; ptr->*p;");
        assert!(tokens.iter().any(|(k, t)| *k == TokenKind::Operator && t == "::"));
        assert!(tokens.iter().any(|(k, t)| *k == TokenKind::Operator && t == ".*"));
        assert!(tokens.iter().any(|(k, t)| *k == TokenKind::Operator && t == "->*"));
    }

    #[test]
    fn test_unrecognized_character() {
        let tokens = collect_tokens("a @ b");
        assert_eq!(tokens[2].kind, invalid(InvalidReason::UnrecognizedCharacter));
        assert_eq!(tokens[2].text, "@");
        assert_eq!(tokens[4].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_stray_backslash() {
        let tokens = collect_tokens("\\x");
        assert_eq!(tokens[0].kind, invalid(InvalidReason::UnrecognizedCharacter));
    }

    #[test]
    fn test_position_tracking() {
        let tokens = collect_tokens("int x;\n  y");
        assert_eq!(tokens[0].span.start.line, 1);
        assert_eq!(tokens[0].span.start.column, 1);
        let y = tokens.last().unwrap();
        assert_eq!(y.span.start.line, 2);
        assert_eq!(y.span.start.column, 3);
        assert_eq!(y.span.start.offset, 9);
    }

    #[test]
    fn test_operator_literal_declaration() {
        let tokens = significant("long double operator\"\" _deg(long double d);");
        assert_eq!(tokens[2], (TokenKind::Keyword, "operator".to_string()));
        assert_eq!(tokens[3].1, "\"\"");
        assert_eq!(tokens[4], (TokenKind::Identifier, "_deg".to_string()));
    }

    #[test]
    fn test_has_logical_newline() {
        assert!(has_logical_newline("  \n"));
        assert!(has_logical_newline("\r\n"));
        assert!(!has_logical_newline("\\\n"));
        assert!(!has_logical_newline("\\\r\n  "));
        assert!(has_logical_newline("\\\n\n"));
    }
}
