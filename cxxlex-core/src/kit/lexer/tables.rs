//! 静态查找表
//!
//! 所有表都按字节序排序，用 `binary_search` 查找；
//! 运算符按候选长度从长到短依次查找，实现最长匹配。

use super::token::Directive;

/// 关键字表（C++23，含 `import`/`module`/`export`）
static KEYWORDS: &[&str] = &[
    "alignas",
    "alignof",
    "asm",
    "auto",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char16_t",
    "char32_t",
    "char8_t",
    "class",
    "co_await",
    "co_return",
    "co_yield",
    "concept",
    "const",
    "const_cast",
    "consteval",
    "constexpr",
    "constinit",
    "continue",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "import",
    "inline",
    "int",
    "long",
    "module",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "nullptr",
    "operator",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
];

/// 替代记号（alternative tokens）
static ALTERNATIVE_TOKENS: &[&str] = &[
    "and", "and_eq", "bitand", "bitor", "compl", "not", "not_eq", "or", "or_eq", "xor", "xor_eq",
];

static DIRECTIVES: &[(&str, Directive)] = &[
    ("define", Directive::Define),
    ("elif", Directive::Elif),
    ("elifdef", Directive::Elifdef),
    ("elifndef", Directive::Elifndef),
    ("else", Directive::Else),
    ("endif", Directive::Endif),
    ("error", Directive::Error),
    ("if", Directive::If),
    ("ifdef", Directive::Ifdef),
    ("ifndef", Directive::Ifndef),
    ("include", Directive::Include),
    ("line", Directive::Line),
    ("pragma", Directive::Pragma),
    ("undef", Directive::Undef),
    ("warning", Directive::Warning),
];

/// 标准库字面量后缀（`<chrono>`、`<complex>`、`<string>`）
static STD_LITERAL_SUFFIXES: &[&str] = &["d", "h", "i", "if", "il", "min", "ms", "ns", "s", "us", "y"];

/// 符号类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolClass {
    Operator,
    Punctuator,
}

/// 运算符/标点表项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub text: &'static str,
    pub class: SymbolClass,
    pub digraph: bool,
}

const fn op(text: &'static str) -> Symbol {
    Symbol {
        text,
        class: SymbolClass::Operator,
        digraph: false,
    }
}

const fn punct(text: &'static str) -> Symbol {
    Symbol {
        text,
        class: SymbolClass::Punctuator,
        digraph: false,
    }
}

const fn digraph(text: &'static str, class: SymbolClass) -> Symbol {
    Symbol {
        text,
        class,
        digraph: true,
    }
}

const MAX_SYMBOL_LEN: usize = 4;

static SYMBOLS: &[Symbol] = &[
    op("!"),
    op("!="),
    op("#"),
    op("##"),
    op("%"),
    digraph("%:", SymbolClass::Operator),
    digraph("%:%:", SymbolClass::Operator),
    op("%="),
    digraph("%>", SymbolClass::Punctuator),
    op("&"),
    op("&&"),
    op("&="),
    punct("("),
    punct(")"),
    op("*"),
    op("*="),
    op("+"),
    op("++"),
    op("+="),
    punct(","),
    op("-"),
    op("--"),
    op("-="),
    op("->"),
    op("->*"),
    op("."),
    op(".*"),
    punct("..."),
    op("/"),
    op("/="),
    punct(":"),
    op("::"),
    digraph(":>", SymbolClass::Punctuator),
    punct(";"),
    op("<"),
    digraph("<%", SymbolClass::Punctuator),
    digraph("<:", SymbolClass::Punctuator),
    op("<<"),
    op("<<="),
    op("<="),
    op("<=>"),
    op("="),
    op("=="),
    op(">"),
    op(">="),
    op(">>"),
    op(">>="),
    op("?"),
    punct("["),
    punct("]"),
    op("^"),
    op("^="),
    punct("{"),
    op("|"),
    op("|="),
    op("||"),
    punct("}"),
    op("~"),
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.binary_search(&word).is_ok()
}

pub fn is_alternative_token(word: &str) -> bool {
    ALTERNATIVE_TOKENS.binary_search(&word).is_ok()
}

pub fn lookup_directive(name: &str) -> Option<Directive> {
    DIRECTIVES
        .binary_search_by(|(text, _)| text.cmp(&name))
        .ok()
        .map(|index| DIRECTIVES[index].1)
}

pub fn is_std_literal_suffix(suffix: &str) -> bool {
    STD_LITERAL_SUFFIXES.binary_search(&suffix).is_ok()
}

/// 对 `input` 开头做最长匹配
///
/// `<::` 特例：除非其后是 `:` 或 `>`，`<:` 不作为双字符记号，
/// 这样 `std::vector<::T>` 仍得到 `<` 和 `::`。
pub fn match_symbol(input: &str, digraphs: bool) -> Option<Symbol> {
    for len in (1..=MAX_SYMBOL_LEN).rev() {
        let Some(candidate) = input.get(..len) else {
            continue;
        };
        let Ok(index) = SYMBOLS.binary_search_by(|symbol| symbol.text.cmp(candidate)) else {
            continue;
        };
        let symbol = SYMBOLS[index];
        if symbol.digraph && !digraphs {
            continue;
        }
        if symbol.text == "<:" && input.starts_with("<::") {
            let after = input.as_bytes().get(3);
            if !matches!(after, Some(b':') | Some(b'>')) {
                continue;
            }
        }
        return Some(symbol);
    }
    None
}

/// 内置整数后缀：`u`、`l`/`ll`、`z` 的组合，大小写任意但 `l` 需同形
pub fn is_integer_suffix(suffix: &str) -> bool {
    const SIZES: [&str; 7] = ["", "l", "L", "ll", "LL", "z", "Z"];
    const SIGNS: [&str; 3] = ["", "u", "U"];

    if suffix.is_empty() {
        return false;
    }
    SIZES.iter().any(|size| {
        SIGNS.iter().any(|sign| {
            let sign_first = suffix
                .strip_prefix(sign)
                .map_or(false, |rest| rest == *size);
            let sign_last = suffix
                .strip_prefix(size)
                .map_or(false, |rest| rest == *sign);
            sign_first || sign_last
        })
    })
}

/// 内置浮点后缀
pub fn is_float_suffix(suffix: &str) -> bool {
    matches!(
        suffix,
        "f" | "F"
            | "l"
            | "L"
            | "f16"
            | "f32"
            | "f64"
            | "f128"
            | "F16"
            | "F32"
            | "F64"
            | "F128"
            | "bf16"
            | "BF16"
    )
}

/// 解析数字后缀候选，返回应并入字面量的字节数
///
/// `_` 开头的用户自定义后缀与标准库后缀整体吸收；
/// 其余取最长的合法内置后缀前缀，剩余部分留给下一个 token。
pub fn resolve_numeric_suffix(candidate: &str, is_float: bool) -> usize {
    if candidate.is_empty() {
        return 0;
    }
    if candidate.starts_with('_') || is_std_literal_suffix(candidate) {
        return candidate.len();
    }

    let valid: fn(&str) -> bool = if is_float {
        is_float_suffix
    } else {
        is_integer_suffix
    };

    let mut best = 0;
    for (index, c) in candidate.char_indices() {
        let end = index + c.len_utf8();
        if valid(&candidate[..end]) {
            best = end;
        }
    }
    best
}
