//! cxxlex - A lossless C-family tokenizer
//!
//! Splits C/C++ source into a flat token stream that keeps every byte:
//! whitespace, comments, and preprocessor directives are tokens too, so
//! concatenating the token texts reproduces the input exactly.
//!
//! # Architecture
//!
//! ```text
//! cxxlex-config/  - Pure configuration data (serde)
//! cxxlex-core/    - Scanner, classifier, token stream (no IO)
//! cxxlex-api/     - Reports, rendering, error handling, global config
//! cxxlex-cli/     - `cxxlex` command line tool
//! ```
//!
//! # Quick Start
//!
//! ```
//! use cxxlex::{tokenize, RunConfig, TokenKind};
//!
//! let report = tokenize("int x = 0x2A;", &RunConfig::default());
//! assert!(!report.has_invalid());
//! assert_eq!(report.reconstruct(), "int x = 0x2A;");
//! assert!(matches!(report.tokens[0].kind, TokenKind::Keyword));
//! ```

// API 层（对外接口）
pub use cxxlex_api::{
    check_invalid, init_config, is_initialized, load_config, load_source, quick_tokenize,
    tokenize, tokenize_checked, tokenize_global, CxxlexError, ErrorDetails, ErrorReport,
    LexReport, RunConfig,
};
pub use cxxlex_api::render;

// 配置
pub use cxxlex_config::{
    CxxlexConfig, LexerConfig, LogLevel, LoggingConfig, OutputConfig, OutputFormat, Phase,
};

// 核心层（纯逻辑，无 IO）
pub use cxxlex_core::kit::lexer::{Classifier, ConditionalTracker, OpenConditional};
pub use cxxlex_core::{
    Directive, Encoding, InvalidReason, Lexer, LexerError, Radix, SourcePosition, SourceSpan,
    Token, TokenKind,
};
