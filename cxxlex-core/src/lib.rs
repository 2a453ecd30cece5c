//! cxxlex Core - lossless C++ tokenizer (pure logic, no IO)
//!
//! Contains the scanner, the classifier and the token stream.
//! Only operates on in-memory data structures, no file IO or terminal output.
//!
//! Configuration is passed explicitly via parameters, not via global state.

pub mod kit;

// Re-export common types
pub use kit::lexer::{
    tokenize, tokenize_with, Directive, Encoding, InvalidReason, Lexer, LexerError, Radix,
    SourcePosition, SourceSpan, Token, TokenKind,
};

// Re-export config types from cxxlex-config
pub use cxxlex_config::LexerConfig;
