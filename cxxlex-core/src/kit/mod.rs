//! 可复用的语言工具组件

pub mod lexer;
