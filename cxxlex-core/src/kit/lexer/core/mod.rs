//! 字符级基础设施：位置追踪与字符流

pub mod position;
pub mod stream;

pub use position::{SourcePosition, SourceSpan};
pub use stream::CharStream;
