pub mod error;
pub mod scanner;
pub mod token;

pub use crate::error::{Error, ErrorKind, Result};
pub use crate::scanner::Scanner;
pub use crate::token::{classify, describe, Token, TokenKind};

/// Scans `source` to completion. The returned tokens always end with a
/// single `EndOfInput`.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Scanner::new(source).scan_tokens()
}
