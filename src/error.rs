use std::result;
use std::fmt::{self, Display};

pub type Result<T> = result::Result<T, Error>;

/// Offsets are zero-based byte positions in the scanned buffer.
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
    UnexpectedChar { found: char, position: usize },
    UnterminatedString { start_position: usize },
    MalformedNumber { position: usize },
    Io(std::io::Error),
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    line: usize,
    message: String,
}

impl Error {
    pub fn unexpected_char(line: usize, found: char, position: usize) -> Error {
        let kind = ErrorKind::UnexpectedChar { found, position };
        let message = format!("Unexpected character '{}' at {}.", found.escape_debug(), position);
        Error { kind, line, message }
    }

    pub fn unterminated_string(line: usize, start_position: usize) -> Error {
        let kind = ErrorKind::UnterminatedString { start_position };
        let message = format!("Unterminated string literal starting at {}.", start_position);
        Error { kind, line, message }
    }

    pub fn malformed_number(line: usize, position: usize) -> Error {
        let kind = ErrorKind::MalformedNumber { position };
        let message = format!("Expected a digit after '.' at {}.", position);
        Error { kind, line, message }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_lexical(&self) -> bool {
        !matches!(self.kind(), ErrorKind::Io(_))
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.message)
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        use std::io::ErrorKind::*;
        std::io::Error::new(Other, e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        let message = e.to_string();
        Error { kind: ErrorKind::Io(e), line: 0, message }
    }
}
