use crate::{
    error::{Error, Result},
    token::{self, Token, TokenKind},
};
use log::{debug, trace};
use peekmore::{PeekMore, PeekMoreIterator};
use std::{iter::Chain, option, str::CharIndices};

type Source<'a> = Chain<CharIndices<'a>, option::IntoIter<(usize, char)>>;

/// Pull-based scanner over a single source text.
///
/// The buffer is always treated as newline-terminated: when the text does
/// not end in `'\n'` one is appended, so the last line yields a `Newline`
/// token before `EndOfInput`. Once `EndOfInput` has been produced every
/// further call to `next_token` produces it again.
pub struct Scanner<'a> {
    src: PeekMoreIterator<Source<'a>>,
    lexeme_buffer: String,
    position: usize,
    line: usize,
    halted: bool,
}

impl <'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    /// Yields every token up to and including `EndOfInput`, or up to and
    /// including the first error.
    fn next(&mut self) -> Option<Result<Token>> {
        if self.halted { return None }

        let result = self.next_token();
        self.halted = match &result {
            Ok(token) => token.kind == TokenKind::EndOfInput,
            Err(_) => true,
        };
        Some(result)
    }
}

impl <'a> Scanner<'a> {
    pub fn new(src: &'a str) -> Self {
        let terminator = if src.ends_with('\n') { None } else { Some((src.len(), '\n')) };
        Self {
            src: src.char_indices().chain(terminator).peekmore(),
            lexeme_buffer: String::new(),
            position: 0,
            line: 1,
            halted: false,
        }
    }

    pub fn scan_tokens(self) -> Result<Vec<Token>> {
        self.collect()
    }

    /// Byte offset of the next unconsumed character.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Steps over the character under the cursor without classifying it.
    /// After a lexical error this lets a caller resynchronise; the scanner
    /// itself never skips input on its own.
    pub fn skip_char(&mut self) -> Option<char> {
        let skipped = self.bump();
        if skipped.is_some() {
            self.halted = false;
        }
        skipped
    }

    /// Steps over the rest of the current line, stopping before its
    /// newline so the caller still sees the `Newline` token. Returns the
    /// number of characters skipped.
    pub fn skip_line(&mut self) -> usize {
        let mut skipped = 0;
        while !matches!(self.current(), None | Some('\n')) {
            self.bump();
            skipped += 1;
        }
        if skipped > 0 {
            self.halted = false;
        }
        skipped
    }

    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_insignificant();
        self.lexeme_buffer.clear();

        let (line, start) = (self.line, self.position);
        match self.next_token_kind() {
            Ok(kind) => {
                let token = Token::new(kind, self.lexeme_buffer.as_str(), line, start);
                trace!("{} {:?} on line {} at {}", kind, token.lexeme, line, start);
                Ok(token)
            },
            Err(e) => {
                debug!("{}", e);
                Err(e)
            },
        }
    }

    fn skip_insignificant(&mut self) {
        while let Some(' ') | Some('\t') | Some('\r') = self.current() {
            self.bump();
        }

        if self.current() == Some('#') {
            while !matches!(self.current(), None | Some('\n')) {
                self.bump();
            }
        }
    }

    fn next_token_kind(&mut self) -> Result<TokenKind> {
        let next_char = match self.current() {
            None => return Ok(TokenKind::EndOfInput),
            Some(c) => c,
        };

        use TokenKind::*;
        match next_char {
            '+' => Ok(self.single(Plus)),
            '-' => Ok(self.single(Minus)),
            '*' => Ok(self.single(Star)),
            '/' => Ok(self.single(Slash)),
            '\n' => Ok(self.single(Newline)),
            '=' => Ok(self.single_or_pair('=', Equal, Assign)),
            '<' => Ok(self.single_or_pair('=', LessEqual, Less)),
            '>' => Ok(self.single_or_pair('=', GreaterEqual, Greater)),
            '!' => match self.peek_at(1) {
                Some((_, '=')) => {
                    self.advance_by(2);
                    Ok(NotEqual)
                },
                _ => Err(self.unexpected(next_char)),
            },
            '"' => self.extract_string(),
            c if c.is_ascii_digit() => self.extract_number(),
            c if c.is_ascii_alphabetic() => Ok(self.extract_identifier()),
            c => Err(self.unexpected(c)),
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Maximal munch over a two-character operator whose second character
    /// is `second`.
    fn single_or_pair(&mut self, second: char, pair: TokenKind, single: TokenKind) -> TokenKind {
        self.advance();
        if self.does_next_match(second) { pair } else { single }
    }

    fn does_next_match(&mut self, c: char) -> bool {
        match self.current() {
            Some(next) if next == c => {
                self.advance();
                true
            },
            _ => false,
        }
    }

    fn extract_string(&mut self) -> Result<TokenKind> {
        let body_len = self.run_length(1, |c| c != '"' && c != '\n');
        match self.peek_at(body_len + 1) {
            Some((_, '"')) => {
                self.bump();
                self.advance_by(body_len);
                self.bump();
                Ok(TokenKind::StringLiteral)
            },
            _ => Err(Error::unterminated_string(self.line, self.position)),
        }
    }

    fn extract_number(&mut self) -> Result<TokenKind> {
        let mut len = self.run_length(0, is_digit);

        if let Some((dot_position, '.')) = self.peek_at(len) {
            let fraction_len = self.run_length(len + 1, is_digit);
            if fraction_len == 0 {
                return Err(Error::malformed_number(self.line, dot_position));
            }
            len += 1 + fraction_len;
        }

        self.advance_by(len);
        Ok(TokenKind::Number)
    }

    fn extract_identifier(&mut self) -> TokenKind {
        let len = self.run_length(0, |c| c.is_ascii_alphanumeric());
        self.advance_by(len);

        token::classify(self.lexeme_buffer.as_str()).unwrap_or(TokenKind::Identifier)
    }

    fn unexpected(&self, c: char) -> Error {
        Error::unexpected_char(self.line, c, self.position)
    }

    fn current(&mut self) -> Option<char> {
        self.peek_at(0).map(|(_, c)| c)
    }

    fn peek_at(&mut self, n: usize) -> Option<(usize, char)> {
        self.src.peek_nth(n).copied()
    }

    /// Number of consecutive characters matching `pred`, starting `from`
    /// characters ahead of the cursor. Nothing is consumed.
    fn run_length(&mut self, from: usize, pred: impl Fn(char) -> bool) -> usize {
        let mut len = 0;
        while let Some((_, c)) = self.peek_at(from + len) {
            if !pred(c) { break }
            len += 1;
        }
        len
    }

    fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn advance(&mut self) {
        if let Some(c) = self.bump() {
            self.lexeme_buffer.push(c);
        }
    }

    fn bump(&mut self) -> Option<char> {
        let (offset, c) = self.src.next()?;
        self.position = offset + c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}
