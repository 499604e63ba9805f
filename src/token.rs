use std::fmt::{self, Display};

use phf::phf_map;

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "LABEL" => TokenKind::Label,
    "GOTO" => TokenKind::Goto,
    "PRINT" => TokenKind::Print,
    "INPUT" => TokenKind::Input,
    "LET" => TokenKind::Let,
    "IF" => TokenKind::If,
    "THEN" => TokenKind::Then,
    "ENDIF" => TokenKind::EndIf,
    "WHILE" => TokenKind::While,
    "REPEAT" => TokenKind::Repeat,
    "ENDWHILE" => TokenKind::EndWhile,
};

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) lexeme: String,
    pub(crate) line: usize,
    pub(crate) position: usize,
}

impl Token {
    pub fn new<S: Into<String>>(kind: TokenKind, lexeme: S, line: usize, position: usize) -> Self {
        Token { kind, lexeme: lexeme.into(), line, position }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The exact source text the token was scanned from. String literals
    /// hold their contents without the surrounding quotes.
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// Byte offset of the token's first character. For string literals
    /// this is the opening quote.
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TokenKind {
    EndOfInput, Newline,

    Number, Identifier, StringLiteral,

    Label, Goto, Print, Input, Let, If, Then, EndIf,
    While, Repeat, EndWhile,

    Assign, Plus, Minus, Star, Slash,
    Equal, NotEqual,
    Less, LessEqual,
    Greater, GreaterEqual,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Label | Goto | Print | Input | Let | If | Then | EndIf | While | Repeat | EndWhile
        )
    }

    pub fn is_operator(&self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Assign | Plus | Minus | Star | Slash | Equal | NotEqual
                | Less | LessEqual | Greater | GreaterEqual
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(describe(*self))
    }
}

/// Looks up a scanned identifier in the keyword table. Matching is exact
/// and case-sensitive, so `IF` is a keyword while `if` and `IFX` are not.
pub fn classify(spelling: &str) -> Option<TokenKind> {
    KEYWORDS.get(spelling).copied()
}

pub fn describe(kind: TokenKind) -> &'static str {
    use TokenKind::*;
    match kind {
        EndOfInput => "EOF",
        Newline => "NEWLINE",
        Number => "NUMBER",
        Identifier => "IDENT",
        StringLiteral => "STRING",
        Label => "LABEL",
        Goto => "GOTO",
        Print => "PRINT",
        Input => "INPUT",
        Let => "LET",
        If => "IF",
        Then => "THEN",
        EndIf => "ENDIF",
        While => "WHILE",
        Repeat => "REPEAT",
        EndWhile => "ENDWHILE",
        Assign => "EQ",
        Plus => "PLUS",
        Minus => "MINUS",
        Star => "ASTERISK",
        Slash => "SLASH",
        Equal => "EQEQ",
        NotEqual => "NOTEQ",
        Less => "LT",
        LessEqual => "LTEQ",
        Greater => "GT",
        GreaterEqual => "GTEQ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL_KINDS: &'static [TokenKind] = &[
        TokenKind::EndOfInput, TokenKind::Newline,
        TokenKind::Number, TokenKind::Identifier, TokenKind::StringLiteral,
        TokenKind::Label, TokenKind::Goto, TokenKind::Print, TokenKind::Input,
        TokenKind::Let, TokenKind::If, TokenKind::Then, TokenKind::EndIf,
        TokenKind::While, TokenKind::Repeat, TokenKind::EndWhile,
        TokenKind::Assign, TokenKind::Plus, TokenKind::Minus, TokenKind::Star,
        TokenKind::Slash, TokenKind::Equal, TokenKind::NotEqual,
        TokenKind::Less, TokenKind::LessEqual,
        TokenKind::Greater, TokenKind::GreaterEqual,
    ];

    #[test]
    fn every_keyword_spelling_classifies_to_its_kind() {
        for kind in ALL_KINDS.iter().filter(|k| k.is_keyword()) {
            assert_eq!(Some(*kind), classify(describe(*kind)));
        }
    }

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(Some(TokenKind::While), classify("WHILE"));
        assert_eq!(None, classify("while"));
        assert_eq!(None, classify("While"));
    }

    #[test]
    fn non_keyword_names_do_not_classify() {
        for spelling in ["IDENT", "NUMBER", "EOF", "EQEQ", "PLUS", "IFX", ""].iter() {
            assert_eq!(None, classify(spelling), "{} should not be a keyword", spelling);
        }
    }

    #[test]
    fn descriptions_are_distinct_and_non_empty() {
        let names: HashSet<_> = ALL_KINDS.iter().map(|k| describe(*k)).collect();
        assert_eq!(ALL_KINDS.len(), names.len());
        assert!(names.iter().all(|n| !n.is_empty()));
    }

    #[test]
    fn keyword_and_operator_groups_are_disjoint() {
        assert!(ALL_KINDS.iter().all(|k| !(k.is_keyword() && k.is_operator())));
        assert_eq!(11, ALL_KINDS.iter().filter(|k| k.is_keyword()).count());
        assert_eq!(11, ALL_KINDS.iter().filter(|k| k.is_operator()).count());
    }

    #[test]
    fn display_uses_description() {
        assert_eq!("ENDWHILE", TokenKind::EndWhile.to_string());
        assert_eq!("EQEQ", format!("{}", TokenKind::Equal));
    }
}
