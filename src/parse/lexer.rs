use crate::error::DiceError;
use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[token("d")]
    #[token("D")]
    Dice,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[token("<")]
    LessThan,
    #[token(">")]
    GreaterThan,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const SIGNS: &'static [Self] = &[Self::Plus, Self::Minus];

    pub const IGNORES: &'static [Self] = &[Self::LessThan, Self::GreaterThan];

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Dice => "'d'",
            Plus => "'+'",
            Minus => "'-'",
            LessThan => "'<'",
            GreaterThan => "'>'",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub slice: &'a str,
}

/// Splits `s` into tokens, failing on the first character that starts no token.
pub fn tokenize(s: &str) -> Result<Vec<Token<'_>>, DiceError> {
    let mut lex = TokenKind::lexer(s);
    let mut tokens = Vec::new();
    while let Some(kind) = lex.next() {
        let span = lex.span();
        if kind == TokenKind::Error {
            // Every token is ASCII, so an error always starts on a char boundary.
            let found = s[span.start..]
                .chars()
                .next()
                .unwrap_or(char::REPLACEMENT_CHARACTER);
            return Err(DiceError::InvalidCharacter {
                position: span.start,
                found,
            });
        }
        tokens.push(Token {
            kind,
            span,
            slice: lex.slice(),
        });
    }
    Ok(tokens)
}
