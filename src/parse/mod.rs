pub mod ast;
mod lexer;
mod parser;
pub mod visit;

use crate::error::DiceError;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::Parser;

/// Parses `s`, rejecting any dice term (or whole expression) that rolls more than `max_rolls` dice.
pub fn parse(s: &str, max_rolls: usize) -> Result<ast::Expression, DiceError> {
    let parsed = Parser::new(s, max_rolls).and_then(Parser::parse);
    match &parsed {
        Ok(expr) => log::debug!("parsed {:?}: {:?}", s, expr),
        Err(why) => log::debug!("rejected {:?}: {}", s, why),
    }
    parsed
}

/// Like [parse], for input that may not be valid UTF-8.
///
/// The first byte that does not start a valid UTF-8 sequence is reported as an
/// invalid character, unless an earlier character is already invalid.
pub fn parse_bytes(bytes: &[u8], max_rolls: usize) -> Result<ast::Expression, DiceError> {
    match std::str::from_utf8(bytes) {
        Ok(s) => parse(s, max_rolls),
        Err(e) => {
            let valid = &bytes[..e.valid_up_to()];
            // `valid_up_to` always ends on a char boundary.
            let prefix = std::str::from_utf8(valid).unwrap_or_default();
            tokenize(prefix)?;
            Err(DiceError::InvalidCharacter {
                position: e.valid_up_to(),
                found: char::REPLACEMENT_CHARACTER,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bytes() {
        assert!(parse_bytes(b"2d6+1", 100).is_ok());
        assert_eq!(
            parse_bytes(b"2d6+\xff", 100),
            Err(DiceError::InvalidCharacter {
                position: 4,
                found: char::REPLACEMENT_CHARACTER
            })
        );
        assert_eq!(
            parse_bytes(b"2x6+\xff", 100),
            Err(DiceError::InvalidCharacter { position: 1, found: 'x' })
        );
    }
}
