use super::{ast::*, lexer::*};
use crate::common::*;
use crate::error::DiceError;
use std::iter::Peekable;

type PResult<T = Node> = Result<T, DiceError>;

pub struct Parser<'a> {
    tokens: Peekable<std::vec::IntoIter<Token<'a>>>,
    end: usize,
    max_rolls: Int,
    rolls: Int,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str, max_rolls: usize) -> PResult<Self> {
        let tokens = tokenize(s)?;
        Ok(Self {
            tokens: tokens.into_iter().peekable(),
            end: s.len(),
            max_rolls: Int::try_from(max_rolls).unwrap_or(Int::MAX),
            rolls: 0,
        })
    }

    pub fn parse(mut self) -> PResult<Expression> {
        self.parse_expression()
    }

    fn advance(&mut self) -> Option<Token<'a>> {
        self.tokens.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.tokens.peek().map_or(false, |peeked| peeked.kind == kind)
    }

    fn matches_any(&mut self, options: &[TokenKind]) -> bool {
        self.tokens
            .peek()
            .map_or(false, |peeked| options.contains(&peeked.kind))
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<Token<'a>> {
        if self.matches(expected) {
            Ok(self.advance().expect("peeked token exists"))
        } else {
            self.unexpected_token(&[expected])
        }
    }

    fn unexpected_token<T>(&mut self, expected: &[TokenKind]) -> PResult<T> {
        let found = self.advance();
        Err(DiceError::SyntaxError {
            position: found.as_ref().map_or(self.end, |tok| tok.span.start),
            found: found.map(|tok| tok.slice.to_string()),
            expected: expected.iter().map(TokenKind::as_str).collect(),
        })
    }

    fn parse_expression(&mut self) -> PResult<Expression> {
        if self.tokens.peek().is_none() {
            return Ok(Expression::new(None));
        }

        let first = match self.parse_sign() {
            Some(sign) => Node::new_signed(sign, self.parse_term()?),
            None => self.parse_term()?,
        };

        let mut lhs = first;
        while let Some(op) = self.parse_sign() {
            let rhs = self.parse_term()?;
            lhs = Node::new_sum(lhs, op, rhs);
        }

        if self.tokens.peek().is_some() {
            return self.unexpected_token(TokenKind::SIGNS);
        }

        Ok(Expression::new(Some(lhs)))
    }

    fn parse_sign(&mut self) -> Option<Sign> {
        if !self.matches_any(TokenKind::SIGNS) {
            return None;
        }
        match self.advance()?.kind {
            TokenKind::Minus => Some(Sign::Neg),
            _ => Some(Sign::Pos),
        }
    }

    fn parse_term(&mut self) -> PResult {
        match self.tokens.peek().map(|tok| tok.kind) {
            Some(TokenKind::Integer) => {
                let tok = self.consume(TokenKind::Integer)?;
                let value = parse_int(&tok)?;
                if self.matches(TokenKind::Dice) {
                    self.parse_dice(Some(value), tok.span.start)
                } else {
                    Ok(Node::new_literal(value))
                }
            }
            Some(TokenKind::Dice) => {
                let position = self.tokens.peek().map_or(self.end, |tok| tok.span.start);
                self.parse_dice(None, position)
            }
            _ => self.unexpected_token(&[TokenKind::Integer, TokenKind::Dice]),
        }
    }

    fn parse_dice(&mut self, count: Option<Int>, position: usize) -> PResult {
        self.consume(TokenKind::Dice)?;
        let sides = parse_int(&self.consume(TokenKind::Integer)?)?;
        let ignores = self.parse_ignores()?;

        let dice = DiceTerm::with_ignores(count.unwrap_or(1), sides, ignores);
        self.check_dice(&dice, position)?;
        Ok(Node::new_dice(dice))
    }

    fn parse_ignores(&mut self) -> PResult<Vec<IgnoreClause>> {
        let mut ignores = Vec::new();
        while self.matches_any(TokenKind::IGNORES) {
            let kind = match self.advance().map(|tok| tok.kind) {
                Some(TokenKind::GreaterThan) => IgnoreKind::Highest,
                _ => IgnoreKind::Lowest,
            };
            let count = if self.matches(TokenKind::Integer) {
                parse_int(&self.consume(TokenKind::Integer)?)?
            } else {
                1
            };
            ignores.push(IgnoreClause::new(kind, count));
        }
        Ok(ignores)
    }

    /// Rejects dice that cannot be rolled, before anything is rolled.
    fn check_dice(&mut self, dice: &DiceTerm, position: usize) -> PResult<()> {
        if dice.count <= 0 {
            return Err(DiceError::NonPositiveRolls { position });
        }
        if dice.sides <= 0 {
            return Err(DiceError::NonPositiveSides { position });
        }

        let max = self.max_rolls as usize;
        let too_many = |rolls| DiceError::TooManyRolls {
            position,
            rolls,
            max,
        };
        if dice.count > self.max_rolls {
            return Err(too_many(dice.count));
        }
        self.rolls = match self.rolls.checked_add(dice.count) {
            Some(rolls) if rolls <= self.max_rolls => rolls,
            Some(rolls) => return Err(too_many(rolls)),
            None => return Err(too_many(Int::MAX)),
        };

        let ignores = dice.total_ignored().unwrap_or(Int::MAX);
        if ignores >= dice.count {
            return Err(DiceError::TooManyIgnores {
                position,
                ignores,
                rolls: dice.count,
            });
        }
        Ok(())
    }
}

/// Integer tokens are all digits, so the only way to fail is leaving the range of [Int].
fn parse_int(tok: &Token<'_>) -> PResult<Int> {
    tok.slice
        .parse()
        .map_err(|_| DiceError::LiteralOutOfRange {
            position: tok.span.start,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! dice {
        ($num:expr, $sides:expr $(; $($op:expr),+)?) => {
            Node::new_dice(DiceTerm::with_ignores($num, $sides, vec![$($($op),+)?]))
        };
    }

    fn parse(s: &str) -> PResult<Expression> {
        Parser::new(s, 1000)?.parse()
    }

    fn check(s: &str, expected: Node) {
        let parsed = parse(s).unwrap();
        assert_eq!(parsed.root, Some(expected));
    }

    fn check_err(s: &str, expected: DiceError) {
        assert_eq!(parse(s), Err(expected));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("  \t").unwrap().is_empty());
    }

    #[test]
    fn test_parse_literal() {
        check("32", Node::new_literal(32));
        check("-7", Node::new_signed(Sign::Neg, Node::new_literal(7)));
        check("+0", Node::new_signed(Sign::Pos, Node::new_literal(0)));
        check("9223372036854775807", Node::new_literal(Int::MAX));
    }

    #[test]
    fn test_parse_dice() {
        check("1d20", dice!(1, 20));
        check("d4", dice!(1, 4));
        check("D4", dice!(1, 4));
        check("4d6<", dice!(4, 6; IgnoreClause::lowest(1)));
        check(
            "10d4<2>>3",
            dice!(
                10, 4;
                IgnoreClause::lowest(2),
                IgnoreClause::highest(1),
                IgnoreClause::highest(3)
            ),
        );
    }

    #[test]
    fn test_parse_sum() {
        check(
            "2d6+3d8-1",
            Node::new_sum(
                Node::new_sum(dice!(2, 6), Sign::Pos, dice!(3, 8)),
                Sign::Neg,
                Node::new_literal(1),
            ),
        );
        check(
            "-d20 + 5",
            Node::new_sum(
                Node::new_signed(Sign::Neg, dice!(1, 20)),
                Sign::Pos,
                Node::new_literal(5),
            ),
        );
    }

    #[test]
    fn test_parse_syntax_errors() {
        check_err(
            "d",
            DiceError::SyntaxError {
                position: 1,
                found: None,
                expected: vec!["<integer>"],
            },
        );
        check_err(
            "2d",
            DiceError::SyntaxError {
                position: 2,
                found: None,
                expected: vec!["<integer>"],
            },
        );
        check_err(
            "1+",
            DiceError::SyntaxError {
                position: 2,
                found: None,
                expected: vec!["<integer>", "'d'"],
            },
        );
        check_err(
            "--2",
            DiceError::SyntaxError {
                position: 1,
                found: Some("-".to_string()),
                expected: vec!["<integer>", "'d'"],
            },
        );
        check_err(
            "3<1",
            DiceError::SyntaxError {
                position: 1,
                found: Some("<".to_string()),
                expected: vec!["'+'", "'-'"],
            },
        );
        check_err(
            "2d6 4",
            DiceError::SyntaxError {
                position: 4,
                found: Some("4".to_string()),
                expected: vec!["'+'", "'-'"],
            },
        );
        check_err(
            "dd6",
            DiceError::SyntaxError {
                position: 1,
                found: Some("d".to_string()),
                expected: vec!["<integer>"],
            },
        );
    }

    #[test]
    fn test_parse_invalid_character_wins() {
        // The whole string is tokenized before the grammar is checked.
        check_err("d+!", DiceError::InvalidCharacter { position: 2, found: '!' });
    }

    #[test]
    fn test_parse_dice_errors() {
        check_err("0d6", DiceError::NonPositiveRolls { position: 0 });
        check_err("1+6d0", DiceError::NonPositiveSides { position: 2 });
        check_err(
            "1d6<1",
            DiceError::TooManyIgnores {
                position: 0,
                ignores: 1,
                rolls: 1,
            },
        );
        check_err(
            "3d6<>>",
            DiceError::TooManyIgnores {
                position: 0,
                ignores: 3,
                rolls: 3,
            },
        );
        check_err(
            "2d6<9223372036854775807>",
            DiceError::TooManyIgnores {
                position: 0,
                ignores: Int::MAX,
                rolls: 2,
            },
        );
        assert!(parse("3d6<>").is_ok());
        assert!(parse("2d6<0").is_ok());
    }

    #[test]
    fn test_parse_roll_limit() {
        check_err(
            "100000000000d6",
            DiceError::TooManyRolls {
                position: 0,
                rolls: 100_000_000_000,
                max: 1000,
            },
        );
        assert!(parse("1000d6").is_ok());
        check_err(
            "600d6+d4+400d6",
            DiceError::TooManyRolls {
                position: 9,
                rolls: 1001,
                max: 1000,
            },
        );
    }

    #[test]
    fn test_parse_literal_overflow() {
        check_err(
            "9223372036854775808",
            DiceError::LiteralOutOfRange { position: 0 },
        );
        check_err(
            "1+d99999999999999999999",
            DiceError::LiteralOutOfRange { position: 3 },
        );
    }
}
