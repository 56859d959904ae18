use crate::checked::Flow;
use crate::common::Int;
use std::fmt;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DiceError {
    #[error("invalid character {found:?} at position {position}")]
    InvalidCharacter { position: usize, found: char },
    #[error(
        "syntax error at position {position}: found {}, expected {}",
        fmt_found(.found),
        fmt_expected(.expected)
    )]
    SyntaxError {
        position: usize,
        found: Option<String>,
        expected: Vec<&'static str>,
    },
    #[error("number of rolls must be positive (at position {position})")]
    NonPositiveRolls { position: usize },
    #[error("number of sides must be positive (at position {position})")]
    NonPositiveSides { position: usize },
    #[error("cannot ignore {ignores} of {rolls} rolls (at position {position})")]
    TooManyIgnores {
        position: usize,
        ignores: Int,
        rolls: Int,
    },
    #[error("too many dice rolled: {rolls} exceeds the limit of {max} (at position {position})")]
    TooManyRolls {
        position: usize,
        rolls: Int,
        max: usize,
    },
    #[error("integer literal out of range at position {position}")]
    LiteralOutOfRange { position: usize },
    #[error("integer overflow")]
    Overflow,
}

/// The payload-free discriminant of a [DiceError].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    SyntaxError,
    NRolls,
    Dice,
    Ignore,
    RollsTooLarge,
    Overflow,
}

impl DiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::SyntaxError { .. } => ErrorKind::SyntaxError,
            Self::NonPositiveRolls { .. } => ErrorKind::NRolls,
            Self::NonPositiveSides { .. } => ErrorKind::Dice,
            Self::TooManyIgnores { .. } => ErrorKind::Ignore,
            Self::TooManyRolls { .. } => ErrorKind::RollsTooLarge,
            Self::LiteralOutOfRange { .. } | Self::Overflow => ErrorKind::Overflow,
        }
    }

    /// Whether the error is a property of the input text alone.
    ///
    /// Static errors are found before any die is rolled, so the same string
    /// will always fail the same way. This includes a literal too large for
    /// [Int], even though it shares [ErrorKind::Overflow]. [DiceError::Overflow]
    /// depends on the values drawn and can come and go between calls.
    pub fn is_static(&self) -> bool {
        !matches!(self, Self::Overflow)
    }
}

impl From<Flow> for DiceError {
    fn from(_: Flow) -> Self {
        Self::Overflow
    }
}

fn fmt_found(found: &Option<String>) -> String {
    match found {
        Some(s) => format!("{:?}", s),
        None => String::from("end of input"),
    }
}

fn fmt_expected<'a>(expected: &'a [&'static str]) -> impl fmt::Display + 'a {
    struct Expected<'a>(&'a [&'static str]);

    impl fmt::Display for Expected<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.0 {
                [] => f.write_str("nothing"),
                [a] => f.write_str(a),
                [a, b] => write!(f, "{} or {}", a, b),
                s => write!(f, "{}, or {}", s[..s.len() - 1].join(", "), s[s.len() - 1]),
            }
        }
    }

    Expected(expected)
}
