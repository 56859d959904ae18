use std::fmt::{self, Write};

pub(crate) use vec1::vec1;

/// The integer type every value, count and total is computed in.
pub type Int = i64;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Sign {
    Pos,
    Neg,
}

impl Sign {
    pub const fn factor(self) -> Int {
        match self {
            Self::Pos => 1,
            Self::Neg => -1,
        }
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::Pos => '+',
            Self::Neg => '-',
        }
    }

    /// Sign of a term written under this sign inside a group written under `outer`.
    pub const fn compose(self, outer: Sign) -> Sign {
        match (self, outer) {
            (Self::Pos, Self::Pos) | (Self::Neg, Self::Neg) => Self::Pos,
            _ => Self::Neg,
        }
    }
}

impl Default for Sign {
    fn default() -> Self {
        Self::Pos
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IgnoreKind {
    Lowest,
    Highest,
}

impl fmt::Display for IgnoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Lowest => '<',
            Self::Highest => '>',
        };
        f.write_char(c)
    }
}

/// A `<` or `>` modifier on a dice term.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct IgnoreClause {
    pub kind: IgnoreKind,
    pub count: Int,
}

impl IgnoreClause {
    pub const fn new(kind: IgnoreKind, count: Int) -> Self {
        Self { kind, count }
    }

    pub const fn lowest(count: Int) -> Self {
        Self::new(IgnoreKind::Lowest, count)
    }

    pub const fn highest(count: Int) -> Self {
        Self::new(IgnoreKind::Highest, count)
    }
}

impl fmt::Display for IgnoreClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.count)
    }
}
