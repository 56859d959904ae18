use crate::common::*;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expression {
    pub(crate) root: Option<Node>,
}

impl Expression {
    pub(crate) fn new(root: Option<Node>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Literal(Int),
    Dice(DiceTerm),
    Signed(Sign, Box<Node>),
    Sum(Box<Node>, Sign, Box<Node>),
}

impl Node {
    pub fn new_literal(x: Int) -> Self {
        Self::Literal(x)
    }

    pub fn new_dice(dice: DiceTerm) -> Self {
        Self::Dice(dice)
    }

    pub fn new_signed(sign: Sign, inner: Node) -> Self {
        Self::Signed(sign, Box::new(inner))
    }

    pub fn new_sum(left: Node, op: Sign, right: Node) -> Self {
        Self::Sum(Box::new(left), op, Box::new(right))
    }
}

/// `count d sides` followed by any number of ignore clauses.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceTerm {
    pub count: Int,
    pub sides: Int,
    pub ignores: Vec<IgnoreClause>,
}

impl DiceTerm {
    pub fn new(count: Int, sides: Int) -> Self {
        Self::with_ignores(count, sides, Vec::new())
    }

    pub fn with_ignores(count: Int, sides: Int, ignores: Vec<IgnoreClause>) -> Self {
        Self {
            count,
            sides,
            ignores,
        }
    }

    /// Total number of rolls dropped with the given kind, `None` on overflow.
    pub fn ignored(&self, kind: IgnoreKind) -> Option<Int> {
        self.ignores
            .iter()
            .filter(|clause| clause.kind == kind)
            .try_fold(0 as Int, |acc, clause| acc.checked_add(clause.count))
    }

    /// Total number of rolls dropped by every clause, `None` on overflow.
    pub fn total_ignored(&self) -> Option<Int> {
        self.ignored(IgnoreKind::Lowest)?
            .checked_add(self.ignored(IgnoreKind::Highest)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_counts() {
        let dice = DiceTerm::with_ignores(
            6,
            6,
            vec![
                IgnoreClause::lowest(1),
                IgnoreClause::highest(2),
                IgnoreClause::lowest(1),
            ],
        );
        assert_eq!(dice.ignored(IgnoreKind::Lowest), Some(2));
        assert_eq!(dice.ignored(IgnoreKind::Highest), Some(2));
        assert_eq!(dice.total_ignored(), Some(4));
        assert_eq!(DiceTerm::new(2, 6).total_ignored(), Some(0));
    }

    #[test]
    fn test_ignored_overflow() {
        let dice = DiceTerm::with_ignores(
            2,
            6,
            vec![IgnoreClause::lowest(Int::MAX), IgnoreClause::highest(1)],
        );
        assert_eq!(dice.ignored(IgnoreKind::Lowest), Some(Int::MAX));
        assert_eq!(dice.total_ignored(), None);
    }
}
