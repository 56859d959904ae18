use super::stringify::{Stringify, TraceStringifier};
use super::visit::{AcceptRoll, VisitRoll};
use super::RResult;
use crate::checked::{checked_add, checked_mul, checked_sum};
use crate::common::*;
use crate::parse::ast::DiceTerm;
use crate::Outcome;
use std::cmp::Reverse;

#[enum_dispatch::enum_dispatch]
pub trait Eval {
    fn sign(&self) -> Sign;

    /// The unsigned size of the term, before its sign is applied.
    fn magnitude(&self) -> RResult<Int>;

    fn total(&self) -> RResult<Int> {
        Ok(checked_mul(self.magnitude()?, self.sign().factor())?)
    }
}

/// Every term of an expression after rolling, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll {
    pub(crate) terms: Vec<RollTerm>,
    pub(crate) total: Int,
}

impl Roll {
    pub(crate) fn new(terms: Vec<RollTerm>, total: Int) -> Self {
        Self { terms, total }
    }

    pub fn total(&self) -> Int {
        self.total
    }

    pub fn terms(&self) -> &[RollTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn into_terms(self) -> Vec<RollTerm> {
        self.terms
    }

    /// Renders the roll with the given stringifier.
    pub fn render<S: Stringify + Default>(&self) -> String {
        S::default().stringify(self)
    }

    pub fn outcome(&self) -> Outcome {
        Outcome {
            value: self.total,
            trace: self.render::<TraceStringifier>(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Eval, AcceptRoll)]
pub enum RollTerm {
    Literal(LiteralTerm),
    Dice(DiceRoll),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LiteralTerm {
    pub sign: Sign,
    pub value: Int,
}

impl LiteralTerm {
    pub fn new(sign: Sign, value: Int) -> Self {
        Self { sign, value }
    }
}

impl Eval for LiteralTerm {
    fn sign(&self) -> Sign {
        self.sign
    }

    fn magnitude(&self) -> RResult<Int> {
        Ok(self.value)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Die {
    pub value: Int,
    pub kept: bool,
}

impl Die {
    pub fn new(value: Int) -> Self {
        Self { value, kept: true }
    }

    pub fn discard(&mut self) {
        self.kept = false;
    }
}

/// One dice term: every value drawn, in draw order, with the ignored ones marked.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DiceRoll {
    pub sign: Sign,
    pub sides: Int,
    pub ignores: Vec<IgnoreClause>,
    pub dice: NonEmpty<Die>,
}

impl DiceRoll {
    pub(crate) fn new(sign: Sign, term: &DiceTerm, values: NonEmpty<Int>) -> Self {
        let mut ret = Self {
            sign,
            sides: term.sides,
            ignores: term.ignores.clone(),
            dice: values.mapped(Die::new),
        };
        for clause in &term.ignores {
            ret.drop_extreme(*clause);
        }
        ret
    }

    /// Drops the `count` lowest (or highest) dice still kept.
    ///
    /// Equal values are dropped in draw order.
    fn drop_extreme(&mut self, clause: IgnoreClause) {
        let mut order: Vec<usize> = (0..self.dice.len())
            .filter(|&i| self.dice[i].kept)
            .collect();
        match clause.kind {
            IgnoreKind::Lowest => order.sort_by_key(|&i| (self.dice[i].value, i)),
            IgnoreKind::Highest => order.sort_by_key(|&i| (Reverse(self.dice[i].value), i)),
        }
        let count = usize::try_from(clause.count).unwrap_or(0);
        for i in order.into_iter().take(count) {
            self.dice[i].discard();
        }
    }

    pub fn kept(&self) -> impl Iterator<Item = Int> + '_ {
        self.dice.iter().filter(|die| die.kept).map(|die| die.value)
    }

    pub fn dropped(&self) -> impl Iterator<Item = Int> + '_ {
        self.dice.iter().filter(|die| !die.kept).map(|die| die.value)
    }
}

impl Eval for DiceRoll {
    fn sign(&self) -> Sign {
        self.sign
    }

    fn magnitude(&self) -> RResult<Int> {
        Ok(checked_sum(self.kept())?)
    }
}

/// Sums the signed totals of `terms`.
pub(crate) fn sum_terms<'a, I>(terms: I) -> RResult<Int>
where
    I: IntoIterator<Item = &'a RollTerm>,
{
    terms
        .into_iter()
        .try_fold(0, |acc, term| Ok(checked_add(acc, term.total()?)?))
}
