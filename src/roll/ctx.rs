use super::{roller::Roller, tree::*, RResult};
use crate::checked::checked_add;
use crate::common::*;
use crate::parse::{
    ast,
    visit::{AstVisitor, Accept},
};
use std::mem;

pub type DefaultRoller = rand::rngs::ThreadRng;

/// Walks a parsed expression left to right, rolling dice as it meets them.
///
/// The running total is updated after every term, so the first term that
/// leaves the range of [Int] stops the walk.
pub struct RollContext<R = DefaultRoller> {
    roller: R,
    sign: Sign,
    terms: Vec<RollTerm>,
    total: Int,
}

impl<R: Roller> RollContext<R> {
    pub fn new(roller: R) -> Self {
        Self {
            roller,
            sign: Sign::Pos,
            terms: Vec::new(),
            total: 0,
        }
    }

    pub fn eval(&mut self, expr: &ast::Expression) -> RResult<Roll> {
        self.sign = Sign::Pos;
        self.terms.clear();
        self.total = 0;

        if let Some(root) = expr.root() {
            root.accept(self)?;
        }

        let total = mem::take(&mut self.total);
        Ok(Roll::new(mem::take(&mut self.terms), total))
    }

    /// Draws every die of a term that has already been checked by the parser.
    pub(crate) fn roll_dice(&mut self, sign: Sign, dice: &ast::DiceTerm) -> DiceRoll {
        let rest = usize::try_from(dice.count - 1).unwrap_or(0);
        let mut values = vec1![self.roller.roll(dice.sides)];
        values.extend(self.roller.roll_n(rest, dice.sides));
        DiceRoll::new(sign, dice, values)
    }

    fn push(&mut self, term: RollTerm) -> RResult<()> {
        let contribution = term.total()?;
        self.total = checked_add(self.total, contribution)?;
        log::trace!("{:?} contributes {}, total {}", term, contribution, self.total);
        self.terms.push(term);
        Ok(())
    }

    fn with_sign(&mut self, sign: Sign, node: &ast::Node) -> RResult<()> {
        let outer = self.sign;
        self.sign = sign.compose(outer);
        let ret = node.accept(self);
        self.sign = outer;
        ret
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Roller> AstVisitor for RollContext<R> {
    type Output = RResult<()>;

    fn visit_int(&mut self, x: &Int) -> Self::Output {
        self.push(LiteralTerm::new(self.sign, *x).into())
    }

    fn visit_dice(&mut self, dice: &ast::DiceTerm) -> Self::Output {
        let roll = self.roll_dice(self.sign, dice);
        self.push(roll.into())
    }

    fn visit_signed(&mut self, sign: &Sign, inner: &ast::Node) -> Self::Output {
        self.with_sign(*sign, inner)
    }

    fn visit_sum(&mut self, l: &ast::Node, op: &Sign, r: &ast::Node) -> Self::Output {
        l.accept(self)?;
        self.with_sign(*op, r)
    }
}
