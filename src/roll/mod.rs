mod ctx;
mod roller;
mod stringify;
mod visit;
mod tree;

use crate::error::DiceError;
use crate::parse::ast;

type RResult<T> = Result<T, DiceError>;

pub use ctx::{DefaultRoller, RollContext};
pub use roller::Roller;
pub use stringify::{MarkdownStringifier, Stringify, TraceStringifier};
pub use tree::{DiceRoll, Die, Eval, LiteralTerm, Roll, RollTerm};
pub use visit::{AcceptRoll, VisitRoll};

pub(crate) use stringify::strip_plus;
pub(crate) use tree::sum_terms;

#[cfg(test)]
pub(crate) use roller::{SeqRoller, StepRoller};

pub fn eval<R: Roller>(expr: &ast::Expression, roller: R) -> RResult<Roll> {
    let mut ctx = RollContext::new(roller);
    ctx.eval(expr)
}
