//! Rolls dice written in a compact notation such as `3d6+2d4<1-5`.
//!
//! An expression is a signed sum of terms. A term is either an integer or a
//! dice group `[count]d<sides>`, optionally followed by ignore clauses: `<n`
//! drops the `n` lowest rolls of the group and `>n` the `n` highest (`n`
//! defaults to 1). Every call returns the total together with a trace that
//! shows each value rolled, ignored ones in brackets:
//!
//! ```
//! let outcome = gdice::roll("4d6<").unwrap();
//! assert!((3..=18).contains(&outcome.value));
//! ```

pub mod checked;
mod common;
mod error;
pub mod parse;
pub mod roll;
pub mod sheet;

use std::fmt::Write;

pub use common::*;
pub use error::{DiceError, ErrorKind};
pub use roll::{MarkdownStringifier, Roll, RollContext, Roller, Stringify, TraceStringifier};
pub use sheet::RollSheet;

/// Largest number of dice a single expression may roll unless configured otherwise.
pub const DEFAULT_MAX_ROLLS: usize = 100_000;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RollConfig {
    /// Limit on the dice of one term and on the dice of a whole expression.
    pub max_rolls: usize,
}

impl RollConfig {
    pub fn new(max_rolls: usize) -> Self {
        Self { max_rolls }
    }
}

impl Default for RollConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ROLLS)
    }
}

/// The result of one evaluation.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Outcome {
    pub value: Int,
    /// Every term with its sign, dice replaced by what they rolled, e.g. `+(3+[1]+5)-2`.
    pub trace: String,
}

impl Outcome {
    /// Formats the outcome for display, one line ending in `\n`.
    ///
    /// The verbose form is the trace (without a leading `+`) followed by
    /// ` = value`, the terse form just the value.
    pub fn display(&self, verbose: bool) -> String {
        let mut s = String::new();
        if verbose {
            s.push_str(roll::strip_plus(&self.trace));
            s.push_str(" = ");
        }
        let _ = writeln!(s, "{}", self.value);
        s
    }
}

/// Rolls `expr` with the thread-local generator and the default configuration.
pub fn roll(expr: &str) -> Result<Outcome, DiceError> {
    roll_with(expr, rand::thread_rng(), &RollConfig::default())
}

/// Rolls `expr`, drawing every die from `roller`.
///
/// Nothing is drawn unless the whole expression is valid.
pub fn roll_with<R: Roller>(
    expr: &str,
    roller: R,
    config: &RollConfig,
) -> Result<Outcome, DiceError> {
    let ast = parse::parse(expr, config.max_rolls)?;
    let outcome = roll::eval(&ast, roller)?.outcome();
    log::debug!("rolled {:?}: {} = {}", expr, outcome.trace, outcome.value);
    Ok(outcome)
}

/// Like [roll_with], for input that may not be valid UTF-8.
pub fn roll_bytes_with<R: Roller>(
    expr: &[u8],
    roller: R,
    config: &RollConfig,
) -> Result<Outcome, DiceError> {
    let ast = parse::parse_bytes(expr, config.max_rolls)?;
    Ok(roll::eval(&ast, roller)?.outcome())
}

/// Checks `expr` without rolling anything.
///
/// A string that passes can still fail to roll with [DiceError::Overflow],
/// depending on the values drawn.
pub fn validate(expr: &str, config: &RollConfig) -> Result<(), DiceError> {
    parse::parse(expr, config.max_rolls).map(|_| ())
}
