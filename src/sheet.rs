//! Several inputs rolled together into one total.
//!
//! A sheet holds, in order, any mix of dice expressions, plain dice groups
//! given as a number of sides and a signed number of rolls, and constant
//! modifiers. Groups and modifiers of zero contribute nothing.

use crate::checked::checked_add;
use crate::common::*;
use crate::error::DiceError;
use crate::parse::{self, ast::DiceTerm};
use crate::roll::{sum_terms, Roll, RollContext, RollTerm, Roller, LiteralTerm};
use crate::{Outcome, RollConfig};

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Entry {
    Expression(String),
    Group { sides: Int, rolls: Int },
    Modifier(Int),
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct RollSheet {
    entries: Vec<Entry>,
}

impl RollSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expression(mut self, expr: impl Into<String>) -> Self {
        self.entries.push(Entry::Expression(expr.into()));
        self
    }

    /// `rolls` dice with `sides` faces each, subtracted when `rolls` is negative.
    pub fn group(mut self, sides: Int, rolls: Int) -> Self {
        self.entries.push(Entry::Group { sides, rolls });
        self
    }

    pub fn modifier(mut self, modifier: Int) -> Self {
        self.entries.push(Entry::Modifier(modifier));
        self
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Checks every entry without rolling anything.
    ///
    /// Errors in a group report the index of its entry as the position.
    pub fn validate(&self, config: &RollConfig) -> Result<(), DiceError> {
        for (index, entry) in self.entries.iter().enumerate() {
            match entry {
                Entry::Expression(expr) => {
                    parse::parse(expr, config.max_rolls)?;
                }
                Entry::Group { sides, rolls } => {
                    group_term(index, *sides, *rolls, config)?;
                }
                Entry::Modifier(_) => {}
            }
        }
        Ok(())
    }

    /// Rolls every entry in order.
    ///
    /// Returns `None` when no entry contributed a term, so there is nothing to show.
    pub fn roll<R: Roller>(
        &self,
        roller: R,
        config: &RollConfig,
    ) -> Result<Option<Outcome>, DiceError> {
        // Nothing is drawn for a sheet with any invalid entry.
        self.validate(config)?;

        let mut ctx = RollContext::new(roller);
        let mut terms: Vec<RollTerm> = Vec::new();
        let mut total: Int = 0;

        for (index, entry) in self.entries.iter().enumerate() {
            let added: Vec<RollTerm> = match entry {
                Entry::Expression(expr) => {
                    let ast = parse::parse(expr, config.max_rolls)?;
                    ctx.eval(&ast)?.into_terms()
                }
                Entry::Group { sides, rolls } => match group_term(index, *sides, *rolls, config)? {
                    Some((sign, dice)) => vec![ctx.roll_dice(sign, &dice).into()],
                    None => Vec::new(),
                },
                Entry::Modifier(0) => Vec::new(),
                Entry::Modifier(m) => {
                    let sign = if *m < 0 { Sign::Neg } else { Sign::Pos };
                    vec![modifier_term(sign, *m).into()]
                }
            };
            total = checked_add(total, sum_terms(&added)?)?;
            terms.extend(added);
        }

        if terms.is_empty() {
            return Ok(None);
        }
        let outcome = Roll::new(terms, total).outcome();
        log::debug!("rolled sheet: {} = {}", outcome.trace, outcome.value);
        Ok(Some(outcome))
    }
}

/// The dice term for a group, or `None` when the group is empty.
fn group_term(
    index: usize,
    sides: Int,
    rolls: Int,
    config: &RollConfig,
) -> Result<Option<(Sign, DiceTerm)>, DiceError> {
    if sides == 0 || rolls == 0 {
        return Ok(None);
    }
    if sides < 0 {
        return Err(DiceError::NonPositiveSides { position: index });
    }
    let count = rolls.unsigned_abs();
    if count > config.max_rolls as u64 {
        return Err(DiceError::TooManyRolls {
            position: index,
            rolls: Int::try_from(count).unwrap_or(Int::MAX),
            max: config.max_rolls,
        });
    }
    let sign = if rolls < 0 { Sign::Neg } else { Sign::Pos };
    // Bounded by `max_rolls` just above.
    Ok(Some((sign, DiceTerm::new(count as Int, sides))))
}

/// `Int::MIN` has no positive counterpart, so it is kept as a negative value.
fn modifier_term(sign: Sign, m: Int) -> LiteralTerm {
    match m.checked_abs() {
        Some(abs) => LiteralTerm::new(sign, abs),
        None => LiteralTerm::new(Sign::Pos, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::roll::SeqRoller;

    fn config() -> RollConfig {
        RollConfig::new(100)
    }

    fn roll_seq(sheet: &RollSheet, rolls: &[Int]) -> Result<Option<Outcome>, DiceError> {
        sheet.roll(SeqRoller::new(rolls.to_vec()), &config())
    }

    #[test]
    fn test_sheet_empty() {
        assert_eq!(roll_seq(&RollSheet::new(), &[1]), Ok(None));
        let sheet = RollSheet::new()
            .expression("")
            .group(6, 0)
            .group(0, 3)
            .modifier(0);
        assert_eq!(roll_seq(&sheet, &[1]), Ok(None));
    }

    #[test]
    fn test_sheet_in_order() {
        let sheet = RollSheet::new()
            .expression("d20+1")
            .group(6, 2)
            .modifier(-3)
            .group(4, -1);
        let outcome = roll_seq(&sheet, &[12, 3, 5, 2]).unwrap().unwrap();
        assert_eq!(outcome.trace, "+(12)+1+(3+5)-3-(2)");
        assert_eq!(outcome.value, 12 + 1 + 3 + 5 - 3 - 2);
        assert_eq!(outcome.display(true), "(12)+1+(3+5)-3-(2) = 16\n");
    }

    #[test]
    fn test_sheet_modifier_bounds() {
        let sheet = RollSheet::new().modifier(Int::MIN);
        let outcome = roll_seq(&sheet, &[1]).unwrap().unwrap();
        assert_eq!(outcome.value, Int::MIN);
        assert_eq!(outcome.trace, "-9223372036854775808");

        let sheet = RollSheet::new().modifier(Int::MIN).group(6, -1);
        assert_eq!(roll_seq(&sheet, &[1]), Err(DiceError::Overflow));
    }

    #[test]
    fn test_sheet_errors() {
        let sheet = RollSheet::new().modifier(2).group(-6, 1);
        assert_eq!(
            roll_seq(&sheet, &[1]),
            Err(DiceError::NonPositiveSides { position: 1 })
        );
        let sheet = RollSheet::new().group(6, -101);
        assert_eq!(
            roll_seq(&sheet, &[1]).map_err(|e| e.kind()),
            Err(ErrorKind::RollsTooLarge)
        );
        let sheet = RollSheet::new().group(6, 1).expression("2d");
        assert_eq!(
            sheet.validate(&config()).map_err(|e| e.kind()),
            Err(ErrorKind::SyntaxError)
        );
    }

    #[test]
    fn test_sheet_overflow_across_entries() {
        let sheet = RollSheet::new()
            .expression("9223372036854775807")
            .group(6, 1);
        assert_eq!(roll_seq(&sheet, &[1]), Err(DiceError::Overflow));
        let sheet = RollSheet::new()
            .expression("9223372036854775806")
            .group(6, 1);
        assert_eq!(
            roll_seq(&sheet, &[1]).unwrap().map(|o| o.value),
            Some(Int::MAX)
        );
    }
}
