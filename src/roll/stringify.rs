use crate::common::{Int, Sign};
use super::tree::{DiceRoll, Die, LiteralTerm, Roll};
use super::visit::{AcceptRoll, VisitRoll};

/// Renders a [Roll] back into text with the rolled values filled in.
///
/// Each term starts with its sign, the first one included. Literals render as
/// themselves and dice as the `+`-joined list of every value drawn, in draw
/// order, inside parentheses. Implementors only choose how single values look.
pub trait Stringify {
    fn stringify<A: AcceptRoll>(&mut self, a: &A) -> String {
        a.accept(self)
    }

    fn str_roll(&mut self, roll: &Roll) -> String {
        roll.terms()
            .iter()
            .map(|term| self.stringify(term))
            .collect()
    }

    /// The roll followed by its total, without a leading `+`.
    fn str_result(&mut self, roll: &Roll) -> String {
        let trace = self.str_roll(roll);
        format!("{} = {}", strip_plus(&trace), roll.total())
    }

    fn str_literal(&mut self, lit: &LiteralTerm) -> String {
        if lit.value < 0 && lit.sign == Sign::Pos {
            lit.value.to_string()
        } else {
            format!("{}{}", lit.sign, lit.value)
        }
    }

    fn str_dice(&mut self, dice: &DiceRoll) -> String {
        let the_dice = dice
            .dice
            .iter()
            .map(|die| self.str_die(die, dice.sides))
            .collect::<Vec<_>>()
            .join("+");
        format!("{}({})", dice.sign, the_dice)
    }

    fn str_die(&mut self, die: &Die, sides: Int) -> String;
}

pub(crate) fn strip_plus(trace: &str) -> &str {
    trace.strip_prefix('+').unwrap_or(trace)
}

/// Plain text, ignored dice in brackets: `+(4+[1]+6)-2`.
#[derive(Default)]
pub struct TraceStringifier;

impl TraceStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for TraceStringifier {
    fn str_die(&mut self, die: &Die, _sides: Int) -> String {
        if die.kept {
            die.value.to_string()
        } else {
            format!("[{}]", die.value)
        }
    }
}

/// Markdown, ignored dice struck through and critical values in bold.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stringify for MarkdownStringifier {
    fn str_result(&mut self, roll: &Roll) -> String {
        let trace = self.str_roll(roll);
        format!("{} = `{}`", strip_plus(&trace), roll.total())
    }

    fn str_die(&mut self, die: &Die, sides: Int) -> String {
        let bold = die.value == 1 || die.value == sides;
        let ret = if bold {
            format!("**{}**", die.value)
        } else {
            die.value.to_string()
        };
        if die.kept {
            ret
        } else {
            format!("~~{}~~", ret)
        }
    }
}

impl<S: ?Sized> VisitRoll for S
where
    S: Stringify,
{
    type Output = String;

    fn visit_roll(&mut self, x: &Roll) -> Self::Output {
        self.str_roll(x)
    }

    fn visit_literal(&mut self, x: &LiteralTerm) -> Self::Output {
        self.str_literal(x)
    }

    fn visit_dice(&mut self, x: &DiceRoll) -> Self::Output {
        self.str_dice(x)
    }
}
