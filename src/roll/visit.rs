use super::tree::*;

pub trait VisitRoll {
    type Output;

    fn visit<A: AcceptRoll>(&mut self, a: &A) -> Self::Output {
        a.accept(self)
    }

    fn visit_roll(&mut self, x: &Roll) -> Self::Output;

    fn visit_literal(&mut self, x: &LiteralTerm) -> Self::Output;

    fn visit_dice(&mut self, x: &DiceRoll) -> Self::Output;
}

#[enum_dispatch::enum_dispatch]
pub trait AcceptRoll: Sized {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output;
}

impl AcceptRoll for Roll {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_roll(self)
    }
}

impl AcceptRoll for LiteralTerm {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_literal(self)
    }
}

impl AcceptRoll for DiceRoll {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_dice(self)
    }
}
