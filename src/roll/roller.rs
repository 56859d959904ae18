use crate::common::Int;
use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};

/// A source of die rolls.
///
/// Every [Rng] is a roller. Tests substitute a fixed sequence of draws.
pub trait Roller {
    /// Rolls one die with faces `1..=sides`. `sides` is always positive.
    fn roll(&mut self, sides: Int) -> Int;

    fn roll_n(&mut self, num: usize, sides: Int) -> Vec<Int> {
        (0..num).map(|_| self.roll(sides)).collect()
    }
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: Int) -> Int {
        self.gen_range(1..=sides)
    }

    fn roll_n(&mut self, num: usize, sides: Int) -> Vec<Int> {
        Uniform::new_inclusive(1, sides)
            .sample_iter(self)
            .take(num)
            .collect()
    }
}

#[cfg(test)]
pub(crate) use step::{SeqRoller, StepRoller};

#[cfg(test)]
mod step {
    use super::*;

    /// Rolls `initial`, `initial + step`, ... wrapped into `1..=sides`.
    pub(crate) struct StepRoller {
        current: Int,
        step: Int,
    }

    impl StepRoller {
        pub fn new(initial: Int, step: Int) -> Self {
            Self {
                current: initial,
                step,
            }
        }
    }

    impl Roller for StepRoller {
        fn roll(&mut self, sides: Int) -> Int {
            let ret = (self.current - 1).rem_euclid(sides) + 1;
            self.current += self.step;
            ret
        }
    }

    /// Replays a fixed list of draws, cycling when it runs out.
    pub(crate) struct SeqRoller {
        values: Vec<Int>,
        next: usize,
    }

    impl SeqRoller {
        pub fn new(values: impl Into<Vec<Int>>) -> Self {
            Self {
                values: values.into(),
                next: 0,
            }
        }
    }

    impl Roller for SeqRoller {
        fn roll(&mut self, sides: Int) -> Int {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            assert!(
                (1..=sides).contains(&value),
                "scripted roll {} does not fit a d{}",
                value,
                sides
            );
            value
        }
    }
}
