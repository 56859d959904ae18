//! Integer arithmetic that reports leaving the range of [Int] instead of wrapping.

use crate::common::Int;

#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Flow {
    #[error("integer overflow")]
    Overflow,
    #[error("integer underflow")]
    Underflow,
}

pub type FResult<T = Int> = Result<T, Flow>;

pub fn checked_add(a: Int, b: Int) -> FResult {
    a.checked_add(b).ok_or(if b > 0 {
        Flow::Overflow
    } else {
        Flow::Underflow
    })
}

pub fn checked_sub(a: Int, b: Int) -> FResult {
    a.checked_sub(b).ok_or(if b < 0 {
        Flow::Overflow
    } else {
        Flow::Underflow
    })
}

pub fn checked_mul(a: Int, b: Int) -> FResult {
    // The result is negative exactly when the operands disagree in sign.
    a.checked_mul(b).ok_or(if (a < 0) == (b < 0) {
        Flow::Overflow
    } else {
        Flow::Underflow
    })
}

/// Checked sum of an iterator of values.
pub fn checked_sum<I: IntoIterator<Item = Int>>(values: I) -> FResult {
    values.into_iter().try_fold(0, checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(checked_add(2, 3), Ok(5));
        assert_eq!(checked_add(Int::MAX - 1, 1), Ok(Int::MAX));
        assert_eq!(checked_add(Int::MAX, 1), Err(Flow::Overflow));
        assert_eq!(checked_add(Int::MIN, -1), Err(Flow::Underflow));
        assert_eq!(checked_add(Int::MIN, Int::MAX), Ok(-1));
    }

    #[test]
    fn test_sub() {
        assert_eq!(checked_sub(2, 3), Ok(-1));
        assert_eq!(checked_sub(Int::MIN + 1, 1), Ok(Int::MIN));
        assert_eq!(checked_sub(Int::MIN, 1), Err(Flow::Underflow));
        assert_eq!(checked_sub(Int::MAX, -1), Err(Flow::Overflow));
        assert_eq!(checked_sub(0, Int::MIN), Err(Flow::Overflow));
    }

    #[test]
    fn test_mul() {
        assert_eq!(checked_mul(-4, 5), Ok(-20));
        assert_eq!(checked_mul(Int::MAX, -1), Ok(-Int::MAX));
        assert_eq!(checked_mul(Int::MIN, -1), Err(Flow::Overflow));
        assert_eq!(checked_mul(Int::MIN, 1), Ok(Int::MIN));
        assert_eq!(checked_mul(Int::MAX, 2), Err(Flow::Overflow));
        assert_eq!(checked_mul(Int::MAX, -2), Err(Flow::Underflow));
        assert_eq!(checked_mul(Int::MIN, 0), Ok(0));
    }

    #[test]
    fn test_sum() {
        assert_eq!(checked_sum([1, 2, 3]), Ok(6));
        assert_eq!(checked_sum(Vec::new()), Ok(0));
        assert_eq!(checked_sum([Int::MAX, 1, -1]), Err(Flow::Overflow));
    }
}
