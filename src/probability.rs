//! Exact probabilities.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigUint;

/// An exact rational number in `[0, 1]`.
///
/// Not reduced: `1/2` and `2/4` are distinct representations of the same
/// value, and compare equal.
#[derive(Debug, Clone)]
pub struct Probability {
    numerator: BigUint,
    denominator: BigUint,
}

impl Probability {
    /// Returns `None` unless `0 <= numerator <= denominator` and `denominator > 0`.
    pub fn new(numerator: BigUint, denominator: BigUint) -> Option<Self> {
        if denominator == BigUint::ZERO || numerator > denominator {
            return None;
        }
        Some(Self {
            numerator,
            denominator,
        })
    }

    pub fn zero() -> Self {
        Self {
            numerator: BigUint::ZERO,
            denominator: BigUint::from(1u32),
        }
    }

    pub fn one() -> Self {
        Self {
            numerator: BigUint::from(1u32),
            denominator: BigUint::from(1u32),
        }
    }

    pub fn numerator(&self) -> &BigUint {
        &self.numerator
    }

    pub fn denominator(&self) -> &BigUint {
        &self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == BigUint::ZERO
    }

    pub fn is_one(&self) -> bool {
        self.numerator == self.denominator
    }

    /// The probability as a percentage, rounded down to two decimals.
    ///
    /// 0 and 1 are reported exactly.
    pub fn percent(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        if self.is_one() {
            return 100.0;
        }
        let basis_points = &self.numerator * BigUint::from(10_000u32) / &self.denominator;
        u64::try_from(basis_points).map_or(100.0, |bp| bp as f64 / 100.0)
    }
}

impl PartialEq for Probability {
    fn eq(&self, other: &Self) -> bool {
        &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for Probability {}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Probability {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.percent())
    }
}
