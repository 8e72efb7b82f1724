//! Magnitude buckets of deposit statistics.
//!
//! A pool keeps a fixed list of [`PoolBucket`]s. Each bucket covers a
//! half-open amount range `[lo, hi)` and accumulates the exact `count`,
//! `Σ amount`, and `Σ amount²` of the deposits that fall into it.
//!
//! # Overlapping ranges
//!
//! The standard [`BucketSchema`] is *not* a partition:
//!
//! ```text
//! bucket 0   : [0,     U)
//! bucket 1+i : [2^i·U, 2^i·16·U)    for i = 0..levels, last one unbounded
//! ```
//!
//! Every bucket is 16× wide while consecutive lower bounds only double, so
//! amounts from `8·U` up to the top levels lie in four buckets at once. Wider buckets give
//! more samples; narrower ones keep the samples homogeneous enough for the
//! central limit approximation.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// Number of base units in one canonical chain unit (12 decimals).
pub const CHAIN_UNIT: u64 = 1_000_000_000_000;

/// Number of doubling levels above the sub-unit bucket in the standard schema.
pub const STANDARD_LEVELS: u32 = 32;

/// Converts a big integer to `f64`, saturating to infinity when out of range.
pub(crate) fn big_to_f64(value: &BigUint) -> f64 {
    value.to_f64().unwrap_or(f64::INFINITY)
}

/// Half-open amount range `[lo, hi)`. `hi == None` means unbounded above.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BucketRange {
    pub lo: BigUint,
    pub hi: Option<BigUint>,
}

impl BucketRange {
    pub fn new(lo: BigUint, hi: Option<BigUint>) -> Self {
        Self { lo, hi }
    }
}

impl fmt::Display for BucketRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hi {
            Some(hi) => write!(f, "[{}, {})", self.lo, hi),
            None => write!(f, "[{}, ∞)", self.lo),
        }
    }
}

/// Immutable layout of the buckets a pool is built with.
///
/// A schema is configuration: it is created once and copied into each pool
/// on construction. Pools never add, remove, or resize buckets afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BucketSchema {
    ranges: Vec<BucketRange>,
}

impl BucketSchema {
    /// Builds the overlapping magnitude schema for the given `unit`.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is zero or `levels` is zero.
    pub fn magnitude(unit: impl Into<BigUint>, levels: u32) -> Self {
        let unit = unit.into();
        assert!(!unit.is_zero(), "Bucket unit must be positive");
        assert!(levels > 0, "Bucket schema needs at least one level");

        let mut ranges = Vec::with_capacity(levels as usize + 1);
        ranges.push(BucketRange::new(BigUint::zero(), Some(unit.clone())));
        for i in 0..levels {
            let lo = &unit << i;
            let hi = if i + 1 == levels { None } else { Some(&lo << 4u32) };
            ranges.push(BucketRange::new(lo, hi));
        }

        Self { ranges }
    }

    /// The production schema: one chain unit, [`STANDARD_LEVELS`] levels.
    pub fn standard() -> Self {
        Self::magnitude(CHAIN_UNIT, STANDARD_LEVELS)
    }

    /// A single unbounded bucket `[0, ∞)`.
    ///
    /// Scoring against a flat pool uses the global mean and deviation of all
    /// deposits, which is the bucketed algorithm with exactly one bucket.
    pub fn flat() -> Self {
        Self {
            ranges: vec![BucketRange::new(BigUint::zero(), None)],
        }
    }

    pub fn ranges(&self) -> &[BucketRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl Default for BucketSchema {
    fn default() -> Self {
        Self::standard()
    }
}

/// Exact running statistics of the deposits attributed to one amount range.
///
/// Serialized with all big integers as decimal strings:
///
/// ```json
/// {"lo":"0","hi":"1000","count":2,"sumAmounts":"30","sumAmountsSquared":"500"}
/// ```
#[serde_as]
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolBucket {
    #[serde_as(as = "DisplayFromStr")]
    lo: BigUint,
    #[serde_as(as = "Option<DisplayFromStr>")]
    hi: Option<BigUint>,
    count: u64,
    #[serde_as(as = "DisplayFromStr")]
    sum_amounts: BigUint,
    #[serde_as(as = "DisplayFromStr")]
    sum_amounts_squared: BigUint,
}

impl PoolBucket {
    /// Creates an empty bucket covering `range`.
    pub fn empty(range: &BucketRange) -> Self {
        Self {
            lo: range.lo.clone(),
            hi: range.hi.clone(),
            count: 0,
            sum_amounts: BigUint::zero(),
            sum_amounts_squared: BigUint::zero(),
        }
    }

    pub fn lo(&self) -> &BigUint {
        &self.lo
    }
    pub fn hi(&self) -> Option<&BigUint> {
        self.hi.as_ref()
    }
    pub fn range(&self) -> BucketRange {
        BucketRange::new(self.lo.clone(), self.hi.clone())
    }
    pub fn count(&self) -> u64 {
        self.count
    }
    pub fn sum_amounts(&self) -> &BigUint {
        &self.sum_amounts
    }
    pub fn sum_amounts_squared(&self) -> &BigUint {
        &self.sum_amounts_squared
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Checks whether `amount` lies in `[lo, hi)`.
    pub fn contains(&self, amount: &BigUint) -> bool {
        *amount >= self.lo && self.hi.as_ref().map_or(true, |hi| amount < hi)
    }

    /// Checks whether a (pre-fee, fractional) target amount lies in `[lo, hi)`.
    pub fn contains_f64(&self, target: f64) -> bool {
        big_to_f64(&self.lo) <= target && self.hi.as_ref().map_or(true, |hi| target < big_to_f64(hi))
    }

    /// Distance from `target` up to the exclusive upper bound.
    ///
    /// Infinite for the unbounded top bucket.
    pub fn headroom(&self, target: f64) -> f64 {
        match &self.hi {
            Some(hi) => big_to_f64(hi) - target,
            None => f64::INFINITY,
        }
    }

    pub(crate) fn insert(&mut self, amount: &BigUint) {
        self.count += 1;
        self.sum_amounts += amount;
        self.sum_amounts_squared += amount * amount;
    }

    /// Subtracts one deposit, flooring every statistic at zero.
    ///
    /// Returns `true` if any statistic had to be clamped.
    pub(crate) fn remove(&mut self, amount: &BigUint) -> bool {
        let mut clamped = false;

        if self.count > 0 {
            self.count -= 1;
        } else {
            clamped = true;
        }

        if self.sum_amounts >= *amount {
            self.sum_amounts -= amount;
        } else {
            self.sum_amounts = BigUint::zero();
            clamped = true;
        }

        let squared = amount * amount;
        if self.sum_amounts_squared >= squared {
            self.sum_amounts_squared -= squared;
        } else {
            self.sum_amounts_squared = BigUint::zero();
            clamped = true;
        }

        clamped
    }

    /// Mean deposit amount, or `None` for an empty bucket.
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(big_to_f64(&self.sum_amounts) / self.count as f64)
    }

    /// Population variance of the deposit amounts, or `None` for an empty bucket.
    ///
    /// Computed as `(n·Σx² - (Σx)²) / n²` with the numerator kept exact, so
    /// the only rounding happens in the final division. Stale statistics left
    /// behind by clamped removals can make the numerator negative; it is
    /// floored at zero.
    pub fn variance(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let n = BigUint::from(self.count);
        let scaled = &n * &self.sum_amounts_squared;
        let square_of_sum = &self.sum_amounts * &self.sum_amounts;
        if scaled <= square_of_sum {
            return Some(0.0);
        }
        let numerator = big_to_f64(&(scaled - square_of_sum));
        let denominator = big_to_f64(&(&n * &n));
        Some(numerator / denominator)
    }

    /// Population standard deviation, or `None` for an empty bucket.
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }
}

impl fmt::Display for PoolBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (count = {})", self.range(), self.count)
    }
}
