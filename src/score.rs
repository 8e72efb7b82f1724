//! Privacy score: estimated anonymity-set size in bits.
//!
//! # Model
//!
//! An output of `output` units, displayed with `dist` units withheld, could
//! have been produced by any set of deposits whose total lies in the pre-fee
//! range
//!
//! ```text
//! [output·m, (output + dist)·m),    m = 10000 / (10000 - fee_bps)
//! ```
//!
//! Counting those subsets exactly is a subset-sum problem, so the score
//! approximates it. From the bucket picked by
//! [`select_bucket`][DepositPoolStats::select_bucket] we take the deposit mean
//! `μ` and deviation `σ`, and model the sum of `k` random deposits as
//! `N(k·μ, σ·√k)`. The expected number of size-`k` subsets landing in the
//! range is `C(n, k) · p_k`; summing over `k` and taking `log2` gives the score:
//!
//! ```text
//! bits = log2 Σ_{k = k_min}^{min(k_max, n)} 2^(log2 C(n, k) + log2 p_k)
//! ```
//!
//! The sum is evaluated with the log-sum-exp trick in base 2, so terms as
//! large as `2^1000` never leave floating-point range.

use log::{debug, trace};

use crate::combinatorics::log2_binomial;
use crate::gaussian::normal_cdf;
use crate::pool::DepositPoolStats;

/// One hundred percent, in basis points.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Parameters of a score query.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ScoreParams {
    /// Protocol fee charged on redemption, in basis points.
    pub fee_bps: u32,
    /// Smallest number of deposits an output may combine.
    pub k_min: u64,
    /// Largest number of deposits an output may combine.
    pub k_max: u64,
}

impl ScoreParams {
    pub fn new(fee_bps: u32, k_min: u64, k_max: u64) -> Self {
        Self { fee_bps, k_min, k_max }
    }

    /// Factor converting a post-fee output into the pre-fee input it came from.
    ///
    /// Not finite (or negative) when `fee_bps >= 10000`.
    pub fn fee_multiplier(&self) -> f64 {
        BPS_DENOMINATOR as f64 / (BPS_DENOMINATOR as f64 - self.fee_bps as f64)
    }
}

impl Default for ScoreParams {
    fn default() -> Self {
        Self {
            fee_bps: 10,
            k_min: 1,
            k_max: 100,
        }
    }
}

/// Computes `log2(Σ 2^x)` over `terms`, or `None` if there are no terms.
pub fn log2_sum_exp2(terms: &[f64]) -> Option<f64> {
    let max = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if terms.is_empty() || max == f64::NEG_INFINITY {
        return None;
    }
    let sum: f64 = terms.iter().map(|&t| (t - max).exp2()).sum();
    Some(max + sum.log2())
}

impl DepositPoolStats {
    /// Estimates the privacy of an output, in bits.
    ///
    /// Returns `0.0` whenever the pool cannot support an estimate: no bucket
    /// covers the pre-fee amount, the bucket has no spread, `k_min` exceeds
    /// the usable subset sizes, or no subset size has any probability mass.
    pub fn privacy_score(&self, output_amount: f64, dist: u64, params: &ScoreParams) -> f64 {
        let multiplier = params.fee_multiplier();
        let input_lo = output_amount * multiplier;
        let input_hi = (output_amount + dist as f64) * multiplier;
        if !input_lo.is_finite() || !input_hi.is_finite() {
            return 0.0;
        }

        let Some(bucket) = self.select_bucket(input_lo) else {
            return 0.0;
        };
        let (Some(mu), Some(sigma)) = (bucket.mean(), bucket.std_dev()) else {
            return 0.0;
        };
        if sigma == 0.0 || !sigma.is_finite() {
            debug!("privacy_score: degenerate bucket {} (sigma = {})", bucket, sigma);
            return 0.0;
        }

        let n = bucket.count();
        let k_max = params.k_max.min(n);
        if params.k_min > k_max {
            return 0.0;
        }

        let mut terms = Vec::new();
        for k in params.k_min.max(1)..=k_max {
            let kf = k as f64;
            let mean = kf * mu;
            let spread = sigma * kf.sqrt();
            let z_lo = (input_lo - mean) / spread;
            let z_hi = (input_hi - mean) / spread;
            let p = normal_cdf(z_hi) - normal_cdf(z_lo);
            if p <= 0.0 {
                continue;
            }
            let term = log2_binomial(n, k) + p.log2();
            trace!("privacy_score: k = {}, p = {:e}, term = {}", k, p, term);
            terms.push(term);
        }

        let bits = log2_sum_exp2(&terms).map_or(0.0, |bits| bits.max(0.0));
        debug!(
            "privacy_score(output = {}, dist = {}) -> {} bits from {} terms",
            output_amount,
            dist,
            bits,
            terms.len()
        );
        bits
    }
}
