//! Inverse of the privacy score: the least `dist` reaching a target.

use log::debug;

use crate::pool::DepositPoolStats;
use crate::score::ScoreParams;

/// Default cap on the withheld amount, as a fraction of the output.
pub const DEFAULT_MAX_DIST_FRACTION: f64 = 0.1;

impl DepositPoolStats {
    /// Finds the smallest `dist` whose score reaches `target_bits`.
    ///
    /// The search covers `0..=floor(output_amount · max_dist_fraction)`.
    /// Returns `Some(0)` if the target is met without withholding anything,
    /// and `None` if even the largest allowed `dist` falls short.
    ///
    /// The binary search assumes the score does not decrease as `dist` grows.
    /// The returned `d` always satisfies `score(d) >= target_bits`, and for
    /// `d > 0` also `score(d - 1) < target_bits`.
    pub fn find_min_dist(
        &self,
        output_amount: f64,
        params: &ScoreParams,
        target_bits: f64,
        max_dist_fraction: f64,
    ) -> Option<u64> {
        // Saturating cast: negative and NaN products become 0.
        let max_dist = (output_amount * max_dist_fraction).floor() as u64;
        let score = |dist: u64| self.privacy_score(output_amount, dist, params);

        if score(max_dist) < target_bits {
            debug!(
                "find_min_dist: {} bits unreachable within dist = {}",
                target_bits, max_dist
            );
            return None;
        }
        if score(0) >= target_bits {
            return Some(0);
        }

        // Invariant: score(lo) < target <= score(hi).
        let mut lo = 0;
        let mut hi = max_dist;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if score(mid) >= target_bits {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        debug!("find_min_dist: {} bits reached at dist = {}", target_bits, hi);
        Some(hi)
    }
}
