//! Binomial coefficients in log space.

use std::cmp::min;

/// Returns `log2(C(n, k))`.
///
/// Degenerate inputs (`k == 0`, `k == n`, `k > n`) yield `0.0`.
/// The sum runs over `min(k, n - k)` terms and never forms a factorial,
/// so it stays finite for `n` in the thousands and beyond.
pub fn log2_binomial(n: u64, k: u64) -> f64 {
    if k == 0 || k >= n {
        return 0.0;
    }

    let k = min(k, n - k);
    (0..k)
        .map(|i| ((n - i) as f64).log2() - ((i + 1) as f64).log2())
        .sum()
}
