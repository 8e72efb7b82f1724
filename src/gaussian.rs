//! Standard normal CDF approximation.
//!
//! Uses the [Abramowitz–Stegun][as] formula 7.1.26 for `erf`, with a maximum
//! absolute error of about `1.5e-7`:
//!
//! ```text
//! erf(x) ≈ 1 - (a1·t + a2·t² + a3·t³ + a4·t⁴ + a5·t⁵) · exp(-x²),   t = 1 / (1 + p·x)
//! Φ(z)   = (1 + erf(z / √2)) / 2
//! ```
//!
//! The tail mass `(1 - erf(|z|/√2)) / 2` is computed directly, so the lower
//! tail keeps full relative precision instead of being rounded away in `1 - Φ`.
//!
//! [as]: https://en.wikipedia.org/wiki/Error_function#Numerical_approximations

use std::f64::consts::SQRT_2;

const P: f64 = 0.327_591_1;
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;

/// Beyond this many standard deviations the CDF is clamped to 0 or 1.
pub const Z_CLAMP: f64 = 8.0;

/// Approximates the standard normal CDF `Φ(z)`.
///
/// Returns exactly `0.0` for `z < -8` and `1.0` for `z > 8`.
/// The result is symmetric: `normal_cdf(-z) == 1 - normal_cdf(z)` up to rounding.
pub fn normal_cdf(z: f64) -> f64 {
    if z < -Z_CLAMP {
        return 0.0;
    }
    if z > Z_CLAMP {
        return 1.0;
    }

    let x = z.abs() / SQRT_2;
    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    let tail = 0.5 * poly * (-x * x).exp();

    if z >= 0.0 {
        1.0 - tail
    } else {
        tail
    }
}
