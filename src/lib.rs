//! # wormhole-privacy: anonymity-set estimation for wormhole deposits
//!
//! A wormhole deposit is a transfer into an unspendable, protocol-controlled
//! account, redeemed later elsewhere with an unlinkable proof. An observer who
//! sees a redeemed output can still ask: *how many combinations of earlier
//! deposits could have produced this amount?* This crate estimates the answer,
//! in bits (`log2` of the anonymity-set size).
//!
//! ## Key Features
//!
//! - **Exact pool statistics**: [`DepositPoolStats`] keeps count, `Σ x`, and
//!   `Σ x²` per magnitude bucket in arbitrary precision ([`BigUint`]).
//! - **Overlapping buckets**: every amount lands in about four 16×-wide buckets,
//!   and each query picks the best-fitting one.
//! - **Closed-form scoring**: the subset-sum count is approximated with the
//!   central limit theorem, binomial coefficients in log space, and base-2
//!   log-sum-exp, so scores stay finite for pools with thousands of deposits.
//! - **Calibration**: [`find_min_dist`][DepositPoolStats::find_min_dist]
//!   finds the smallest withheld amount that reaches a target score.
//! - **Persistence**: pools round-trip through JSON with big integers as
//!   decimal strings.
//!
//! ## Basic Usage
//!
//! ```rust
//! use wormhole_privacy::{DepositPoolStats, ScoreParams, ScoreLabel, DEFAULT_DIST_FRACTIONS};
//!
//! // 1. The indexer feeds deposits into the pool
//! let mut pool = DepositPoolStats::new();
//! for i in 0..1000u64 {
//!     pool.add_deposit(100 + i * 900 / 1000);
//! }
//!
//! // 2. A wallet scores an output before sending it
//! let params = ScoreParams::new(10, 1, 100);
//! let bits = pool.privacy_score(2_000.0, 20, &params);
//! assert!(bits > 0.0);
//!
//! // 3. ...or shows a table of options
//! let table = pool.privacy_score_table(2_000.0, &params, &DEFAULT_DIST_FRACTIONS);
//! assert_eq!(table[0].label, ScoreLabel::Critical); // nothing withheld
//!
//! // 4. The pool survives restarts
//! let json = pool.to_json().unwrap();
//! assert_eq!(DepositPoolStats::from_json(&json).unwrap(), pool);
//! ```
//!
//! ## Core Components
//!
//! - **[`bucket`]**: bucket ranges, [`BucketSchema`], and per-bucket statistics.
//! - **[`pool`]**: [`DepositPoolStats`], deposit updates, and bucket selection.
//! - **[`score`]**: the score model and [`ScoreParams`].
//! - **[`calibrate`]**: the minimal-`dist` search.
//! - **[`label`]**: [`ScoreLabel`] tiers and score tables.
//! - **[`gaussian`]**, **[`combinatorics`]**: numeric building blocks.
//!
//! The pool is a plain value: mutation needs `&mut`, scoring needs `&`.
//! Nothing here performs I/O or locks.
//!
//! [`BigUint`]: num_bigint::BigUint

pub mod bucket;
pub mod calibrate;
pub mod combinatorics;
pub mod error;
pub mod gaussian;
pub mod label;
pub mod pool;
pub mod score;
pub mod snapshot;

pub use bucket::{BucketRange, BucketSchema, PoolBucket, CHAIN_UNIT};
pub use calibrate::DEFAULT_MAX_DIST_FRACTION;
pub use combinatorics::log2_binomial;
pub use error::{PoolError, Result};
pub use gaussian::normal_cdf;
pub use label::{score_label, PrivacyScoreResult, ScoreLabel, DEFAULT_DIST_FRACTIONS};
pub use pool::{DepositPoolStats, PoolEvent};
pub use score::ScoreParams;
