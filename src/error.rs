//! Errors raised while restoring persisted pool state.
//!
//! Scoring never fails: degenerate numeric inputs resolve to a defined value.
//! Only decoding a snapshot can be rejected.

use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("malformed pool snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pool snapshot contains no buckets")]
    NoBuckets,

    #[error("bucket {index} has an empty range [{lo}, {hi})")]
    EmptyRange { index: usize, lo: BigUint, hi: BigUint },

    #[error("bucket {index} is unbounded but is not the last bucket")]
    UnboundedNotLast { index: usize },
}

/// Result type for pool persistence.
pub type Result<T> = std::result::Result<T, PoolError>;
