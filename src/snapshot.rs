//! Persisted form of a deposit pool.
//!
//! # Wire format
//!
//! A pool is stored as a JSON array of its buckets, in schema order:
//!
//! ```text
//! [
//!   {"lo": "0", "hi": "1000000000000", "count": 3,
//!    "sumAmounts": "60", "sumAmountsSquared": "1400"},
//!   ...
//!   {"lo": "2147483648000000000000", "hi": null, ...}
//! ]
//! ```
//!
//! Big integers are decimal strings so that no JSON consumer ever rounds them
//! through a double. Restoring a snapshot reproduces the statistics exactly.

use log::debug;

use crate::bucket::PoolBucket;
use crate::error::{PoolError, Result};
use crate::pool::DepositPoolStats;

impl TryFrom<Vec<PoolBucket>> for DepositPoolStats {
    type Error = PoolError;

    fn try_from(buckets: Vec<PoolBucket>) -> Result<Self> {
        if buckets.is_empty() {
            return Err(PoolError::NoBuckets);
        }

        let last = buckets.len() - 1;
        for (index, bucket) in buckets.iter().enumerate() {
            match bucket.hi() {
                Some(hi) if hi <= bucket.lo() => {
                    return Err(PoolError::EmptyRange {
                        index,
                        lo: bucket.lo().clone(),
                        hi: hi.clone(),
                    });
                }
                None if index != last => {
                    return Err(PoolError::UnboundedNotLast { index });
                }
                _ => {}
            }
        }

        Ok(Self { buckets })
    }
}

impl From<DepositPoolStats> for Vec<PoolBucket> {
    fn from(pool: DepositPoolStats) -> Self {
        pool.buckets
    }
}

impl DepositPoolStats {
    /// Serializes the pool to its JSON wire format.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        debug!("to_json: {} buckets, {} bytes", self.num_buckets(), json.len());
        Ok(json)
    }

    /// Restores a pool from its JSON wire format.
    pub fn from_json(json: &str) -> Result<Self> {
        let buckets: Vec<PoolBucket> = serde_json::from_str(json)?;
        let pool = Self::try_from(buckets)?;
        debug!("from_json: restored {} buckets", pool.num_buckets());
        Ok(pool)
    }
}
