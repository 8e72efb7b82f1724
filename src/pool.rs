//! Deposit pool statistics.
//!
//! [`DepositPoolStats`] is the single mutable object of the crate. It is built
//! once from a [`BucketSchema`] and then updated, deposit by deposit, by the
//! indexer that watches wormhole transfers. Scoring only ever reads it.
//!
//! Consumption proofs cannot be linked to specific deposits, so withdrawals
//! are reconciled on a best-effort basis: every statistic is floored at zero
//! and the pool stays a conservative superset of the live deposits.

use log::debug;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::bucket::{BucketSchema, PoolBucket};

/// An indexer observation that changes the pool.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PoolEvent {
    /// A transfer into a deposit-only account.
    Deposit(BigUint),
    /// A transfer out of a deposit-only account.
    Withdrawal(BigUint),
}

/// Overlapping magnitude buckets of deposit statistics.
///
/// Serializes as the ordered list of its buckets.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PoolBucket>", into = "Vec<PoolBucket>")]
pub struct DepositPoolStats {
    pub(crate) buckets: Vec<PoolBucket>,
}

impl DepositPoolStats {
    /// Creates an empty pool with the [standard][BucketSchema::standard] schema.
    pub fn new() -> Self {
        Self::with_schema(&BucketSchema::standard())
    }

    /// Creates an empty pool with one bucket per range of `schema`.
    pub fn with_schema(schema: &BucketSchema) -> Self {
        Self {
            buckets: schema.ranges().iter().map(PoolBucket::empty).collect(),
        }
    }
}

impl Default for DepositPoolStats {
    fn default() -> Self {
        Self::new()
    }
}

impl DepositPoolStats {
    pub fn buckets(&self) -> &[PoolBucket] {
        &self.buckets
    }

    pub fn bucket(&self, index: usize) -> Option<&PoolBucket> {
        self.buckets.get(index)
    }

    pub fn num_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Checks whether no bucket holds any deposit.
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(PoolBucket::is_empty)
    }

    /// Records a deposit in every bucket whose range contains `amount`.
    pub fn add_deposit(&mut self, amount: impl Into<BigUint>) {
        let amount = amount.into();
        let mut touched = 0;
        for bucket in self.buckets.iter_mut().filter(|b| b.contains(&amount)) {
            bucket.insert(&amount);
            touched += 1;
        }
        debug!("add_deposit(amount = {}) -> {} buckets", amount, touched);
    }

    /// Removes a deposit from every bucket whose range contains `amount`.
    ///
    /// Statistics that would go negative are clamped to zero.
    pub fn remove_deposit(&mut self, amount: impl Into<BigUint>) {
        let amount = amount.into();
        let mut touched = 0;
        for bucket in self.buckets.iter_mut().filter(|b| b.contains(&amount)) {
            if bucket.remove(&amount) {
                debug!("remove_deposit: clamped {} at zero", bucket);
            }
            touched += 1;
        }
        debug!("remove_deposit(amount = {}) -> {} buckets", amount, touched);
    }

    /// Applies a single indexer event.
    pub fn apply(&mut self, event: &PoolEvent) {
        match event {
            PoolEvent::Deposit(amount) => self.add_deposit(amount.clone()),
            PoolEvent::Withdrawal(amount) => self.remove_deposit(amount.clone()),
        }
    }

    /// Picks the bucket used to score a pre-fee `target` amount.
    ///
    /// Among the non-empty buckets containing `target`, this is the one with
    /// the least headroom `hi - target`: the target sits near the top of its
    /// range, so a handful of same-magnitude deposits can add up to it while
    /// no single deposit exceeds it.
    pub fn select_bucket(&self, target: f64) -> Option<&PoolBucket> {
        let mut best: Option<&PoolBucket> = None;
        for bucket in &self.buckets {
            if bucket.is_empty() || !bucket.contains_f64(target) {
                continue;
            }
            match best {
                Some(b) if b.headroom(target) <= bucket.headroom(target) => {}
                _ => best = Some(bucket),
            }
        }
        debug!(
            "select_bucket(target = {}) -> {}",
            target,
            best.map_or_else(|| "none".to_string(), |b| b.to_string())
        );
        best
    }
}

impl Extend<PoolEvent> for DepositPoolStats {
    fn extend<T: IntoIterator<Item = PoolEvent>>(&mut self, iter: T) {
        for event in iter {
            self.apply(&event);
        }
    }
}
