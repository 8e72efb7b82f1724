//! End-to-end properties of pool maintenance and scoring.

use num_bigint::BigUint;
use wormhole_privacy::{
    score_label, BucketSchema, DepositPoolStats, PoolEvent, ScoreLabel, ScoreParams, CHAIN_UNIT,
    DEFAULT_DIST_FRACTIONS, DEFAULT_MAX_DIST_FRACTION,
};

/// `count` deposits spread evenly over `[lo, hi)`.
fn spread_pool(count: u64, lo: u64, hi: u64) -> DepositPoolStats {
    let mut pool = DepositPoolStats::new();
    for i in 0..count {
        pool.add_deposit(lo + i * (hi - lo) / count);
    }
    pool
}

fn no_fee() -> ScoreParams {
    ScoreParams::new(0, 1, 100)
}

// ─── Pool Statistics ───────────────────────────────────────────────────────────

#[test]
fn mean_and_deviation_of_small_pool() {
    let mut pool = DepositPoolStats::new();
    for amount in [10u64, 20, 30, 40, 50] {
        pool.add_deposit(amount);
    }

    let bucket = pool.select_bucket(25.0).unwrap();
    assert_eq!(bucket.count(), 5);
    assert_eq!(bucket.mean(), Some(30.0));
    assert!((bucket.std_dev().unwrap() - 14.142_135_6).abs() < 1e-6);
}

#[test]
fn deposit_lands_in_four_buckets() {
    let mut pool = DepositPoolStats::new();
    pool.add_deposit(100 * CHAIN_UNIT);

    let holding: Vec<String> = pool
        .buckets()
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| b.range().to_string())
        .collect();
    assert_eq!(holding.len(), 4, "{:?}", holding);
}

#[test]
fn withdrawal_never_goes_negative() {
    let mut pool = DepositPoolStats::new();
    pool.extend([
        PoolEvent::Deposit(BigUint::from(3 * CHAIN_UNIT)),
        PoolEvent::Withdrawal(BigUint::from(3 * CHAIN_UNIT)),
        PoolEvent::Withdrawal(BigUint::from(3 * CHAIN_UNIT)),
        PoolEvent::Withdrawal(BigUint::from(9 * CHAIN_UNIT)),
    ]);
    assert!(pool.is_empty());
    assert_eq!(pool, DepositPoolStats::new());
}

#[test]
fn snapshot_round_trip_preserves_scores() {
    let pool = spread_pool(5000, 100, 1000);
    let restored = DepositPoolStats::from_json(&pool.to_json().unwrap()).unwrap();

    for (a, b) in pool.buckets().iter().zip(restored.buckets()) {
        assert_eq!(a.count(), b.count());
        assert_eq!(a.sum_amounts(), b.sum_amounts());
        assert_eq!(a.sum_amounts_squared(), b.sum_amounts_squared());
    }
    assert_eq!(
        pool.privacy_score(3_000.0, 150, &no_fee()),
        restored.privacy_score(3_000.0, 150, &no_fee())
    );
}

// ─── Scoring ───────────────────────────────────────────────────────────────────

#[test]
fn empty_pool_scores_zero() {
    let pool = DepositPoolStats::new();
    for output in [0.0, 1.0, 10.0, 1e4, 1e15] {
        for dist in [0, 1, 1000] {
            assert_eq!(pool.privacy_score(output, dist, &no_fee()), 0.0);
        }
    }
}

#[test]
fn score_non_decreasing_in_dist() {
    let pool = spread_pool(500, 10, 1000);
    let s0 = pool.privacy_score(1_000.0, 0, &no_fee());
    let s50 = pool.privacy_score(1_000.0, 50, &no_fee());
    let s200 = pool.privacy_score(1_000.0, 200, &no_fee());
    assert!(s0 <= s50, "{} > {}", s0, s50);
    assert!(s50 <= s200, "{} > {}", s50, s200);
    assert!(s200 > 0.0);
}

#[test]
fn unreachable_output_scores_low() {
    // Even 100 of the largest deposits sum to only 1400.
    let pool = spread_pool(100, 5, 15);
    assert!(pool.privacy_score(10_000.0, 0, &no_fee()) < 5.0);
    assert!(pool.privacy_score(10_000.0, 100, &no_fee()) < 5.0);
}

#[test]
fn wide_range_over_large_pool_scores_high() {
    let pool = spread_pool(1000, 100, 1000);
    assert!(pool.privacy_score(10.0, 1000, &no_fee()) > 5.0);
}

#[test]
fn denser_pool_scores_at_least_as_high() {
    let sparse = spread_pool(50, 100, 1000);
    let dense = spread_pool(5000, 100, 1000);
    for (output, dist) in [(550.0, 100), (2_000.0, 200), (5_000.0, 500)] {
        let s = sparse.privacy_score(output, dist, &no_fee());
        let d = dense.privacy_score(output, dist, &no_fee());
        assert!(d >= s, "output {}: dense {} < sparse {}", output, d, s);
    }
}

#[test]
fn large_amounts_score_like_scaled_small_ones() {
    // The model is scale-free within one bucket.
    let small = spread_pool(1000, 100, 1000);
    let mut large = DepositPoolStats::with_schema(&BucketSchema::flat());
    for i in 0..1000u64 {
        large.add_deposit(BigUint::from(100 + i * 900 / 1000) * CHAIN_UNIT);
    }
    let scale = CHAIN_UNIT as f64;
    let a = small.privacy_score(2_000.0, 200, &no_fee());
    let b = large.privacy_score(2_000.0 * scale, 200 * CHAIN_UNIT, &no_fee());
    assert!((a - b).abs() < 1e-6, "{} vs {}", a, b);
}

// ─── Calibration ───────────────────────────────────────────────────────────────

#[test]
fn calibrator_returns_zero_when_target_already_met() {
    let pool = spread_pool(1000, 100, 1000);
    let dist = pool.find_min_dist(2_000.0, &no_fee(), 0.0, DEFAULT_MAX_DIST_FRACTION);
    assert_eq!(dist, Some(0));
}

#[test]
fn calibrator_reports_unreachable_target() {
    let mut pool = DepositPoolStats::new();
    pool.add_deposit(100u64);
    let dist = pool.find_min_dist(100.0, &ScoreParams::default(), 100.0, DEFAULT_MAX_DIST_FRACTION);
    assert_eq!(dist, None);
}

#[test]
fn calibrated_dist_reaches_target() {
    let pool = spread_pool(2000, 100, 1000);
    let params = ScoreParams::new(10, 1, 4);
    let target = 20.0;

    let dist = pool
        .find_min_dist(3_000.0, &params, target, DEFAULT_MAX_DIST_FRACTION)
        .expect("target should be reachable");
    assert!(pool.privacy_score(3_000.0, dist, &params) >= target);
    assert!(dist == 0 || pool.privacy_score(3_000.0, dist - 1, &params) < target);
}

// ─── Labels ────────────────────────────────────────────────────────────────────

#[test]
fn label_boundaries() {
    assert_eq!(score_label(9.9), ScoreLabel::Critical);
    assert_eq!(score_label(10.0), ScoreLabel::Weak);
    assert_eq!(score_label(19.9), ScoreLabel::Weak);
    assert_eq!(score_label(20.0), ScoreLabel::Moderate);
    assert_eq!(score_label(39.9), ScoreLabel::Moderate);
    assert_eq!(score_label(40.0), ScoreLabel::Strong);
    assert_eq!(score_label(59.9), ScoreLabel::Strong);
    assert_eq!(score_label(60.0), ScoreLabel::VeryStrong);
    assert_eq!(score_label(60.0).to_string(), "Very Strong");
}

#[test]
fn default_table_layout() {
    let pool = spread_pool(1000, 100, 1000);
    let table = pool.privacy_score_table(20_000.0, &no_fee(), &DEFAULT_DIST_FRACTIONS);

    let dists: Vec<u64> = table.iter().map(|row| row.dist).collect();
    assert_eq!(dists, vec![0, 20, 200, 1000]);
    for row in &table {
        let tenths = row.score_bits * 10.0;
        assert!((tenths - tenths.round()).abs() < 1e-9);
        assert_eq!(row.label, score_label(row.score_bits));
    }
}
