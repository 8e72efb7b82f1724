//! Qualitative tiers and score tables for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pool::DepositPoolStats;
use crate::score::ScoreParams;

/// Fractions of the output withheld in a default score table.
pub const DEFAULT_DIST_FRACTIONS: [f64; 4] = [0.0, 0.001, 0.01, 0.05];

/// Qualitative privacy tier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum ScoreLabel {
    Critical,
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl ScoreLabel {
    /// Maps a score in bits to its tier.
    ///
    /// ```text
    /// [0, 10) Critical   [10, 20) Weak   [20, 40) Moderate   [40, 60) Strong   [60, ∞) Very Strong
    /// ```
    pub fn from_bits(bits: f64) -> Self {
        if bits >= 60.0 {
            ScoreLabel::VeryStrong
        } else if bits >= 40.0 {
            ScoreLabel::Strong
        } else if bits >= 20.0 {
            ScoreLabel::Moderate
        } else if bits >= 10.0 {
            ScoreLabel::Weak
        } else {
            ScoreLabel::Critical
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreLabel::Critical => "Critical",
            ScoreLabel::Weak => "Weak",
            ScoreLabel::Moderate => "Moderate",
            ScoreLabel::Strong => "Strong",
            ScoreLabel::VeryStrong => "Very Strong",
        }
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a score in bits to its tier. See [`ScoreLabel::from_bits`].
pub fn score_label(bits: f64) -> ScoreLabel {
    ScoreLabel::from_bits(bits)
}

/// One row of a score table.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyScoreResult {
    pub dist: u64,
    /// Score in bits, rounded to one decimal.
    pub score_bits: f64,
    pub label: ScoreLabel,
}

impl fmt::Display for PrivacyScoreResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dist {}: {:.1} bits ({})", self.dist, self.score_bits, self.label)
    }
}

fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

impl DepositPoolStats {
    /// Scores an output at several withheld fractions, in the given order.
    pub fn privacy_score_table(
        &self,
        output_amount: f64,
        params: &ScoreParams,
        dist_fractions: &[f64],
    ) -> Vec<PrivacyScoreResult> {
        dist_fractions
            .iter()
            .map(|&fraction| {
                let dist = (output_amount * fraction).floor() as u64;
                let score_bits = round_to_tenth(self.privacy_score(output_amount, dist, params));
                PrivacyScoreResult {
                    dist,
                    score_bits,
                    label: score_label(score_bits),
                }
            })
            .collect()
    }
}
