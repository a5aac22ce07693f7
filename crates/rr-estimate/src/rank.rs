//! Coarse profit buckets used to prioritize order display.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitRank {
    Low,
    Medium,
    High,
}

impl ProfitRank {
    pub const ALL: [ProfitRank; 3] = [ProfitRank::Low, ProfitRank::Medium, ProfitRank::High];

    pub fn as_str(self) -> &'static str {
        match self {
            ProfitRank::Low    => "low",
            ProfitRank::Medium => "medium",
            ProfitRank::High   => "high",
        }
    }
}

impl fmt::Display for ProfitRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimum profit for each rank.
///
/// Thresholds need not be monotone in rank order: ranking walks them in
/// ascending threshold order and keeps the last one the profit reaches.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankThresholds {
    pub low:    f64,
    pub medium: f64,
    pub high:   f64,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self { low: 0.0, medium: 1_000.0, high: 10_000.0 }
    }
}

impl RankThresholds {
    pub fn threshold(&self, rank: ProfitRank) -> f64 {
        match rank {
            ProfitRank::Low    => self.low,
            ProfitRank::Medium => self.medium,
            ProfitRank::High   => self.high,
        }
    }

    /// The rank with the highest threshold `≤ profit`; `Low` when the profit
    /// is below every threshold.
    pub fn rank(&self, profit: f64) -> ProfitRank {
        let mut ranks = ProfitRank::ALL;
        ranks.sort_by(|a, b| self.threshold(*a).total_cmp(&self.threshold(*b)));

        let mut rank = ProfitRank::Low;
        for candidate in ranks {
            if profit >= self.threshold(candidate) {
                rank = candidate;
            }
        }
        rank
    }
}
