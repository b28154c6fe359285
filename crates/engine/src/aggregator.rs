//! Score aggregation: a weighted base score forced into a condition bucket.
//!
//! The number of satisfied success conditions, not the weighted average,
//! decides the score band; the base score only positions the bid within its
//! band. An anomaly penalty lands after range forcing.

use bidwise_tendering::{Bid, Vendor};

use crate::config::ScoringConfig;
use crate::result::round2;
use crate::stats::PriceStats;

/// Target score range per number of satisfied conditions (index 0-3).
const CONDITION_RANGES: [(f64, f64); 4] = [
    (0.0, 45.0),
    (45.0, 70.0),
    (60.0, 85.0),
    (85.0, 100.0),
];

/// The three binary success heuristics evaluated per bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuccessConditions {
    /// Price at or below the configured fraction of the sibling mean.
    pub low_cost: bool,
    /// Delivery within the configured day limit.
    pub reasonable_timeline: bool,
    /// Reputation at or above the floor, or enough total wins.
    pub good_reputation: bool,
}

impl SuccessConditions {
    /// Evaluated independently of the component scores.
    pub fn evaluate(
        config: &ScoringConfig,
        bid: &Bid,
        vendor: &Vendor,
        stats: &PriceStats,
    ) -> Self {
        Self {
            low_cost: bid.proposed_price() <= stats.mean() * config.low_cost_fraction,
            reasonable_timeline: bid.delivery_timeline() <= config.on_time_limit_days,
            good_reputation: vendor.reputation_score() >= config.good_reputation_floor
                || vendor.total_wins() >= config.good_reputation_wins,
        }
    }

    pub fn count(&self) -> u8 {
        u8::from(self.low_cost)
            + u8::from(self.reasonable_timeline)
            + u8::from(self.good_reputation)
    }
}

/// Combine the component scores into the final score.
pub fn finalize(
    config: &ScoringConfig,
    price_score: f64,
    vendor_score: f64,
    technical_score: f64,
    conditions_met: u8,
    anomaly_flagged: bool,
) -> f64 {
    let weights = &config.weights;
    let base_score = price_score * weights.price
        + vendor_score * weights.vendor
        + technical_score * weights.technical;

    let (low, high) = CONDITION_RANGES[usize::from(conditions_met.min(3))];
    let mut score = base_score.clamp(low, high);

    if anomaly_flagged {
        score = (score - config.anomaly_penalty).max(0.0);
    }

    round2(score.min(100.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidwise_core::{BidId, TenderId, VendorId};

    fn config() -> ScoringConfig {
        ScoringConfig::default()
    }

    #[test]
    fn all_conditions_met_forces_at_least_eighty_five() {
        // Mediocre base score (50.0) lifted to the bucket floor.
        let score = finalize(&config(), 50.0, 50.0, 50.0, 3, false);
        assert_eq!(score, 85.0);
    }

    #[test]
    fn no_conditions_met_caps_at_forty_five() {
        // Excellent base score (95.0) pulled down to the bucket ceiling.
        let score = finalize(&config(), 95.0, 95.0, 95.0, 0, false);
        assert_eq!(score, 45.0);
    }

    #[test]
    fn base_score_positions_within_its_band() {
        // base = 0.40 * 70 + 0.35 * 60 + 0.25 * 80 = 69, inside [60, 85].
        let score = finalize(&config(), 70.0, 60.0, 80.0, 2, false);
        assert_eq!(score, 69.0);
    }

    #[test]
    fn one_condition_band_is_forty_five_to_seventy() {
        assert_eq!(finalize(&config(), 0.0, 0.0, 0.0, 1, false), 45.0);
        assert_eq!(finalize(&config(), 100.0, 100.0, 100.0, 1, false), 70.0);
    }

    #[test]
    fn anomaly_penalty_lands_after_range_forcing() {
        let clean = finalize(&config(), 50.0, 50.0, 50.0, 3, false);
        let flagged = finalize(&config(), 50.0, 50.0, 50.0, 3, true);
        assert_eq!(clean, 85.0);
        assert_eq!(flagged, 70.0);
    }

    #[test]
    fn penalty_never_goes_below_zero() {
        let score = finalize(&config(), 0.0, 0.0, 0.0, 0, true);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn conditions_count_all_combinations() {
        let config = config();
        let tender_id = TenderId::new();
        let vendor = Vendor::new(VendorId::new(), "Vendor", 4.0, 2, 0, 4.0).unwrap();
        let weak_vendor = Vendor::new(VendorId::new(), "Newcomer", 1.0, 0, 0, 1.0).unwrap();
        let stats = PriceStats::from_prices(&[100_000.0, 100_000.0]);

        let strong_bid = Bid::new(
            BidId::new(),
            tender_id,
            VendorId::new(),
            80_000.0,
            "proposal",
            60,
        )
        .unwrap();
        let all = SuccessConditions::evaluate(&config, &strong_bid, &vendor, &stats);
        assert!(all.low_cost && all.reasonable_timeline && all.good_reputation);
        assert_eq!(all.count(), 3);

        let slow_bid = Bid::new(
            BidId::new(),
            tender_id,
            VendorId::new(),
            99_000.0,
            "proposal",
            120,
        )
        .unwrap();
        let none = SuccessConditions::evaluate(&config, &slow_bid, &weak_vendor, &stats);
        assert!(!none.low_cost && !none.reasonable_timeline && !none.good_reputation);
        assert_eq!(none.count(), 0);
    }
}
