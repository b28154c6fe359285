//! Price competitiveness scoring.
//!
//! Rewards proximity to the sibling-price consensus, not raw cheapness: a
//! far-below-market price loses exactly as many points as a far-above-market
//! one. With no consensus to measure against (single bid, or all siblings at
//! the same price), falls back to a budget-ratio scale.

use crate::config::ScoringConfig;
use crate::result::{PriceAssessment, PriceBasis, clamp_score};
use crate::stats::PriceStats;

pub fn score(
    config: &ScoringConfig,
    proposed_price: f64,
    stats: &PriceStats,
    budget: f64,
) -> PriceAssessment {
    if let Some(z_score) = stats.z_score(proposed_price) {
        let value = clamp_score(100.0 - z_score.abs() * config.z_penalty_per_sigma);
        return PriceAssessment {
            value,
            basis: PriceBasis::Consensus {
                z_score,
                mean: stats.mean(),
                std_dev: stats.std_dev(),
            },
        };
    }

    let ratio = if budget > 0.0 {
        proposed_price / budget
    } else {
        1.0
    };

    PriceAssessment {
        value: clamp_score(budget_ratio_score(config, ratio)),
        basis: PriceBasis::BudgetRatio { ratio },
    }
}

/// Budget-efficiency scale: 100 at or under the optimal ratio, a linear slide
/// down to 60 at the full budget, then a steeper slide for over-budget bids.
fn budget_ratio_score(config: &ScoringConfig, ratio: f64) -> f64 {
    if ratio <= config.optimal_price_ratio {
        100.0
    } else if ratio <= 1.0 {
        100.0 - (ratio - config.optimal_price_ratio) * 200.0
    } else {
        (60.0 - (ratio - 1.0) * 100.0).max(0.0)
    }
}
