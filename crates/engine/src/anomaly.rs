//! Fraud/quality heuristics over one bid and its siblings.
//!
//! Every check runs independently; reasons accumulate in evaluation order
//! and the flag is the union of all of them.

use bidwise_tendering::Bid;

use crate::config::ScoringConfig;
use crate::result::AnomalyReport;
use crate::stats::PriceStats;

/// Run all checks for one bid.
///
/// Price checks need a defined consensus (two or more sibling prices with
/// spread); the timeline and proposal checks always apply, so a single-bid
/// tender can still be flagged.
pub fn detect(
    config: &ScoringConfig,
    bid: &Bid,
    stats: &PriceStats,
    sibling_bids: &[Bid],
) -> AnomalyReport {
    let mut reasons = Vec::new();

    if let Some(z_score) = stats.z_score(bid.proposed_price()) {
        if z_score < config.low_price_z {
            reasons.push("Suspiciously low bid price (possible underbidding)".to_string());
        } else if z_score > config.high_price_z {
            reasons.push("Unusually high bid price".to_string());
        }
    }

    let exact_matches = sibling_bids
        .iter()
        .filter(|other| {
            other.id_typed() != bid.id_typed()
                && (other.proposed_price() - bid.proposed_price()).abs()
                    < config.price_match_epsilon
        })
        .count();
    if exact_matches > 0 {
        reasons.push(format!(
            "Exact price match with {exact_matches} other bid(s) - possible collusion"
        ));
    }

    if bid.delivery_timeline() < config.min_reasonable_timeline {
        reasons.push(format!(
            "Unrealistically short delivery timeline ({} days)",
            bid.delivery_timeline()
        ));
    }

    if bid.delivery_timeline() > config.max_reasonable_timeline {
        reasons.push(format!(
            "Excessively long delivery timeline ({} days)",
            bid.delivery_timeline()
        ));
    }

    if bid.technical_proposal().chars().count() < config.min_proposal_chars {
        reasons.push("Insufficient technical proposal detail".to_string());
    }

    AnomalyReport::from_reasons(reasons)
}
