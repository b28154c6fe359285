//! The bid evaluation pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use bidwise_core::VendorId;
use bidwise_tendering::{Bid, Tender, Vendor};

use crate::aggregator::{self, SuccessConditions};
use crate::anomaly;
use crate::config::ScoringConfig;
use crate::price;
use crate::rank::{self, Recommendation, RecommendationBatch, RecommendationLevel};
use crate::result::{BidEvaluation, EngineError, ScoreResult, round2};
use crate::stats::PriceStats;
use crate::technical::{RuleTechnicalScorer, TechnicalScorer};
use crate::vendor as vendor_scoring;

/// Stateless scoring service for a tender's bid set.
///
/// Holds only configuration and the technical-scoring strategy; every
/// invocation is a pure function of its inputs, so recomputing an unchanged
/// snapshot reproduces identical output.
pub struct BidScoringEngine {
    config: ScoringConfig,
    technical: Arc<dyn TechnicalScorer>,
}

impl BidScoringEngine {
    /// Canonical deterministic engine.
    pub fn new(config: ScoringConfig) -> Self {
        let technical: Arc<dyn TechnicalScorer> =
            Arc::new(RuleTechnicalScorer::new(config.clone()));
        Self { config, technical }
    }

    /// Swap the technical-scoring strategy.
    ///
    /// Non-deterministic strategies should be wrapped in
    /// [`crate::technical::TimeoutTechnicalScorer`] first.
    pub fn with_technical_scorer(mut self, scorer: Arc<dyn TechnicalScorer>) -> Self {
        self.technical = scorer;
        self
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one bid in the context of its tender and the full sibling set.
    ///
    /// `sibling_bids` is the tender's complete bid set, the scored bid
    /// included; its own price participates in the consensus statistics.
    pub fn score_bid(
        &self,
        bid: &Bid,
        tender: &Tender,
        vendor: &Vendor,
        sibling_bids: &[Bid],
    ) -> Result<ScoreResult, EngineError> {
        // Constructors validate these, but records arriving through
        // deserialization have not been through a constructor.
        if !(bid.proposed_price().is_finite() && bid.proposed_price() > 0.0) {
            return Err(EngineError::InvalidInput(
                "proposed price must be a positive amount".to_string(),
            ));
        }
        if !(tender.budget().is_finite() && tender.budget() > 0.0) {
            return Err(EngineError::InvalidInput(
                "tender budget must be a positive amount".to_string(),
            ));
        }

        let prices = sibling_prices(bid, sibling_bids);
        let stats = PriceStats::from_prices(&prices);

        let price = price::score(&self.config, bid.proposed_price(), &stats, tender.budget());
        let vendor_assessment = vendor_scoring::score(vendor);
        let technical = self
            .technical
            .score(bid.technical_proposal(), bid.delivery_timeline())?;
        let anomaly = anomaly::detect(&self.config, bid, &stats, sibling_bids);
        let conditions = SuccessConditions::evaluate(&self.config, bid, vendor, &stats);

        let ai_score = aggregator::finalize(
            &self.config,
            price.value,
            vendor_assessment.value,
            technical.value,
            conditions.count(),
            anomaly.flagged,
        );

        Ok(ScoreResult::assemble(
            ai_score,
            conditions.count(),
            price,
            vendor_assessment,
            technical,
            anomaly,
        ))
    }

    /// Infallible per-bid evaluation: a computation fault becomes a neutral,
    /// anomaly-flagged fallback instead of aborting the caller's batch.
    pub fn evaluate_bid(
        &self,
        bid: &Bid,
        tender: &Tender,
        vendor: &Vendor,
        sibling_bids: &[Bid],
    ) -> BidEvaluation {
        match self.score_bid(bid, tender, vendor, sibling_bids) {
            Ok(result) => BidEvaluation::Scored(result),
            Err(error) => {
                warn!(
                    bid_id = %bid.id_typed(),
                    %error,
                    "bid scoring faulted; substituting neutral result"
                );
                BidEvaluation::Faulted {
                    reason: error.to_string(),
                    fallback: ScoreResult::neutral(error.to_string()),
                }
            }
        }
    }

    /// Score and rank every bid for one tender.
    ///
    /// Never fails: an empty bid set yields an empty batch, a bid whose
    /// vendor is missing from the lookup is skipped (and reported), and a
    /// faulted bid is ranked on its neutral fallback (and reported).
    pub fn recommendations(
        &self,
        bids: &[Bid],
        vendors: &HashMap<VendorId, Vendor>,
        tender: &Tender,
    ) -> RecommendationBatch {
        let mut batch = RecommendationBatch::empty(tender.id_typed());

        if bids.is_empty() {
            info!(tender_id = %tender.id_typed(), "no bids to evaluate");
            return batch;
        }

        for bid in bids {
            let Some(vendor) = vendors.get(&bid.vendor_id()) else {
                warn!(
                    bid_id = %bid.id_typed(),
                    vendor_id = %bid.vendor_id(),
                    "vendor missing from lookup; skipping bid"
                );
                batch.skipped.push(bid.id_typed());
                continue;
            };

            let evaluation = self.evaluate_bid(bid, tender, vendor, bids);
            if evaluation.is_faulted() {
                batch.faulted.push(bid.id_typed());
            }
            let scores = evaluation.into_result();

            batch.items.push(Recommendation {
                bid_id: bid.id_typed(),
                vendor_id: vendor.id_typed(),
                vendor_name: vendor.name().to_string(),
                proposed_price: bid.proposed_price(),
                delivery_timeline: bid.delivery_timeline(),
                vendor_reputation: vendor.reputation_score(),
                vendor_total_wins: vendor.total_wins(),
                vendor_completed_projects: vendor.completed_projects(),
                level: RecommendationLevel::from_score(scores.ai_score),
                price_to_budget_ratio: budget_percentage(bid.proposed_price(), tender.budget()),
                scores,
                rank: 0,
            });
        }

        rank::assign_ranks(&mut batch.items);

        info!(
            tender_id = %tender.id_typed(),
            count = batch.items.len(),
            skipped = batch.skipped.len(),
            faulted = batch.faulted.len(),
            "generated recommendations"
        );
        batch
    }
}

impl Default for BidScoringEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

/// Positive sibling prices; the bid's own price stands in when none exist.
fn sibling_prices(bid: &Bid, sibling_bids: &[Bid]) -> Vec<f64> {
    let mut prices: Vec<f64> = sibling_bids
        .iter()
        .map(Bid::proposed_price)
        .filter(|price| *price > 0.0)
        .collect();
    if prices.is_empty() {
        prices.push(bid.proposed_price());
    }
    prices
}

fn budget_percentage(price: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        round2(price / budget * 100.0)
    } else {
        0.0
    }
}
