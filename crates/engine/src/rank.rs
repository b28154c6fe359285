//! Recommendation labeling, sorting and rank assignment.

use serde::{Deserialize, Serialize};

use bidwise_core::{BidId, TenderId, VendorId};

use crate::result::ScoreResult;

/// Recommendation band for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    HighlyRecommended,
    Recommended,
    Consider,
    NotRecommended,
}

impl RecommendationLevel {
    pub fn from_score(ai_score: f64) -> Self {
        if ai_score >= 85.0 {
            Self::HighlyRecommended
        } else if ai_score >= 70.0 {
            Self::Recommended
        } else if ai_score >= 50.0 {
            Self::Consider
        } else {
            Self::NotRecommended
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::Recommended => "Recommended",
            Self::Consider => "Consider",
            Self::NotRecommended => "Not Recommended",
        }
    }

    /// Display color used by presentation layers.
    pub fn color(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "green",
            Self::Recommended => "blue",
            Self::Consider => "yellow",
            Self::NotRecommended => "red",
        }
    }
}

/// The ranked, labeled output record for one bid within one tender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub bid_id: BidId,
    pub vendor_id: VendorId,
    pub vendor_name: String,
    pub proposed_price: f64,
    pub delivery_timeline: i64,
    pub vendor_reputation: f64,
    pub vendor_total_wins: u32,
    pub vendor_completed_projects: u32,
    pub scores: ScoreResult,
    pub level: RecommendationLevel,
    /// Proposed price as a percentage of the tender budget.
    pub price_to_budget_ratio: f64,
    /// 1-based position after sorting; 0 until assigned.
    pub rank: u32,
}

/// One tender's ranked recommendations plus per-bid signals for the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationBatch {
    pub tender_id: TenderId,
    /// Best first; every item carries its 1-based rank.
    pub items: Vec<Recommendation>,
    /// Bids excluded because their vendor was absent from the lookup.
    pub skipped: Vec<BidId>,
    /// Bids ranked on a neutral fallback after a scoring fault.
    pub faulted: Vec<BidId>,
}

impl RecommendationBatch {
    pub fn empty(tender_id: TenderId) -> Self {
        Self {
            tender_id,
            items: Vec::new(),
            skipped: Vec::new(),
            faulted: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Sort best-first and assign dense 1-based ranks.
///
/// Total order, independent of input order: `ai_score` descending, then
/// proposed price ascending (the cheaper bid wins the tie), then bid id.
pub fn assign_ranks(items: &mut [Recommendation]) {
    items.sort_by(|a, b| {
        b.scores
            .ai_score
            .total_cmp(&a.scores.ai_score)
            .then_with(|| a.proposed_price.total_cmp(&b.proposed_price))
            .then_with(|| a.bid_id.cmp(&b.bid_id))
    });

    for (position, item) in items.iter_mut().enumerate() {
        item.rank = (position + 1) as u32;
    }
}
