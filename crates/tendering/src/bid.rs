use serde::{Deserialize, Serialize};

use bidwise_core::{BidId, DomainError, DomainResult, Entity, TenderId, VendorId};

/// Derived scores persisted back onto a bid after an evaluation run.
///
/// This is the write-back shape: every recomputation overwrites it in full,
/// so scoring stays idempotent. `anomaly_reason` is the ordered reason list
/// joined with "; " for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidScores {
    pub ai_score: f64,
    pub price_score: f64,
    pub vendor_score: f64,
    pub technical_score: f64,
    pub anomaly_flag: bool,
    pub anomaly_reason: Option<String>,
}

/// A vendor's proposal against a tender.
///
/// Immutable input to scoring. The engine returns score records; the caller
/// that owns persistence writes them back here via [`Bid::apply_scores`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    id: BidId,
    tender_id: TenderId,
    vendor_id: VendorId,
    proposed_price: f64,
    technical_proposal: String,
    delivery_timeline: i64,
    scores: Option<BidScores>,
}

impl Bid {
    pub fn new(
        id: BidId,
        tender_id: TenderId,
        vendor_id: VendorId,
        proposed_price: f64,
        technical_proposal: impl Into<String>,
        delivery_timeline: i64,
    ) -> DomainResult<Self> {
        if !(proposed_price.is_finite() && proposed_price > 0.0) {
            return Err(DomainError::validation(
                "proposed price must be a positive amount",
            ));
        }
        if delivery_timeline <= 0 {
            return Err(DomainError::validation(
                "delivery timeline must be a positive number of days",
            ));
        }

        Ok(Self {
            id,
            tender_id,
            vendor_id,
            proposed_price,
            technical_proposal: technical_proposal.into(),
            delivery_timeline,
            scores: None,
        })
    }

    pub fn id_typed(&self) -> BidId {
        self.id
    }

    pub fn tender_id(&self) -> TenderId {
        self.tender_id
    }

    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    pub fn proposed_price(&self) -> f64 {
        self.proposed_price
    }

    pub fn technical_proposal(&self) -> &str {
        &self.technical_proposal
    }

    /// Delivery timeline in days.
    pub fn delivery_timeline(&self) -> i64 {
        self.delivery_timeline
    }

    pub fn scores(&self) -> Option<&BidScores> {
        self.scores.as_ref()
    }

    /// Overwrite the persisted derivation with a fresh evaluation.
    ///
    /// Idempotent: applying the same scores twice leaves the bid unchanged.
    pub fn apply_scores(&mut self, scores: BidScores) {
        self.scores = Some(scores);
    }
}

impl Entity for Bid {
    type Id = BidId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_bid() -> Bid {
        Bid::new(
            BidId::new(),
            TenderId::new(),
            VendorId::new(),
            80_000.0,
            "We bring proven experience and a tested methodology.",
            45,
        )
        .unwrap()
    }

    #[test]
    fn new_bid_has_no_scores() {
        let bid = test_bid();
        assert!(bid.scores().is_none());
    }

    #[test]
    fn rejects_non_positive_price() {
        for price in [0.0, -100.0, f64::NAN] {
            let err = Bid::new(BidId::new(), TenderId::new(), VendorId::new(), price, "p", 30)
                .unwrap_err();
            match err {
                DomainError::Validation(_) => {}
                _ => panic!("Expected Validation error for price {price}"),
            }
        }
    }

    #[test]
    fn rejects_non_positive_timeline() {
        let err = Bid::new(BidId::new(), TenderId::new(), VendorId::new(), 1.0, "p", 0)
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for zero timeline"),
        }
    }

    #[test]
    fn apply_scores_overwrites_previous_run() {
        let mut bid = test_bid();

        let first = BidScores {
            ai_score: 61.0,
            price_score: 70.0,
            vendor_score: 55.0,
            technical_score: 58.0,
            anomaly_flag: false,
            anomaly_reason: None,
        };
        bid.apply_scores(first.clone());
        assert_eq!(bid.scores(), Some(&first));

        let second = BidScores {
            ai_score: 45.0,
            anomaly_flag: true,
            anomaly_reason: Some("Unusually high bid price".to_string()),
            ..first
        };
        bid.apply_scores(second.clone());
        assert_eq!(bid.scores(), Some(&second));
    }
}
