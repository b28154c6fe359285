//! Typed scoring results.
//!
//! Each pipeline component reports a tagged record instead of a free-form
//! map, so the contract stays checkable at compile time and callers never
//! fish values out of an open-ended payload.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use bidwise_core::ValueObject;
use bidwise_tendering::BidScores;

/// Scores live on a 0-100 scale; non-finite intermediate values collapse to 0.
pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Round to 2 decimals, the precision persisted on bid records.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// A numeric input the pipeline cannot score (non-finite, non-positive).
    #[error("invalid scoring input: {0}")]
    InvalidInput(String),

    /// A pluggable technical scorer failed.
    #[error("technical scorer failed: {0}")]
    ScorerFailed(String),
}

/// How a price score was derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriceBasis {
    /// Scored against the sibling-price consensus.
    Consensus { z_score: f64, mean: f64, std_dev: f64 },
    /// Scored against the tender budget (single bid, or zero variance).
    BudgetRatio { ratio: f64 },
    /// Substituted by the computation-fault fallback; carries no basis data.
    Neutral,
}

/// Price competitiveness of one bid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceAssessment {
    pub value: f64,
    pub basis: PriceBasis,
}

/// Vendor credibility breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VendorAssessment {
    pub value: f64,
    pub reputation_component: f64,
    pub rating_component: f64,
    pub win_bonus: f64,
    pub experience_bonus: f64,
}

/// Technical quality breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAssessment {
    pub value: f64,
    pub proposal_component: f64,
    pub timeline_component: f64,
    /// Distinct quality terms found in the proposal.
    pub quality_terms: u32,
    /// Distinct technical-depth terms found in the proposal.
    pub depth_terms: u32,
}

/// Fraud/quality heuristics outcome, reasons in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub flagged: bool,
    pub reasons: Vec<String>,
}

impl AnomalyReport {
    pub fn clear() -> Self {
        Self {
            flagged: false,
            reasons: Vec::new(),
        }
    }

    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            flagged: !reasons.is_empty(),
            reasons,
        }
    }

    /// Display form: reasons joined with "; ", `None` when nothing fired.
    pub fn joined(&self) -> Option<String> {
        if self.reasons.is_empty() {
            None
        } else {
            Some(self.reasons.join("; "))
        }
    }
}

/// One bid's full evaluation against its tender and siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub ai_score: f64,
    /// How many of the three success conditions the bid satisfied (0-3).
    pub conditions_met: u8,
    pub price: PriceAssessment,
    pub vendor: VendorAssessment,
    pub technical: TechnicalAssessment,
    pub anomaly: AnomalyReport,
}

impl ScoreResult {
    /// Assemble a result, rounding every reported score to 2 decimals.
    pub(crate) fn assemble(
        ai_score: f64,
        conditions_met: u8,
        mut price: PriceAssessment,
        mut vendor: VendorAssessment,
        mut technical: TechnicalAssessment,
        anomaly: AnomalyReport,
    ) -> Self {
        price.value = round2(price.value);
        vendor.value = round2(vendor.value);
        technical.value = round2(technical.value);

        Self {
            ai_score: round2(ai_score),
            conditions_met,
            price,
            vendor,
            technical,
            anomaly,
        }
    }

    pub fn price_score(&self) -> f64 {
        self.price.value
    }

    pub fn vendor_score(&self) -> f64 {
        self.vendor.value
    }

    pub fn technical_score(&self) -> f64 {
        self.technical.value
    }

    /// Midpoint fallback substituted when scoring a single bid faults.
    ///
    /// Anomaly-flagged with the fault named, so a substituted bid is never
    /// mistaken for a genuinely scored one.
    pub fn neutral(fault: impl Into<String>) -> Self {
        Self {
            ai_score: 50.0,
            conditions_met: 0,
            price: PriceAssessment {
                value: 50.0,
                basis: PriceBasis::Neutral,
            },
            vendor: VendorAssessment {
                value: 50.0,
                reputation_component: 0.0,
                rating_component: 0.0,
                win_bonus: 0.0,
                experience_bonus: 0.0,
            },
            technical: TechnicalAssessment {
                value: 50.0,
                proposal_component: 0.0,
                timeline_component: 0.0,
                quality_terms: 0,
                depth_terms: 0,
            },
            anomaly: AnomalyReport::from_reasons(vec![format!(
                "Scoring fault: {}",
                fault.into()
            )]),
        }
    }

    /// Write-back shape for persisting the derivation onto the bid record.
    pub fn to_bid_scores(&self) -> BidScores {
        BidScores {
            ai_score: self.ai_score,
            price_score: self.price.value,
            vendor_score: self.vendor.value,
            technical_score: self.technical.value,
            anomaly_flag: self.anomaly.flagged,
            anomaly_reason: self.anomaly.joined(),
        }
    }
}

// Score records carry no identity: equal values, equal meaning.
impl ValueObject for PriceAssessment {}
impl ValueObject for VendorAssessment {}
impl ValueObject for TechnicalAssessment {}
impl ValueObject for AnomalyReport {}
impl ValueObject for ScoreResult {}

/// Per-bid outcome: scored, or faulted with a neutral substitute.
///
/// The substitute lets batch callers still rank a faulted bid; the fault
/// stays visible so they can instead exclude or surface it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BidEvaluation {
    Scored(ScoreResult),
    Faulted { reason: String, fallback: ScoreResult },
}

impl BidEvaluation {
    pub fn result(&self) -> &ScoreResult {
        match self {
            Self::Scored(result) => result,
            Self::Faulted { fallback, .. } => fallback,
        }
    }

    pub fn into_result(self) -> ScoreResult {
        match self {
            Self::Scored(result) => result,
            Self::Faulted { fallback, .. } => fallback,
        }
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, Self::Faulted { .. })
    }
}
