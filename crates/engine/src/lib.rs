//! `bidwise-engine`
//!
//! **Responsibility:** Deterministic bid scoring and ranking boundary.
//!
//! This crate is intentionally **not** a persistence or transport layer:
//! - It consumes read-only snapshots (`bidwise-tendering` records).
//! - It must not mutate domain state; callers persist returned score records.
//! - Same inputs always yield identical outputs: no hidden state, no clock,
//!   no randomness anywhere in the pipeline.

pub mod aggregator;
pub mod anomaly;
pub mod config;
pub mod pipeline;
pub mod price;
pub mod rank;
pub mod result;
pub mod stats;
pub mod technical;
pub mod vendor;

pub use config::{ComponentWeights, ScoringConfig};
pub use pipeline::BidScoringEngine;
pub use rank::{Recommendation, RecommendationBatch, RecommendationLevel};
pub use result::{
    AnomalyReport, BidEvaluation, EngineError, PriceAssessment, PriceBasis, ScoreResult,
    TechnicalAssessment, VendorAssessment,
};
pub use stats::PriceStats;
pub use technical::{RuleTechnicalScorer, TechnicalScorer, TimeoutTechnicalScorer};
