//! `bidwise-infra`
//!
//! **Responsibility:** In-process plumbing around the scoring engine.
//!
//! The engine itself is pure; this crate hosts the worker that feeds it:
//! callers supply a snapshot source over their storage and receive ranked
//! batches through a sink. No database, transport or authentication lives
//! here - those remain external collaborators.

pub mod runner;

pub use runner::{
    EvaluationRunner, EvaluationRunnerHandle, InMemoryRecommendationSink, RecommendationSink,
    SnapshotError, TenderSnapshot, TenderSnapshotSource,
};
