//! Technical-proposal scoring.
//!
//! [`RuleTechnicalScorer`] is the canonical deterministic implementation.
//! Alternative strategies (e.g. natural-language analysis hosted outside this
//! workspace) satisfy the same [`TechnicalScorer`] contract and are wrapped in
//! [`TimeoutTechnicalScorer`], so the pipeline never waits on them without a
//! deadline and a deterministic fallback.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::config::ScoringConfig;
use crate::result::{EngineError, TechnicalAssessment, clamp_score};

/// Strategy seam for technical-proposal scoring.
pub trait TechnicalScorer: Send + Sync {
    /// Score a proposal text and delivery timeline.
    ///
    /// Implementations must keep every reported value in [0, 100].
    fn score(
        &self,
        proposal: &str,
        timeline_days: i64,
    ) -> Result<TechnicalAssessment, EngineError>;
}

/// Deterministic scorer: length band + term presence + timeline band.
#[derive(Debug, Clone)]
pub struct RuleTechnicalScorer {
    config: ScoringConfig,
}

impl RuleTechnicalScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }
}

impl Default for RuleTechnicalScorer {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl TechnicalScorer for RuleTechnicalScorer {
    fn score(
        &self,
        proposal: &str,
        timeline_days: i64,
    ) -> Result<TechnicalAssessment, EngineError> {
        let text = proposal.to_lowercase();
        let length = proposal.chars().count();

        // A 300-1000 character proposal is the sweet spot; padding past that
        // costs a few points, a one-liner costs most of them.
        let length_score = if length < 100 {
            15.0
        } else if length < 300 {
            35.0
        } else if length <= 1000 {
            55.0
        } else if length <= 2000 {
            50.0
        } else {
            45.0
        };

        let quality_terms = count_present(&text, &self.config.quality_terms);
        let quality_bonus = (quality_terms as f64 * 1.5).min(20.0);

        let depth_terms = count_present(&text, &self.config.depth_terms);
        let depth_bonus = (depth_terms as f64 * 2.0).min(15.0);

        let proposal_component = (length_score + quality_bonus + depth_bonus).min(100.0);
        let timeline_component = timeline_score(&self.config, timeline_days);

        let value = clamp_score(proposal_component * 0.6 + timeline_component * 0.4);

        Ok(TechnicalAssessment {
            value,
            proposal_component,
            timeline_component,
            quality_terms: quality_terms as u32,
            depth_terms: depth_terms as u32,
        })
    }
}

/// Each configured term counts at most once, however often it repeats.
fn count_present(text: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .filter(|term| text.contains(term.as_str()))
        .count()
}

/// Timeline band: a week to a month is ideal, beyond a year decays slowly.
fn timeline_score(config: &ScoringConfig, days: i64) -> f64 {
    if days <= 0 {
        0.0
    } else if days < config.min_reasonable_timeline {
        // Suspiciously fast; the anomaly detector flags this too.
        25.0
    } else if days <= 30 {
        100.0
    } else if days <= 90 {
        95.0
    } else if days <= 180 {
        75.0
    } else if days <= 365 {
        55.0
    } else {
        (50.0 - (days - 365) as f64 / 365.0 * 20.0).max(25.0)
    }
}

/// Wraps a potentially slow or failing scorer with a hard deadline and a
/// rule-based fallback, keeping engine latency and availability independent
/// of any external call.
pub struct TimeoutTechnicalScorer {
    primary: Arc<dyn TechnicalScorer>,
    fallback: RuleTechnicalScorer,
    timeout: Duration,
}

impl TimeoutTechnicalScorer {
    pub fn new(
        primary: Arc<dyn TechnicalScorer>,
        fallback: RuleTechnicalScorer,
        timeout: Duration,
    ) -> Self {
        Self {
            primary,
            fallback,
            timeout,
        }
    }
}

impl TechnicalScorer for TimeoutTechnicalScorer {
    fn score(
        &self,
        proposal: &str,
        timeline_days: i64,
    ) -> Result<TechnicalAssessment, EngineError> {
        let (tx, rx) = mpsc::channel();
        let primary = Arc::clone(&self.primary);
        let text = proposal.to_string();

        // Detached worker: if it outlives the deadline, its late result is
        // dropped together with the channel.
        thread::spawn(move || {
            let _ = tx.send(primary.score(&text, timeline_days));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(assessment)) => Ok(assessment),
            Ok(Err(error)) => {
                warn!(%error, "technical scorer failed; using rule-based fallback");
                self.fallback.score(proposal, timeline_days)
            }
            Err(_) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "technical scorer timed out; using rule-based fallback"
                );
                self.fallback.score(proposal, timeline_days)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_scorer() -> RuleTechnicalScorer {
        RuleTechnicalScorer::default()
    }

    #[test]
    fn short_proposal_scores_low() {
        let assessment = rule_scorer().score("We can do it.", 45).unwrap();
        // 15 length points, no terms: 0.6 * 15 + 0.4 * 95 = 47.
        assert_eq!(assessment.proposal_component, 15.0);
        assert_eq!(assessment.timeline_component, 95.0);
        assert!((assessment.value - 47.0).abs() < 1e-9);
    }

    #[test]
    fn quality_and_depth_terms_raise_the_proposal_component() {
        let body = "Our team brings experience and a clear methodology, with testing, \
                    documentation and long-term maintenance. The proposed architecture \
                    emphasises scalability, security and monitoring throughout."
            .repeat(2);
        assert!(body.chars().count() >= 300);

        let assessment = rule_scorer().score(&body, 45).unwrap();
        // team, experience, methodology, testing, documentation, maintenance.
        assert_eq!(assessment.quality_terms, 6);
        // architecture, scalability, security, monitoring.
        assert_eq!(assessment.depth_terms, 4);
        // 55 + min(20, 9) + min(15, 8) = 72.
        assert_eq!(assessment.proposal_component, 72.0);
    }

    #[test]
    fn term_repetition_does_not_double_count() {
        let body = "experience experience experience experience experience";
        let assessment = rule_scorer().score(body, 45).unwrap();
        assert_eq!(assessment.quality_terms, 1);
    }

    #[test]
    fn timeline_bands() {
        let config = ScoringConfig::default();
        assert_eq!(timeline_score(&config, 0), 0.0);
        assert_eq!(timeline_score(&config, 3), 25.0);
        assert_eq!(timeline_score(&config, 7), 100.0);
        assert_eq!(timeline_score(&config, 30), 100.0);
        assert_eq!(timeline_score(&config, 60), 95.0);
        assert_eq!(timeline_score(&config, 120), 75.0);
        assert_eq!(timeline_score(&config, 300), 55.0);
        assert_eq!(timeline_score(&config, 730), 30.0);
        // Far enough out, the decay floors at 25.
        assert_eq!(timeline_score(&config, 3650), 25.0);
    }

    struct HangingScorer;

    impl TechnicalScorer for HangingScorer {
        fn score(&self, _: &str, _: i64) -> Result<TechnicalAssessment, EngineError> {
            thread::sleep(Duration::from_secs(5));
            Err(EngineError::ScorerFailed("should never be seen".to_string()))
        }
    }

    struct FailingScorer;

    impl TechnicalScorer for FailingScorer {
        fn score(&self, _: &str, _: i64) -> Result<TechnicalAssessment, EngineError> {
            Err(EngineError::ScorerFailed("upstream unavailable".to_string()))
        }
    }

    #[test]
    fn timeout_falls_back_to_rule_based_scoring() {
        let wrapped = TimeoutTechnicalScorer::new(
            Arc::new(HangingScorer),
            rule_scorer(),
            Duration::from_millis(20),
        );

        let proposal = "A compact proposal with testing and documentation.";
        let expected = rule_scorer().score(proposal, 45).unwrap();
        let actual = wrapped.score(proposal, 45).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn failure_falls_back_to_rule_based_scoring() {
        let wrapped = TimeoutTechnicalScorer::new(
            Arc::new(FailingScorer),
            rule_scorer(),
            Duration::from_millis(200),
        );

        let proposal = "A compact proposal with testing and documentation.";
        let expected = rule_scorer().score(proposal, 45).unwrap();
        let actual = wrapped.score(proposal, 45).unwrap();
        assert_eq!(actual, expected);
    }
}
