use serde::{Deserialize, Serialize};

/// Terms whose presence marks a professionally written proposal.
const QUALITY_TERMS: [&str; 17] = [
    "experience",
    "expertise",
    "methodology",
    "approach",
    "team",
    "quality",
    "standards",
    "best practices",
    "implementation",
    "testing",
    "maintenance",
    "support",
    "documentation",
    "compliance",
    "certification",
    "proven",
    "successful",
];

/// Terms signalling technical depth.
const DEPTH_TERMS: [&str; 11] = [
    "architecture",
    "infrastructure",
    "scalability",
    "security",
    "integration",
    "deployment",
    "monitoring",
    "optimization",
    "performance",
    "reliability",
    "efficiency",
];

/// Relative weights of the three component scores in the base score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub price: f64,
    pub vendor: f64,
    pub technical: f64,
}

impl ComponentWeights {
    pub fn sum(&self) -> f64 {
        self.price + self.vendor + self.technical
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            price: 0.40,
            vendor: 0.35,
            technical: 0.25,
        }
    }
}

/// Tunable weights, thresholds and term lists for the scoring pipeline.
///
/// `Default` carries the canonical values; tests and callers override
/// individual knobs instead of reaching into hard-coded constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ComponentWeights,

    /// Fixed penalty subtracted from the final score when any anomaly fires.
    pub anomaly_penalty: f64,

    /// Points lost per standard deviation of distance from the price consensus.
    pub z_penalty_per_sigma: f64,

    /// Z-score below which a price is suspiciously low.
    pub low_price_z: f64,

    /// Z-score above which a price is unusually high.
    pub high_price_z: f64,

    /// Two prices closer than this count as an exact match (collusion check).
    pub price_match_epsilon: f64,

    /// Price-to-budget ratio scoring 100 at or below.
    pub optimal_price_ratio: f64,

    /// Timelines shorter than this many days are unrealistic.
    pub min_reasonable_timeline: i64,

    /// Timelines beyond this many days are excessive.
    pub max_reasonable_timeline: i64,

    /// Proposals shorter than this many characters lack technical detail.
    pub min_proposal_chars: usize,

    /// Low-cost condition: price at or below this fraction of the mean.
    pub low_cost_fraction: f64,

    /// Reasonable-timeline condition: delivery within this many days.
    pub on_time_limit_days: i64,

    /// Good-reputation condition: reputation at or above this floor...
    pub good_reputation_floor: f64,

    /// ...or at least this many total wins.
    pub good_reputation_wins: u32,

    pub quality_terms: Vec<String>,
    pub depth_terms: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            anomaly_penalty: 15.0,
            z_penalty_per_sigma: 20.0,
            low_price_z: -2.5,
            high_price_z: 2.0,
            price_match_epsilon: 0.01,
            optimal_price_ratio: 0.8,
            min_reasonable_timeline: 7,
            max_reasonable_timeline: 730,
            min_proposal_chars: 50,
            low_cost_fraction: 0.9,
            on_time_limit_days: 90,
            good_reputation_floor: 3.5,
            good_reputation_wins: 3,
            quality_terms: QUALITY_TERMS.iter().map(|t| (*t).to_string()).collect(),
            depth_terms: DEPTH_TERMS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}
