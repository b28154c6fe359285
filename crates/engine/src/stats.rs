//! Sibling-price statistics shared across the scoring pipeline.

/// Mean and population standard deviation over a tender's sibling prices.
///
/// Computed once per tender and shared by the price scorer, the anomaly
/// detector and the aggregator, so every bid is measured against the same
/// consensus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceStats {
    mean: f64,
    std_dev: f64,
    count: usize,
}

impl PriceStats {
    pub fn from_prices(prices: &[f64]) -> Self {
        if prices.is_empty() {
            return Self {
                mean: 0.0,
                std_dev: 0.0,
                count: 0,
            };
        }

        let n = prices.len() as f64;
        let mean = prices.iter().sum::<f64>() / n;

        // Population variance: the anomaly thresholds are calibrated against it.
        let variance = prices
            .iter()
            .map(|price| {
                let d = price - mean;
                d * d
            })
            .sum::<f64>()
            / n;

        Self {
            mean,
            std_dev: variance.sqrt(),
            count: prices.len(),
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether z-scores are defined: at least two prices with non-zero spread.
    pub fn has_spread(&self) -> bool {
        self.count > 1 && self.std_dev > 0.0
    }

    /// Standard-score of `price` against the consensus, if one is defined.
    pub fn z_score(&self, price: f64) -> Option<f64> {
        self.has_spread()
            .then(|| (price - self.mean) / self.std_dev)
    }
}
