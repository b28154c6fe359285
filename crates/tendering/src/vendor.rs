use serde::{Deserialize, Serialize};

use bidwise_core::{DomainError, DomainResult, Entity, VendorId};

/// Upper bound of the reputation/rating scales (five-star convention).
const RATING_SCALE_MAX: f64 = 5.0;

/// A vendor's historical record, as read by the credibility scorer.
///
/// Reputation and rating live on a 0-5 scale; out-of-range or non-finite
/// inputs are clamped at construction so scoring never sees them. Missing
/// history is represented as zero, not as an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vendor {
    id: VendorId,
    name: String,
    reputation_score: f64,
    completed_projects: u32,
    total_wins: u32,
    average_rating: f64,
}

impl Vendor {
    pub fn new(
        id: VendorId,
        name: impl Into<String>,
        reputation_score: f64,
        completed_projects: u32,
        total_wins: u32,
        average_rating: f64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("vendor name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            reputation_score: clamp_rating(reputation_score),
            completed_projects,
            total_wins,
            average_rating: clamp_rating(average_rating),
        })
    }

    pub fn id_typed(&self) -> VendorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reputation_score(&self) -> f64 {
        self.reputation_score
    }

    pub fn completed_projects(&self) -> u32 {
        self.completed_projects
    }

    pub fn total_wins(&self) -> u32 {
        self.total_wins
    }

    pub fn average_rating(&self) -> f64 {
        self.average_rating
    }
}

impl Entity for Vendor {
    type Id = VendorId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn clamp_rating(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, RATING_SCALE_MAX)
    } else {
        0.0
    }
}
