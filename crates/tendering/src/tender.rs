use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bidwise_core::{DomainError, DomainResult, Entity, TenderId};

/// A published procurement request vendors bid against.
///
/// Snapshot record: scoring reads `budget`; the remaining fields travel with
/// recommendations for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tender {
    id: TenderId,
    title: String,
    category: String,
    budget: f64,
    deadline: DateTime<Utc>,
}

impl Tender {
    pub fn new(
        id: TenderId,
        title: impl Into<String>,
        category: impl Into<String>,
        budget: f64,
        deadline: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("tender title cannot be empty"));
        }
        if !(budget.is_finite() && budget > 0.0) {
            return Err(DomainError::validation(
                "tender budget must be a positive amount",
            ));
        }

        Ok(Self {
            id,
            title,
            category: category.into(),
            budget,
            deadline,
        })
    }

    pub fn id_typed(&self) -> TenderId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }
}

impl Entity for Tender {
    type Id = TenderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
