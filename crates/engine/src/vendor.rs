//! Vendor credibility scoring from the vendor's historical record.

use bidwise_tendering::Vendor;

use crate::result::{VendorAssessment, clamp_score};

/// Weighted sum: reputation and rating dominate, track record adds bounded
/// bonuses on top. History counts are capped so a prolific vendor cannot
/// outscore the rating scale itself.
pub fn score(vendor: &Vendor) -> VendorAssessment {
    let reputation_component = (vendor.reputation_score() * 20.0).min(100.0);
    let rating_component = (vendor.average_rating() * 20.0).min(100.0);
    let win_bonus = (f64::from(vendor.total_wins()) * 10.0).min(30.0);
    let experience_bonus = (f64::from(vendor.completed_projects()) * 5.0).min(20.0);

    let value = clamp_score(
        reputation_component * 0.4 + rating_component * 0.4 + win_bonus + experience_bonus,
    );

    VendorAssessment {
        value,
        reputation_component,
        rating_component,
        win_bonus,
        experience_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidwise_core::VendorId;

    fn vendor(reputation: f64, projects: u32, wins: u32, rating: f64) -> Vendor {
        Vendor::new(VendorId::new(), "Vendor", reputation, projects, wins, rating).unwrap()
    }

    #[test]
    fn top_ratings_without_history_score_eighty() {
        let assessment = score(&vendor(5.0, 0, 0, 5.0));
        assert_eq!(assessment.value, 80.0);
        assert_eq!(assessment.reputation_component, 100.0);
        assert_eq!(assessment.rating_component, 100.0);
        assert_eq!(assessment.win_bonus, 0.0);
        assert_eq!(assessment.experience_bonus, 0.0);
    }

    #[test]
    fn history_bonuses_are_capped() {
        let assessment = score(&vendor(0.0, 100, 100, 0.0));
        assert_eq!(assessment.win_bonus, 30.0);
        assert_eq!(assessment.experience_bonus, 20.0);
        assert_eq!(assessment.value, 50.0);
    }

    #[test]
    fn full_record_clamps_to_one_hundred() {
        // 40 + 40 + 30 + 20 would be 130 unclamped.
        let assessment = score(&vendor(5.0, 10, 5, 5.0));
        assert_eq!(assessment.value, 100.0);
    }

    #[test]
    fn blank_record_scores_zero() {
        let assessment = score(&vendor(0.0, 0, 0, 0.0));
        assert_eq!(assessment.value, 0.0);
    }
}
