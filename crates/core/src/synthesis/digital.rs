//! Digital engagement formula set
//!
//! The number of segments depends on the mean weight:
//! - `mean > 70`: three digitally active segments
//! - `40 < mean <= 70`: two transitional segments
//! - `mean <= 40`: a single traditional segment

use super::SegmentStrategy;
use crate::segment::{SegmentDraft, SegmentTemplate};
use crate::weights::WeightStats;

const HIGH_BAND_FLOOR: f64 = 70.0;
const LOW_BAND_CEILING: f64 = 40.0;

const DIGITAL_NATIVES: SegmentTemplate = SegmentTemplate {
    name: "Digital Natives",
    traits: &[
        "Mobile-first banking",
        "Early adopters of new features",
        "Rarely visit branches",
    ],
    strategies: &[
        "In-app personalized offers",
        "Beta programs for new features",
        "Push notification campaigns",
    ],
};

const TECH_SAVVY_PROFESSIONALS: SegmentTemplate = SegmentTemplate {
    name: "Tech-Savvy Professionals",
    traits: &[
        "Heavy online transaction volume",
        "Value speed and convenience",
        "Use multiple digital channels",
    ],
    strategies: &[
        "Premium digital banking bundles",
        "Automated financial insights",
        "Priority digital support",
    ],
};

const SELECTIVE_DIGITAL_USERS: SegmentTemplate = SegmentTemplate {
    name: "Selective Digital Users",
    traits: &[
        "Use digital for routine tasks only",
        "Prefer human contact for complex needs",
        "Security conscious",
    ],
    strategies: &[
        "Guided tutorials for advanced features",
        "Hybrid digital and branch journeys",
        "Highlight security features",
    ],
};

const EMERGING_DIGITAL: SegmentTemplate = SegmentTemplate {
    name: "Emerging Digital",
    traits: &[
        "Growing mobile usage",
        "Experimenting with digital payments",
        "Receptive to guidance",
    ],
    strategies: &[
        "Digital onboarding incentives",
        "Step-by-step feature walkthroughs",
        "Reward first digital transactions",
    ],
};

const TRADITIONAL_PREFERENCE: SegmentTemplate = SegmentTemplate {
    name: "Traditional Preference",
    traits: &[
        "Branch and phone banking",
        "Cautious about new channels",
        "Loyal to familiar processes",
    ],
    strategies: &[
        "Assisted digital enrollment in branch",
        "Printed guides and phone support",
        "Gradual channel migration offers",
    ],
};

const TRADITIONAL_BANKERS: SegmentTemplate = SegmentTemplate {
    name: "Traditional Bankers",
    traits: &[
        "Branch-centric relationship",
        "Minimal digital activity",
        "High trust in personal service",
    ],
    strategies: &[
        "Relationship-led outreach",
        "In-branch digital literacy sessions",
        "Maintain personal service levels",
    ],
};

/// Banded formula set for the digital engagement domain
#[derive(Debug, Clone, Copy, Default)]
pub struct DigitalEngagementStrategy;

impl DigitalEngagementStrategy {
    fn high_band(avg: f64) -> Vec<SegmentDraft> {
        let excess = avg - HIGH_BAND_FLOOR;
        vec![
            DIGITAL_NATIVES.draft(35.0 + excess, avg + 10.0, (95.0 - avg).max(5.0)),
            TECH_SAVVY_PROFESSIONALS.draft(40.0, avg.min(95.0), (105.0 - avg).max(10.0)),
            SELECTIVE_DIGITAL_USERS.draft(
                (25.0 - 0.5 * excess).max(5.0),
                (avg - 20.0).max(40.0),
                (115.0 - avg).max(20.0),
            ),
        ]
    }

    fn middle_band(avg: f64) -> Vec<SegmentDraft> {
        let excess = avg - LOW_BAND_CEILING;
        vec![
            EMERGING_DIGITAL.draft(40.0 + excess, avg + 10.0, (90.0 - avg).max(10.0)),
            TRADITIONAL_PREFERENCE.draft(60.0 - 0.5 * excess, (avg - 15.0).max(20.0), 110.0 - avg),
        ]
    }

    fn low_band(avg: f64) -> Vec<SegmentDraft> {
        vec![TRADITIONAL_BANKERS.draft(100.0 - avg, avg + 15.0, 100.0 - 0.5 * avg)]
    }
}

impl SegmentStrategy for DigitalEngagementStrategy {
    fn name(&self) -> &str {
        "digital-engagement"
    }

    fn synthesize(&self, stats: &WeightStats) -> Vec<SegmentDraft> {
        let avg = stats.mean;
        if avg > HIGH_BAND_FLOOR {
            Self::high_band(avg)
        } else if avg > LOW_BAND_CEILING {
            Self::middle_band(avg)
        } else {
            Self::low_band(avg)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::WeightVector;

    fn names_for(value: f64) -> Vec<String> {
        let w = WeightVector::uniform(6, value).unwrap();
        DigitalEngagementStrategy
            .synthesize(&w.stats())
            .into_iter()
            .map(|d| d.name)
            .collect()
    }

    #[test]
    fn test_high_band() {
        assert_eq!(
            names_for(80.0),
            vec!["Digital Natives", "Tech-Savvy Professionals", "Selective Digital Users"]
        );
    }

    #[test]
    fn test_middle_band() {
        assert_eq!(names_for(50.0), vec!["Emerging Digital", "Traditional Preference"]);
    }

    #[test]
    fn test_low_band() {
        assert_eq!(names_for(20.0), vec!["Traditional Bankers"]);
    }

    #[test]
    fn test_band_boundaries() {
        // 70 is not above 70, 40 is not above 40
        assert_eq!(names_for(70.0).len(), 2);
        assert_eq!(names_for(70.5).len(), 3);
        assert_eq!(names_for(40.0).len(), 1);
        assert_eq!(names_for(40.5).len(), 2);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(names_for(0.0), vec!["Traditional Bankers"]);
        assert_eq!(names_for(100.0).len(), 3);
    }

    #[test]
    fn test_high_band_formulas() {
        let w = WeightVector::uniform(6, 80.0).unwrap();
        let drafts = DigitalEngagementStrategy.synthesize(&w.stats());

        assert_eq!(drafts[0].raw_share, 45.0);
        assert_eq!(drafts[1].raw_share, 40.0);
        assert_eq!(drafts[2].raw_share, 20.0);
        assert_eq!(drafts[0].engagement, 90.0);
        assert_eq!(drafts[0].risk, 15.0);
    }

    #[test]
    fn test_scores_clamped_at_top() {
        let w = WeightVector::uniform(6, 100.0).unwrap();
        let drafts = DigitalEngagementStrategy.synthesize(&w.stats());
        assert_eq!(drafts[0].engagement, 100.0);
        assert_eq!(drafts[0].risk, 5.0);
    }
}
