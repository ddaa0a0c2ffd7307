//! Generic formula set, used by every domain without its own

use super::SegmentStrategy;
use crate::segment::{SegmentDraft, SegmentTemplate};
use crate::weights::WeightStats;

const HIGH_PERFORMERS: SegmentTemplate = SegmentTemplate {
    name: "High Performers",
    traits: &[
        "Strong scores across weighted attributes",
        "Responsive to premium offers",
        "Long tenure with the institution",
    ],
    strategies: &[
        "Offer premium product tiers",
        "Assign a relationship manager",
        "Invite to loyalty and referral programs",
    ],
};

const GROWTH_POTENTIAL: SegmentTemplate = SegmentTemplate {
    name: "Growth Potential",
    traits: &[
        "Uneven attribute profile",
        "Open to additional products",
        "Moderate engagement",
    ],
    strategies: &[
        "Targeted cross-sell campaigns",
        "Personalized onboarding journeys",
        "Incentives for deeper product usage",
    ],
};

const STANDARD_SEGMENT: SegmentTemplate = SegmentTemplate {
    name: "Standard Segment",
    traits: &[
        "Core banking needs",
        "Price sensitive",
        "Infrequent interactions",
    ],
    strategies: &[
        "Automated retention nudges",
        "Simple bundled offers",
        "Periodic satisfaction check-ins",
    ],
};

/// Three fixed segments whose magnitudes track the weight statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl SegmentStrategy for GenericStrategy {
    fn name(&self) -> &str {
        "generic"
    }

    fn synthesize(&self, stats: &WeightStats) -> Vec<SegmentDraft> {
        let avg = stats.mean;
        let spread = stats.range();

        vec![
            HIGH_PERFORMERS.draft(
                15.0 + 0.25 * avg,
                (avg + 5.0).max(70.0),
                (100.0 - avg).max(10.0),
            ),
            GROWTH_POTENTIAL.draft(
                25.0 + 0.2 * spread,
                (avg - 10.0).max(40.0),
                (110.0 - avg).max(20.0),
            ),
            STANDARD_SEGMENT.draft(
                (60.0 - 0.25 * avg - 0.1 * spread).max(5.0),
                (avg - 25.0).max(25.0),
                (120.0 - avg).max(30.0),
            ),
        ]
    }
}
