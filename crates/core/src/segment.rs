//! Synthesized customer segments

use serde::{Deserialize, Serialize};

/// Segment as produced by a synthesis strategy, before normalization
///
/// `raw_share` is an unnormalized weight; a set of drafts does not sum to
/// anything in particular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDraft {
    pub name: String,
    pub raw_share: f64,
    pub traits: Vec<String>,
    /// How responsive the segment is (0-100)
    pub engagement: f64,
    /// Churn likelihood (0-100)
    pub risk: f64,
    pub strategies: Vec<String>,
}

/// Segment with its share of the customer base resolved to a percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentProfile {
    /// Unique within one synthesis result; used as the display key
    pub name: String,
    /// Share of the customer base (0-100)
    pub percentage: u32,
    pub traits: Vec<String>,
    /// How responsive the segment is (0-100)
    pub engagement: f64,
    /// Churn likelihood (0-100)
    pub risk: f64,
    pub strategies: Vec<String>,
}

impl SegmentDraft {
    /// Resolve the draft with its normalized percentage
    pub fn into_profile(self, percentage: u32) -> SegmentProfile {
        SegmentProfile {
            name: self.name,
            percentage,
            traits: self.traits,
            engagement: self.engagement,
            risk: self.risk,
            strategies: self.strategies,
        }
    }
}

/// Fixed narrative for one named segment
///
/// Traits and strategies depend only on which segment was emitted, never
/// on the weights.
#[derive(Debug, Clone, Copy)]
pub struct SegmentTemplate {
    pub name: &'static str,
    pub traits: &'static [&'static str],
    pub strategies: &'static [&'static str],
}

impl SegmentTemplate {
    /// Build a draft; engagement and risk are clamped into 0-100
    pub fn draft(&self, raw_share: f64, engagement: f64, risk: f64) -> SegmentDraft {
        SegmentDraft {
            name: self.name.to_string(),
            raw_share,
            traits: self.traits.iter().map(|t| t.to_string()).collect(),
            engagement: engagement.clamp(0.0, 100.0),
            risk: risk.clamp(0.0, 100.0),
            strategies: self.strategies.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: SegmentTemplate = SegmentTemplate {
        name: "Sample",
        traits: &["Trait A", "Trait B"],
        strategies: &["Strategy A"],
    };

    #[test]
    fn test_draft_clamps_scores() {
        let draft = SAMPLE.draft(12.0, 130.0, -4.0);
        assert_eq!(draft.engagement, 100.0);
        assert_eq!(draft.risk, 0.0);
        assert_eq!(draft.traits, vec!["Trait A", "Trait B"]);
    }

    #[test]
    fn test_into_profile_keeps_narrative() {
        let profile = SAMPLE.draft(12.0, 50.0, 20.0).into_profile(40);
        assert_eq!(profile.name, "Sample");
        assert_eq!(profile.percentage, 40);
        assert_eq!(profile.strategies, vec!["Strategy A"]);
    }

    #[test]
    fn test_profile_serializes_with_snake_case_fields() {
        let profile = SAMPLE.draft(1.0, 50.0, 20.0).into_profile(100);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["percentage"], 100);
        assert_eq!(json["name"], "Sample");
    }
}
