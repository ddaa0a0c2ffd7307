//! Percentage normalization
//!
//! Rescales raw segment shares so they read as percentages of the customer
//! base. With [`RoundingPolicy::Independent`] each share is rounded on its
//! own, so a result can total 99 or 101. [`RoundingPolicy::LargestRemainder`]
//! always totals exactly 100.

use serde::{Deserialize, Serialize};

use crate::segment::{SegmentDraft, SegmentProfile};

/// How fractional percentages are turned into integers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Round each share to the nearest integer; the total may drift by one
    #[default]
    Independent,
    /// Floor every share, then hand the leftover points to the largest
    /// fractional parts (earlier segments win ties)
    LargestRemainder,
}

/// Turns raw shares into integer percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PercentageNormalizer {
    policy: RoundingPolicy,
}

impl PercentageNormalizer {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Replace every draft's raw share with its percentage of the total
    pub fn normalize(&self, drafts: Vec<SegmentDraft>) -> Vec<SegmentProfile> {
        let raw: Vec<f64> = drafts.iter().map(|d| d.raw_share).collect();
        let percentages = self.apportion(&raw);

        drafts
            .into_iter()
            .zip(percentages)
            .map(|(draft, pct)| draft.into_profile(pct))
            .collect()
    }

    /// Integer percentages for a list of raw shares
    ///
    /// Negative or non-finite shares count as zero. When nothing is left
    /// the shares are split evenly.
    pub fn apportion(&self, raw: &[f64]) -> Vec<u32> {
        if raw.is_empty() {
            return Vec::new();
        }

        let shares: Vec<f64> = raw
            .iter()
            .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
            .collect();
        let total: f64 = shares.iter().sum();

        let exact: Vec<f64> = if total > 0.0 {
            shares.iter().map(|s| s / total * 100.0).collect()
        } else {
            tracing::warn!(
                segments = raw.len(),
                "Raw shares sum to zero, splitting evenly"
            );
            vec![100.0 / raw.len() as f64; raw.len()]
        };

        match self.policy {
            RoundingPolicy::Independent => exact.iter().map(|p| p.round() as u32).collect(),
            RoundingPolicy::LargestRemainder => largest_remainder(&exact),
        }
    }
}

fn largest_remainder(exact: &[f64]) -> Vec<u32> {
    let mut result: Vec<u32> = exact.iter().map(|p| p.floor() as u32).collect();
    let assigned: u32 = result.iter().sum();
    let leftover = 100u32.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..exact.len()).collect();
    // Stable sort keeps earlier segments first on equal remainders
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.total_cmp(&ra)
    });

    for &idx in order.iter().take(leftover) {
        result[idx] += 1;
    }
    result
}
