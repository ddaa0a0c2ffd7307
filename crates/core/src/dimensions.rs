//! Dimension labels for the radar surfaces
//!
//! Each weight vector position maps 1:1 to one label here. The attribute
//! weighting step uses the five general attributes; segmenting within a
//! domain uses that domain's six subdimensions.

use serde::{Deserialize, Serialize};

use crate::synthesis::DIGITAL_ENGAGEMENT_DOMAIN;

const GENERAL_ATTRIBUTES: [&str; 5] = [
    "Financial Capacity",
    "Digital Engagement",
    "Product Affinity",
    "Risk Tolerance",
    "Life Stage",
];

const FINANCIAL_SUBDIMENSIONS: [&str; 6] = [
    "Income Stability",
    "Savings Balance",
    "Credit Utilization",
    "Investment Holdings",
    "Debt Service Ratio",
    "Spending Capacity",
];

const DIGITAL_SUBDIMENSIONS: [&str; 6] = [
    "Mobile Banking Usage",
    "Online Transactions",
    "Digital Channel Preference",
    "Self-Service Adoption",
    "Digital Payments",
    "App Feature Engagement",
];

const PRODUCT_SUBDIMENSIONS: [&str; 6] = [
    "Products Held",
    "Cross-Sell Uptake",
    "Card Usage",
    "Lending Appetite",
    "Wealth Product Interest",
    "Insurance Coverage",
];

const RISK_SUBDIMENSIONS: [&str; 6] = [
    "Market Risk Appetite",
    "Payment Reliability",
    "Balance Volatility",
    "Overdraft Frequency",
    "Collateral Strength",
    "Fraud Exposure",
];

const LIFE_STAGE_SUBDIMENSIONS: [&str; 6] = [
    "Age Band",
    "Household Size",
    "Career Stage",
    "Home Ownership",
    "Education Funding",
    "Retirement Readiness",
];

/// Ordered labels for one radar surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionSet {
    labels: Vec<String>,
}

impl DimensionSet {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// The five top-level customer attributes
    pub fn general() -> Self {
        Self::from_static(&GENERAL_ATTRIBUTES)
    }

    /// The six digital engagement subdimensions
    pub fn digital_engagement() -> Self {
        Self::from_static(&DIGITAL_SUBDIMENSIONS)
    }

    /// The six subdimensions weighted when segmenting within a domain
    ///
    /// Unrecognized domains use the financial capacity subdimensions, the
    /// same fallback the attribute table applies.
    pub fn for_domain(domain: &str) -> Self {
        let labels: &[&str] = match domain {
            DIGITAL_ENGAGEMENT_DOMAIN => &DIGITAL_SUBDIMENSIONS,
            "product-affinity" => &PRODUCT_SUBDIMENSIONS,
            "risk-tolerance" => &RISK_SUBDIMENSIONS,
            "life-stage" => &LIFE_STAGE_SUBDIMENSIONS,
            _ => &FINANCIAL_SUBDIMENSIONS,
        };
        Self::from_static(labels)
    }

    fn from_static(labels: &[&str]) -> Self {
        Self {
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Position of a label, if present
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_dimensions() {
        assert_eq!(DimensionSet::general().len(), 5);
        assert_eq!(DimensionSet::for_domain("digital-engagement").len(), 6);
        assert_eq!(DimensionSet::for_domain("life-stage").len(), 6);
        assert_eq!(
            DimensionSet::for_domain("anything-else"),
            DimensionSet::for_domain("financial-capacity")
        );
    }

    #[test]
    fn test_index_of() {
        let dims = DimensionSet::digital_engagement();
        assert_eq!(dims.index_of("Mobile Banking Usage"), Some(0));
        assert_eq!(dims.index_of("Digital Payments"), Some(4));
        assert_eq!(dims.index_of("Branch Visits"), None);
    }
}
