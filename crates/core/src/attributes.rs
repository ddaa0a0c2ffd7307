//! Attribute breakdowns
//!
//! Static reference data: each top-level customer attribute splits into
//! four sub-attributes shown when a segment is picked in the 3D view.
//! Lookups never fail; unknown ids resolve to the financial capacity
//! breakdown.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Attribute used when a lookup misses
pub const DEFAULT_ATTRIBUTE: &str = "financial-capacity";

/// How strongly a sub-attribute moves the parent score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubAttribute {
    pub name: String,
    /// Score (0-100)
    pub value: u8,
    /// Display color as `#rrggbb`
    pub color: String,
    pub impact: Impact,
}

impl SubAttribute {
    fn new(name: &str, value: u8, color: &str, impact: Impact) -> Self {
        Self {
            name: name.to_string(),
            value,
            color: color.to_string(),
            impact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeBreakdown {
    pub id: String,
    pub label: String,
    pub sub_attributes: Vec<SubAttribute>,
}

/// Lookup table from attribute id to its breakdown
#[derive(Debug, Clone)]
pub struct AttributeTable {
    entries: HashMap<String, AttributeBreakdown>,
    fallback: String,
}

static BUILTIN_ATTRIBUTES: Lazy<AttributeTable> = Lazy::new(|| {
    use Impact::*;

    let breakdowns = vec![
        breakdown(
            "financial-capacity",
            "Financial Capacity",
            vec![
                SubAttribute::new("Income Level", 85, "#3b82f6", High),
                SubAttribute::new("Asset Holdings", 72, "#6366f1", High),
                SubAttribute::new("Credit Score", 78, "#8b5cf6", Medium),
                SubAttribute::new("Debt Ratio", 45, "#a855f7", Medium),
            ],
        ),
        breakdown(
            "digital-engagement",
            "Digital Engagement",
            vec![
                SubAttribute::new("Mobile App Usage", 88, "#10b981", High),
                SubAttribute::new("Online Banking", 76, "#14b8a6", High),
                SubAttribute::new("Digital Payments", 69, "#06b6d4", Medium),
                SubAttribute::new("Chatbot Interactions", 42, "#0ea5e9", Low),
            ],
        ),
        breakdown(
            "product-affinity",
            "Product Affinity",
            vec![
                SubAttribute::new("Product Count", 64, "#f59e0b", High),
                SubAttribute::new("Cross-Sell Response", 58, "#f97316", Medium),
                SubAttribute::new("Card Spend", 71, "#fb923c", Medium),
                SubAttribute::new("Loan Interest", 39, "#fbbf24", Low),
            ],
        ),
        breakdown(
            "risk-tolerance",
            "Risk Tolerance",
            vec![
                SubAttribute::new("Investment Appetite", 55, "#ef4444", High),
                SubAttribute::new("Payment History", 82, "#f43f5e", High),
                SubAttribute::new("Balance Volatility", 47, "#ec4899", Medium),
                SubAttribute::new("Overdraft Usage", 28, "#d946ef", Low),
            ],
        ),
        breakdown(
            "life-stage",
            "Life Stage",
            vec![
                SubAttribute::new("Age Group", 61, "#22c55e", Medium),
                SubAttribute::new("Family Status", 54, "#84cc16", Medium),
                SubAttribute::new("Career Stage", 67, "#65a30d", High),
                SubAttribute::new("Retirement Planning", 33, "#4d7c0f", Low),
            ],
        ),
    ];

    AttributeTable::new(breakdowns, DEFAULT_ATTRIBUTE)
});

fn breakdown(id: &str, label: &str, sub_attributes: Vec<SubAttribute>) -> AttributeBreakdown {
    AttributeBreakdown {
        id: id.to_string(),
        label: label.to_string(),
        sub_attributes,
    }
}

impl AttributeTable {
    /// Build a table; `fallback` should name one of the breakdowns
    pub fn new(breakdowns: Vec<AttributeBreakdown>, fallback: impl Into<String>) -> Self {
        Self {
            entries: breakdowns.into_iter().map(|b| (b.id.clone(), b)).collect(),
            fallback: fallback.into(),
        }
    }

    /// Table shipped with the product
    pub fn builtin() -> &'static AttributeTable {
        &BUILTIN_ATTRIBUTES
    }

    /// Same entries with a different fallback id
    pub fn with_fallback(&self, fallback: impl Into<String>) -> Self {
        Self {
            entries: self.entries.clone(),
            fallback: fallback.into(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&AttributeBreakdown> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn fallback_id(&self) -> &str {
        &self.fallback
    }

    /// Breakdown for `id`, or the fallback breakdown when unknown
    ///
    /// Returns `None` only if the fallback itself is missing.
    pub fn lookup(&self, id: &str) -> Option<&AttributeBreakdown> {
        self.entries.get(id).or_else(|| {
            tracing::warn!(attribute = id, fallback = %self.fallback, "Unknown attribute, using fallback");
            self.entries.get(&self.fallback)
        })
    }

    /// Attribute ids in sorted order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}
