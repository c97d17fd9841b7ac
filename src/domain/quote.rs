//! Calculation outputs and the service package catalog types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Frequency, Money, PestType};

/// One line item in a price breakdown. Negative impact is a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdjustment {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub impact: Money,
}

impl PriceAdjustment {
    pub fn new(name: impl Into<String>, description: Option<String>, impact: Money) -> Self {
        Self {
            name: name.into(),
            description,
            impact,
        }
    }
}

/// Which bound the suggested price was clamped to, when it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceBound {
    Min,
    Max,
}

/// The result of a price calculation.
///
/// Invariants: `suggested_price` is `base_price + Σ adjustments.impact`
/// clamped to the book's bounds (`clamped` records which bound applied);
/// `annual_value` is `suggested_price * visits_per_year` when the cadence
/// yields visits, otherwise `suggested_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPrice {
    pub base_price: Money,
    pub subtotal: Money,
    pub adjustments: Vec<PriceAdjustment>,
    pub suggested_price: Money,
    pub annual_value: Money,
    pub visits_per_year: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clamped: Option<PriceBound>,
}

/// Package tier, ordered basic < standard < premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageTier {
    Basic,
    Standard,
    Premium,
}

impl PackageTier {
    /// Ordinal rank used for the recommendation tie-break.
    pub fn rank(&self) -> u8 {
        match self {
            PackageTier::Basic => 0,
            PackageTier::Standard => 1,
            PackageTier::Premium => 2,
        }
    }
}

impl fmt::Display for PackageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PackageTier::Basic => "basic",
            PackageTier::Standard => "standard",
            PackageTier::Premium => "premium",
        };
        write!(f, "{}", s)
    }
}

/// A named service package: fixed cadence, feature set, and pest coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    pub tier: PackageTier,
    pub name: String,
    pub description: String,
    pub frequency: Frequency,
    pub features: Vec<String>,
    pub guarantees: Vec<String>,
    pub covered_pests: Vec<PestType>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<Money>,
}

/// One priced package option, derived per quote request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredQuoteOption {
    pub tier: PackageTier,
    pub package: ServicePackage,
    pub calculated_price: CalculatedPrice,
    pub is_recommended: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(PackageTier::Basic < PackageTier::Standard);
        assert!(PackageTier::Standard < PackageTier::Premium);
        assert_eq!(PackageTier::Standard.rank(), 1);
    }

    #[test]
    fn test_adjustment_description_omitted_when_none() {
        let adj = PriceAdjustment::new("Travel surcharge", None, Money::cents(500));
        let json = serde_json::to_value(&adj).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["impact"], 500);
    }

    #[test]
    fn test_calculated_price_serializes_camel_case() {
        let price = CalculatedPrice {
            base_price: Money::cents(17500),
            subtotal: Money::cents(18000),
            adjustments: vec![PriceAdjustment::new(
                "Severe infestation surcharge",
                Some("25% of base rate".to_string()),
                Money::cents(500),
            )],
            suggested_price: Money::cents(18000),
            annual_value: Money::cents(72000),
            visits_per_year: 4,
            clamped: None,
        };
        let json = serde_json::to_value(&price).unwrap();
        assert_eq!(json["basePrice"], 17500);
        assert_eq!(json["suggestedPrice"], 18000);
        assert_eq!(json["visitsPerYear"], 4);
        assert!(json.get("clamped").is_none());
    }

    #[test]
    fn test_clamped_bound_serialization() {
        assert_eq!(
            serde_json::to_string(&PriceBound::Min).unwrap(),
            "\"min\""
        );
    }
}
