//! Price book: the rate matrix the calculator reads.
//!
//! The book is configuration, not code: it ships with builtin defaults and
//! can be replaced by a JSON resource at startup. Every keyed table is
//! validated for exhaustiveness at load time, so a missing entry is a
//! deployment error rather than a runtime surprise.

pub mod catalog;
pub mod load;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    AccessDifficulty, Factor, Frequency, Money, Percent, PestType, PropertyType, Severity,
};

pub use catalog::builtin_catalog;
pub use load::{load_catalog_from_file, load_pricebook_from_file, PriceBookError};

/// Base rate entry for one pest category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PestRate {
    /// Per-visit base rate before property/frequency scaling.
    pub base: Money,
    /// Lower bound for the suggested price, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Money>,
    /// Upper bound for the suggested price, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Money>,
}

/// Square footage scaling: the base rate covers `included_sqft`; every
/// square foot beyond that adds `per_extra_sqft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareFootagePolicy {
    pub included_sqft: u32,
    pub per_extra_sqft: Money,
}

/// Travel surcharge: free within `free_radius_miles`, then per-mile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelPolicy {
    #[serde(with = "rust_decimal::serde::float")]
    pub free_radius_miles: rust_decimal::Decimal,
    pub per_mile: Money,
}

/// A schedule surcharge: either a flat amount or a percentage of the
/// base price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Modifier {
    Flat(Money),
    Percent(Percent),
}

impl Modifier {
    /// Resolve the surcharge against the base price.
    pub fn amount(&self, base_price: Money) -> Money {
        match self {
            Modifier::Flat(m) => *m,
            Modifier::Percent(p) => p.of(base_price),
        }
    }
}

/// One contract-length discount tier. The highest tier whose `min_months`
/// is satisfied applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDiscountTier {
    pub min_months: u32,
    pub percent: Percent,
}

/// Multi-unit scaling: each unit beyond the first adds this percentage of
/// the single-unit price (diminishing-return policy lives in the book, not
/// the calculator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitScaling {
    pub additional_unit_percent: Percent,
}

/// The full rate matrix. Immutable at calculation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBook {
    pub pest_rates: HashMap<PestType, PestRate>,
    pub property_multipliers: HashMap<PropertyType, Factor>,
    pub frequency_multipliers: HashMap<Frequency, Factor>,
    pub square_footage: SquareFootagePolicy,
    pub severity_surcharges: HashMap<Severity, Percent>,
    pub access_surcharges: HashMap<AccessDifficulty, Money>,
    pub travel: TravelPolicy,
    pub rush: Modifier,
    pub after_hours: Modifier,
    pub weekend: Modifier,
    /// Must be sorted ascending by `min_months`; validated at load.
    pub contract_discounts: Vec<ContractDiscountTier>,
    pub unit_scaling: UnitScaling,
}

impl PriceBook {
    /// The shipped default book.
    ///
    /// Fixture values referenced by tests: a one-time general treatment for
    /// a single-family home is $150.00 base plus $0.05 per square foot over
    /// 1,500.
    pub fn builtin() -> Self {
        use rust_decimal::Decimal;

        let pest_rates = HashMap::from([
            (PestType::Ants, rate(12500, Some(9900), None)),
            (PestType::Roaches, rate(16500, Some(12500), None)),
            (PestType::Termites, rate(45000, Some(35000), Some(250000))),
            (PestType::BedBugs, rate(37500, Some(30000), Some(200000))),
            (PestType::Rodents, rate(22500, Some(17500), None)),
            (PestType::Mosquitoes, rate(14500, Some(9900), None)),
            (PestType::Wildlife, rate(32500, Some(25000), None)),
            (PestType::General, rate(15000, Some(9900), None)),
        ]);

        let property_multipliers = HashMap::from([
            (PropertyType::SingleFamily, Factor::hundredths(100)),
            (PropertyType::MultiFamily, Factor::hundredths(110)),
            (PropertyType::Apartment, Factor::hundredths(85)),
            (PropertyType::Condo, Factor::hundredths(90)),
            (PropertyType::Townhouse, Factor::hundredths(95)),
            (PropertyType::MobileHome, Factor::hundredths(90)),
            (PropertyType::CommercialOffice, Factor::hundredths(130)),
            (PropertyType::CommercialRetail, Factor::hundredths(140)),
            (PropertyType::CommercialWarehouse, Factor::hundredths(160)),
            (PropertyType::Agricultural, Factor::hundredths(150)),
            (PropertyType::Other, Factor::hundredths(100)),
        ]);

        // Per-visit multiplier: tighter cadences price each visit lower.
        let frequency_multipliers = HashMap::from([
            (Frequency::OneTime, Factor::hundredths(100)),
            (Frequency::Weekly, Factor::hundredths(45)),
            (Frequency::BiWeekly, Factor::hundredths(55)),
            (Frequency::Monthly, Factor::hundredths(65)),
            (Frequency::BiMonthly, Factor::hundredths(75)),
            (Frequency::Quarterly, Factor::hundredths(85)),
            (Frequency::SemiAnnual, Factor::hundredths(95)),
            (Frequency::Annual, Factor::hundredths(100)),
            (Frequency::Custom, Factor::hundredths(100)),
        ]);

        let severity_surcharges = HashMap::from([
            (Severity::None, Percent::ZERO),
            (Severity::Light, Percent::ZERO),
            (Severity::Moderate, Percent::whole(10)),
            (Severity::Severe, Percent::whole(25)),
            (Severity::Critical, Percent::whole(40)),
        ]);

        let access_surcharges = HashMap::from([
            (AccessDifficulty::Easy, Money::ZERO),
            (AccessDifficulty::Moderate, Money::cents(2500)),
            (AccessDifficulty::Difficult, Money::cents(6000)),
            (AccessDifficulty::RequiresEquipment, Money::cents(12500)),
        ]);

        PriceBook {
            pest_rates,
            property_multipliers,
            frequency_multipliers,
            square_footage: SquareFootagePolicy {
                included_sqft: 1500,
                per_extra_sqft: Money::cents(5),
            },
            travel: TravelPolicy {
                free_radius_miles: Decimal::from(15),
                per_mile: Money::cents(150),
            },
            severity_surcharges,
            access_surcharges,
            rush: Modifier::Percent(Percent::whole(20)),
            after_hours: Modifier::Flat(Money::cents(7500)),
            weekend: Modifier::Percent(Percent::whole(10)),
            contract_discounts: vec![
                ContractDiscountTier {
                    min_months: 12,
                    percent: Percent::whole(5),
                },
                ContractDiscountTier {
                    min_months: 24,
                    percent: Percent::whole(10),
                },
                ContractDiscountTier {
                    min_months: 36,
                    percent: Percent::whole(15),
                },
            ],
            unit_scaling: UnitScaling {
                additional_unit_percent: Percent::whole(60),
            },
        }
    }

    /// Reject a misconfigured book before it reaches the calculator.
    ///
    /// Checks exhaustiveness of every keyed table, bound sanity, and the
    /// monotonicity the engine's pricing properties rely on.
    pub fn validate(&self) -> Result<(), PriceBookError> {
        for pest in PestType::ALL {
            let entry = self
                .pest_rates
                .get(&pest)
                .ok_or_else(|| invalid(format!("missing base rate for pest type {}", pest)))?;
            if entry.base.is_negative() {
                return Err(invalid(format!("negative base rate for {}", pest)));
            }
            match (entry.min, entry.max) {
                (Some(min), _) if min.is_negative() => {
                    return Err(invalid(format!("negative min bound for {}", pest)));
                }
                (_, Some(max)) if max.is_negative() => {
                    return Err(invalid(format!("negative max bound for {}", pest)));
                }
                (Some(min), Some(max)) if min > max => {
                    return Err(invalid(format!("min bound above max bound for {}", pest)));
                }
                _ => {}
            }
        }

        for property in PropertyType::ALL {
            let factor = self.property_multipliers.get(&property).ok_or_else(|| {
                invalid(format!("missing property multiplier for {}", property))
            })?;
            if factor.0.is_sign_negative() || factor.0.is_zero() {
                return Err(invalid(format!(
                    "property multiplier for {} must be positive",
                    property
                )));
            }
        }

        for frequency in Frequency::ALL {
            let factor = self.frequency_multipliers.get(&frequency).ok_or_else(|| {
                invalid(format!("missing frequency multiplier for {}", frequency))
            })?;
            if factor.0.is_sign_negative() || factor.0.is_zero() {
                return Err(invalid(format!(
                    "frequency multiplier for {} must be positive",
                    frequency
                )));
            }
        }

        let mut last_pct = Percent::ZERO;
        for severity in Severity::ALL {
            let pct = self
                .severity_surcharges
                .get(&severity)
                .ok_or_else(|| invalid(format!("missing severity surcharge for {}", severity)))?;
            if pct.0.is_sign_negative() {
                return Err(invalid(format!(
                    "severity surcharge for {} must not be negative",
                    severity
                )));
            }
            if *pct < last_pct {
                return Err(invalid(format!(
                    "severity surcharges must not decrease with severity (at {})",
                    severity
                )));
            }
            last_pct = *pct;
        }

        let mut last_surcharge = Money::ZERO;
        for access in AccessDifficulty::ALL {
            let surcharge = self
                .access_surcharges
                .get(&access)
                .ok_or_else(|| invalid(format!("missing access surcharge for {}", access)))?;
            if surcharge.is_negative() {
                return Err(invalid(format!(
                    "access surcharge for {} must not be negative",
                    access
                )));
            }
            if *surcharge < last_surcharge {
                return Err(invalid(format!(
                    "access surcharges must not decrease with difficulty (at {})",
                    access
                )));
            }
            last_surcharge = *surcharge;
        }
        if self
            .access_surcharges
            .get(&AccessDifficulty::Easy)
            .is_some_and(|m| !m.is_zero())
        {
            return Err(invalid("access surcharge for easy must be zero".to_string()));
        }

        if self.square_footage.per_extra_sqft.is_negative() {
            return Err(invalid("per-extra-sqft rate must not be negative".to_string()));
        }
        if self.travel.per_mile.is_negative() {
            return Err(invalid("per-mile rate must not be negative".to_string()));
        }
        if self.travel.free_radius_miles.is_sign_negative() {
            return Err(invalid("free travel radius must not be negative".to_string()));
        }

        for modifier in [&self.rush, &self.after_hours, &self.weekend] {
            match modifier {
                Modifier::Flat(m) if m.is_negative() => {
                    return Err(invalid("schedule surcharge must not be negative".to_string()));
                }
                Modifier::Percent(p) if p.0.is_sign_negative() => {
                    return Err(invalid("schedule surcharge must not be negative".to_string()));
                }
                _ => {}
            }
        }

        let mut last_months = 0u32;
        for tier in &self.contract_discounts {
            if tier.min_months == 0 {
                return Err(invalid("contract discount tier requires min months >= 1".to_string()));
            }
            if tier.min_months <= last_months {
                return Err(invalid(
                    "contract discount tiers must be sorted ascending by min months".to_string(),
                ));
            }
            if tier.percent.0.is_sign_negative() || tier.percent.0 >= rust_decimal::Decimal::ONE_HUNDRED {
                return Err(invalid(
                    "contract discount percent must be within [0, 100)".to_string(),
                ));
            }
            last_months = tier.min_months;
        }

        if self.unit_scaling.additional_unit_percent.0.is_sign_negative() {
            return Err(invalid("additional-unit percent must not be negative".to_string()));
        }

        Ok(())
    }

    /// The discount tier applicable to a contract length, if any.
    pub fn contract_discount_for(&self, months: u32) -> Option<&ContractDiscountTier> {
        self.contract_discounts
            .iter()
            .rev()
            .find(|tier| tier.min_months <= months)
    }
}

fn rate(base: i64, min: Option<i64>, max: Option<i64>) -> PestRate {
    PestRate {
        base: Money::cents(base),
        min: min.map(Money::cents),
        max: max.map(Money::cents),
    }
}

fn invalid(msg: String) -> PriceBookError {
    PriceBookError::Invalid(msg)
}
