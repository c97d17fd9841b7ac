//! Quoting factor enums and the assembled `PricingFactors` input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property category being serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    MultiFamily,
    Apartment,
    Condo,
    Townhouse,
    MobileHome,
    CommercialOffice,
    CommercialRetail,
    CommercialWarehouse,
    Agricultural,
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 11] = [
        PropertyType::SingleFamily,
        PropertyType::MultiFamily,
        PropertyType::Apartment,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::MobileHome,
        PropertyType::CommercialOffice,
        PropertyType::CommercialRetail,
        PropertyType::CommercialWarehouse,
        PropertyType::Agricultural,
        PropertyType::Other,
    ];
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyType::SingleFamily => "single_family",
            PropertyType::MultiFamily => "multi_family",
            PropertyType::Apartment => "apartment",
            PropertyType::Condo => "condo",
            PropertyType::Townhouse => "townhouse",
            PropertyType::MobileHome => "mobile_home",
            PropertyType::CommercialOffice => "commercial_office",
            PropertyType::CommercialRetail => "commercial_retail",
            PropertyType::CommercialWarehouse => "commercial_warehouse",
            PropertyType::Agricultural => "agricultural",
            PropertyType::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Target pest category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PestType {
    Ants,
    Roaches,
    Termites,
    BedBugs,
    Rodents,
    Mosquitoes,
    Wildlife,
    General,
}

impl PestType {
    pub const ALL: [PestType; 8] = [
        PestType::Ants,
        PestType::Roaches,
        PestType::Termites,
        PestType::BedBugs,
        PestType::Rodents,
        PestType::Mosquitoes,
        PestType::Wildlife,
        PestType::General,
    ];
}

impl fmt::Display for PestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PestType::Ants => "ants",
            PestType::Roaches => "roaches",
            PestType::Termites => "termites",
            PestType::BedBugs => "bed_bugs",
            PestType::Rodents => "rodents",
            PestType::Mosquitoes => "mosquitoes",
            PestType::Wildlife => "wildlife",
            PestType::General => "general",
        };
        write!(f, "{}", s)
    }
}

/// Infestation severity, ordered none < light < moderate < severe < critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Light,
    Moderate,
    Severe,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::None,
        Severity::Light,
        Severity::Moderate,
        Severity::Severe,
        Severity::Critical,
    ];

    /// Ordinal rank, 0 for `None` through 4 for `Critical`.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::None => 0,
            Severity::Light => 1,
            Severity::Moderate => 2,
            Severity::Severe => 3,
            Severity::Critical => 4,
        }
    }

    /// Human-readable label for adjustment line items.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::None => "No",
            Severity::Light => "Light",
            Severity::Moderate => "Moderate",
            Severity::Severe => "Severe",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::None => "none",
            Severity::Light => "light",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
            Severity::Critical => "critical",
        };
        write!(f, "{}", s)
    }
}

/// Service cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Weekly,
    BiWeekly,
    Monthly,
    BiMonthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Custom,
}

impl Frequency {
    pub const ALL: [Frequency; 9] = [
        Frequency::OneTime,
        Frequency::Weekly,
        Frequency::BiWeekly,
        Frequency::Monthly,
        Frequency::BiMonthly,
        Frequency::Quarterly,
        Frequency::SemiAnnual,
        Frequency::Annual,
        Frequency::Custom,
    ];

    /// Visits per year implied by the cadence.
    ///
    /// `OneTime` counts as a single visit only when the caller treats the
    /// quote as recurring. `Custom` has no defined cadence and yields 0;
    /// the annual value then falls back to the per-visit price.
    pub fn visits_per_year(&self, is_recurring: bool) -> u32 {
        match self {
            Frequency::OneTime => u32::from(is_recurring),
            Frequency::Weekly => 52,
            Frequency::BiWeekly => 26,
            Frequency::Monthly => 12,
            Frequency::BiMonthly => 6,
            Frequency::Quarterly => 4,
            Frequency::SemiAnnual => 2,
            Frequency::Annual => 1,
            Frequency::Custom => 0,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Frequency::OneTime => "one_time",
            Frequency::Weekly => "weekly",
            Frequency::BiWeekly => "bi_weekly",
            Frequency::Monthly => "monthly",
            Frequency::BiMonthly => "bi_monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::SemiAnnual => "semi_annual",
            Frequency::Annual => "annual",
            Frequency::Custom => "custom",
        };
        write!(f, "{}", s)
    }
}

/// Site access difficulty, ordered easy < moderate < difficult <
/// requires_equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDifficulty {
    Easy,
    Moderate,
    Difficult,
    RequiresEquipment,
}

impl AccessDifficulty {
    pub const ALL: [AccessDifficulty; 4] = [
        AccessDifficulty::Easy,
        AccessDifficulty::Moderate,
        AccessDifficulty::Difficult,
        AccessDifficulty::RequiresEquipment,
    ];

    /// Ordinal rank, 0 for `Easy` through 3 for `RequiresEquipment`.
    pub fn rank(&self) -> u8 {
        match self {
            AccessDifficulty::Easy => 0,
            AccessDifficulty::Moderate => 1,
            AccessDifficulty::Difficult => 2,
            AccessDifficulty::RequiresEquipment => 3,
        }
    }
}

impl fmt::Display for AccessDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AccessDifficulty::Easy => "easy",
            AccessDifficulty::Moderate => "moderate",
            AccessDifficulty::Difficult => "difficult",
            AccessDifficulty::RequiresEquipment => "requires_equipment",
        };
        write!(f, "{}", s)
    }
}

/// The assembled input to a price calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingFactors {
    pub property_type: PropertyType,
    pub square_footage: u32,
    pub pest_type: PestType,
    pub severity: Severity,
    pub frequency: Frequency,
    pub access_difficulty: AccessDifficulty,
    /// Miles from the servicing branch.
    #[serde(with = "rust_decimal::serde::float")]
    pub distance_from_branch: Decimal,
    #[serde(default)]
    pub is_rush: bool,
    #[serde(default)]
    pub is_after_hours: bool,
    #[serde(default)]
    pub is_weekend: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_length_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_units: Option<u32>,
}
