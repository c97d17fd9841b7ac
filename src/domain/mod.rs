//! Domain types for the quoting engine.
//!
//! This module provides:
//! - Exact money handling: integer cents plus Percent/Factor wrappers
//! - Quoting factor enums and the assembled PricingFactors input
//! - Calculation outputs: PriceAdjustment, CalculatedPrice, tier options
//! - Currency formatting helpers with round-trip-safe parsing

pub mod factors;
pub mod money;
pub mod quote;

pub use factors::{
    AccessDifficulty, Frequency, PestType, PricingFactors, PropertyType, Severity,
};
pub use money::{format_currency, parse_currency, Factor, Money, MoneyParseError, Percent};
pub use quote::{
    CalculatedPrice, PackageTier, PriceAdjustment, PriceBound, ServicePackage, TieredQuoteOption,
};
