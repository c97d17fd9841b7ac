//! Tiered option builder: one priced option per service package.
//!
//! A pure projection over the calculator. The package's fixed cadence and
//! pest coverage take precedence over the ambient factors; everything else
//! (property, severity, access, distance, schedule flags) carries through.

use crate::domain::{Frequency, PestType, PricingFactors, ServicePackage, TieredQuoteOption};
use crate::pricebook::PriceBook;

use super::{calculate_price, PricingError};

/// Price every package against the same assessment.
///
/// Output order matches the order of `packages`. Exactly one option is
/// recommended: the first package flagged popular, or the middle package by
/// tier ordering when none is flagged.
pub fn calculate_tiered_options(
    factors: &PricingFactors,
    packages: &[ServicePackage],
    book: &PriceBook,
) -> Result<Vec<TieredQuoteOption>, PricingError> {
    let recommended = recommended_index(packages);

    packages
        .iter()
        .enumerate()
        .map(|(index, package)| {
            let effective = effective_factors(factors, package);
            let is_recurring = package.frequency != Frequency::OneTime;
            let calculated_price = calculate_price(&effective, book, is_recurring)?;
            Ok(TieredQuoteOption {
                tier: package.tier,
                package: package.clone(),
                calculated_price,
                is_recommended: Some(index) == recommended,
            })
        })
        .collect()
}

/// Overlay package-fixed fields onto the ambient factors.
///
/// A pest the package does not cover is priced as the package's
/// general-coverage program, so the tier sheet compares what each package
/// would actually deliver.
fn effective_factors(factors: &PricingFactors, package: &ServicePackage) -> PricingFactors {
    let mut effective = factors.clone();
    effective.frequency = package.frequency;
    if !package.covered_pests.contains(&factors.pest_type) {
        effective.pest_type = PestType::General;
    }
    effective
}

/// Deterministic recommendation: first popular package, else the middle
/// package by (tier rank, position).
fn recommended_index(packages: &[ServicePackage]) -> Option<usize> {
    if let Some(index) = packages.iter().position(|p| p.is_popular) {
        return Some(index);
    }
    if packages.is_empty() {
        return None;
    }
    let mut order: Vec<usize> = (0..packages.len()).collect();
    order.sort_by_key(|&i| (packages[i].tier.rank(), i));
    Some(order[order.len() / 2])
}
