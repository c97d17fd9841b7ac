//! Price calculator: factors + price book -> itemized breakdown.
//!
//! The adjustment order is a contract, not an accident:
//! base price, severity, access, travel, rush/after-hours/weekend,
//! contract discount (against the running subtotal), then clamping.
//! Every percentage rounds to the nearest cent exactly once.

use crate::domain::{
    CalculatedPrice, Frequency, Money, PriceAdjustment, PriceBound, PricingFactors,
};
use crate::pricebook::{PestRate, PriceBook};

use super::PricingError;

/// Compute the suggested price for one service visit.
///
/// Pure and deterministic: identical inputs produce an identical result.
/// `is_recurring` only affects annualization of a `one_time` cadence.
///
/// # Errors
/// `PricingError::Validation` for out-of-domain factors,
/// `PricingError::Configuration` for a factor the book cannot resolve.
/// Fails fast; never returns a defaulted or zero price on error.
pub fn calculate_price(
    factors: &PricingFactors,
    book: &PriceBook,
    is_recurring: bool,
) -> Result<CalculatedPrice, PricingError> {
    validate_factors(factors)?;

    let rate = pest_rate(book, factors)?;
    let base_price = base_price(factors, book, rate)?;

    let mut adjustments: Vec<PriceAdjustment> = Vec::new();
    if let Some(adj) = severity_adjustment(factors, book, base_price)? {
        adjustments.push(adj);
    }
    if let Some(adj) = access_adjustment(factors, book)? {
        adjustments.push(adj);
    }
    if let Some(adj) = travel_adjustment(factors, book) {
        adjustments.push(adj);
    }
    schedule_adjustments(factors, book, base_price, &mut adjustments);
    if let Some(adj) = contract_discount(factors, book, base_price, &adjustments) {
        adjustments.push(adj);
    }

    let subtotal = base_price + adjustments.iter().map(|a| a.impact).sum::<Money>();

    let (suggested_price, clamped) = clamp_to_bounds(subtotal, rate);

    let visits_per_year = factors.frequency.visits_per_year(is_recurring);
    let annual_value = if visits_per_year == 0 {
        suggested_price
    } else {
        suggested_price * visits_per_year
    };

    Ok(CalculatedPrice {
        base_price,
        subtotal,
        adjustments,
        suggested_price,
        annual_value,
        visits_per_year,
        clamped,
    })
}

/// Reject out-of-domain input before touching the book.
fn validate_factors(factors: &PricingFactors) -> Result<(), PricingError> {
    if factors.square_footage == 0 {
        return Err(PricingError::Validation(
            "square footage must be positive".to_string(),
        ));
    }
    if factors.distance_from_branch.is_sign_negative() {
        return Err(PricingError::Validation(
            "distance from branch must not be negative".to_string(),
        ));
    }
    if factors.contract_length_months == Some(0) {
        return Err(PricingError::Validation(
            "contract length must be at least one month".to_string(),
        ));
    }
    if factors.number_of_units == Some(0) {
        return Err(PricingError::Validation(
            "number of units must be at least one".to_string(),
        ));
    }
    Ok(())
}

fn pest_rate<'a>(
    book: &'a PriceBook,
    factors: &PricingFactors,
) -> Result<&'a PestRate, PricingError> {
    book.pest_rates.get(&factors.pest_type).ok_or_else(|| {
        PricingError::Configuration(format!(
            "no base rate for pest type {}",
            factors.pest_type
        ))
    })
}

/// Base price: pest base rate, square footage beyond the included baseline,
/// property and frequency multipliers, then multi-unit scaling.
fn base_price(
    factors: &PricingFactors,
    book: &PriceBook,
    rate: &PestRate,
) -> Result<Money, PricingError> {
    let mut base = rate.base;

    let extra_sqft = factors
        .square_footage
        .saturating_sub(book.square_footage.included_sqft);
    if extra_sqft > 0 {
        base += book.square_footage.per_extra_sqft * extra_sqft;
    }

    let property_multiplier = book
        .property_multipliers
        .get(&factors.property_type)
        .ok_or_else(|| {
            PricingError::Configuration(format!(
                "no property multiplier for {}",
                factors.property_type
            ))
        })?;
    base = property_multiplier.apply(base);

    let frequency_multiplier = book
        .frequency_multipliers
        .get(&factors.frequency)
        .ok_or_else(|| {
            PricingError::Configuration(format!(
                "no frequency multiplier for {}",
                factors.frequency
            ))
        })?;
    base = frequency_multiplier.apply(base);

    if let Some(units) = factors.number_of_units {
        if units > 1 {
            // First unit at full price, each additional at the book's
            // diminished percentage.
            let additional = book
                .unit_scaling
                .additional_unit_percent
                .of(base);
            base += additional * (units - 1);
        }
    }

    Ok(base)
}

fn severity_adjustment(
    factors: &PricingFactors,
    book: &PriceBook,
    base_price: Money,
) -> Result<Option<PriceAdjustment>, PricingError> {
    let pct = book
        .severity_surcharges
        .get(&factors.severity)
        .ok_or_else(|| {
            PricingError::Configuration(format!(
                "no severity surcharge for {}",
                factors.severity
            ))
        })?;
    if pct.is_zero() {
        return Ok(None);
    }
    Ok(Some(PriceAdjustment::new(
        format!("{} infestation surcharge", factors.severity.label()),
        Some(format!("{} of base rate", pct)),
        pct.of(base_price),
    )))
}

fn access_adjustment(
    factors: &PricingFactors,
    book: &PriceBook,
) -> Result<Option<PriceAdjustment>, PricingError> {
    let surcharge = book
        .access_surcharges
        .get(&factors.access_difficulty)
        .ok_or_else(|| {
            PricingError::Configuration(format!(
                "no access surcharge for {}",
                factors.access_difficulty
            ))
        })?;
    if surcharge.is_zero() {
        return Ok(None);
    }
    Ok(Some(PriceAdjustment::new(
        "Access difficulty surcharge",
        Some(format!("{} access", factors.access_difficulty)),
        *surcharge,
    )))
}

fn travel_adjustment(factors: &PricingFactors, book: &PriceBook) -> Option<PriceAdjustment> {
    let extra_miles = factors.distance_from_branch - book.travel.free_radius_miles;
    if extra_miles <= rust_decimal::Decimal::ZERO {
        return None;
    }
    let impact = book.travel.per_mile.times(extra_miles);
    if impact.is_zero() {
        return None;
    }
    Some(PriceAdjustment::new(
        "Travel surcharge",
        Some(format!(
            "{} mi beyond {} mi service radius",
            extra_miles.normalize(),
            book.travel.free_radius_miles.normalize()
        )),
        impact,
    ))
}

/// Rush, after-hours, and weekend surcharges. Each is independent and
/// resolves against the base price, so their order never matters.
fn schedule_adjustments(
    factors: &PricingFactors,
    book: &PriceBook,
    base_price: Money,
    adjustments: &mut Vec<PriceAdjustment>,
) {
    if factors.is_rush {
        adjustments.push(PriceAdjustment::new(
            "Rush service",
            None,
            book.rush.amount(base_price),
        ));
    }
    if factors.is_after_hours {
        adjustments.push(PriceAdjustment::new(
            "After-hours service",
            None,
            book.after_hours.amount(base_price),
        ));
    }
    if factors.is_weekend {
        adjustments.push(PriceAdjustment::new(
            "Weekend service",
            None,
            book.weekend.amount(base_price),
        ));
    }
}

/// Contract-length discount against the running subtotal (base price plus
/// every surcharge so far), so the discount never compounds on itself.
fn contract_discount(
    factors: &PricingFactors,
    book: &PriceBook,
    base_price: Money,
    adjustments: &[PriceAdjustment],
) -> Option<PriceAdjustment> {
    let months = factors.contract_length_months?;
    let tier = book.contract_discount_for(months)?;
    if tier.percent.is_zero() {
        return None;
    }
    let running_subtotal = base_price + adjustments.iter().map(|a| a.impact).sum::<Money>();
    let impact = -tier.percent.of(running_subtotal);
    Some(PriceAdjustment::new(
        format!("{}+ month contract discount", tier.min_months),
        Some(format!("{} off for a {} month agreement", tier.percent, months)),
        impact,
    ))
}

fn clamp_to_bounds(subtotal: Money, rate: &PestRate) -> (Money, Option<PriceBound>) {
    if let Some(min) = rate.min {
        if subtotal < min {
            return (min, Some(PriceBound::Min));
        }
    }
    if let Some(max) = rate.max {
        if subtotal > max {
            return (max, Some(PriceBound::Max));
        }
    }
    (subtotal, None)
}
