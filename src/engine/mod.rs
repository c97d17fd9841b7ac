//! Pure quoting engine: deterministic, no I/O, no shared state.

pub mod calculator;
pub mod tiers;

use thiserror::Error;

pub use calculator::calculate_price;
pub use tiers::calculate_tiered_options;

/// Failure taxonomy for a price calculation.
///
/// `Configuration` means the price book is missing an entry the factors
/// require; it is fatal and never degrades to a default price.
/// `Validation` means the caller supplied an out-of-domain factor and can
/// correct the input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PricingError {
    #[error("price book configuration error: {0}")]
    Configuration(String),
    #[error("invalid pricing input: {0}")]
    Validation(String),
}
