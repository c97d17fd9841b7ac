pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod engine;
pub mod error;
pub mod pricebook;

pub use config::Config;
pub use db::{init_db, Repository, StoredQuote};
pub use domain::{
    AccessDifficulty, CalculatedPrice, Frequency, Money, PackageTier, Percent, PestType,
    PriceAdjustment, PricingFactors, PropertyType, ServicePackage, Severity, TieredQuoteOption,
};
pub use engine::{calculate_price, calculate_tiered_options, PricingError};
pub use error::AppError;
pub use pricebook::PriceBook;
