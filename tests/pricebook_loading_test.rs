//! End-to-end tests for operator-supplied price books and package catalogs.

use pestquote::domain::{
    AccessDifficulty, Frequency, Money, PestType, PricingFactors, PropertyType, Severity,
};
use pestquote::engine::{calculate_price, calculate_tiered_options};
use pestquote::pricebook::{
    builtin_catalog, load_catalog_from_file, load_pricebook_from_file, PriceBook,
};
use rust_decimal::Decimal;
use tempfile::TempDir;

fn factors() -> PricingFactors {
    PricingFactors {
        property_type: PropertyType::SingleFamily,
        square_footage: 1500,
        pest_type: PestType::Ants,
        severity: Severity::Light,
        frequency: Frequency::OneTime,
        access_difficulty: AccessDifficulty::Easy,
        distance_from_branch: Decimal::ZERO,
        is_rush: false,
        is_after_hours: false,
        is_weekend: false,
        contract_length_months: None,
        number_of_units: None,
    }
}

fn write_json<T: serde::Serialize>(dir: &TempDir, name: &str, value: &T) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_custom_rates_flow_through_to_quotes() {
    let mut book = PriceBook::builtin();
    let builtin_price = calculate_price(&factors(), &book, false).unwrap();

    // Double the ant base rate and reload through the file path.
    let rate = book.pest_rates.get_mut(&PestType::Ants).unwrap();
    rate.base = rate.base * 2;
    if let Some(max) = rate.max.as_mut() {
        *max = *max * 2;
    }

    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "pricebook.json", &book);
    let loaded = load_pricebook_from_file(&path).expect("load failed");

    let custom_price = calculate_price(&factors(), &loaded, false).unwrap();
    assert_eq!(custom_price.base_price, builtin_price.base_price * 2);
}

#[test]
fn test_custom_catalog_flows_through_to_tiers() {
    let mut catalog = builtin_catalog();
    // Keep only the basic package and rename it.
    catalog.truncate(1);
    catalog[0].name = "Starter Shield".to_string();
    catalog[0].is_popular = true;

    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "catalog.json", &catalog);
    let loaded = load_catalog_from_file(&path).expect("load failed");

    let options =
        calculate_tiered_options(&factors(), &loaded, &PriceBook::builtin()).unwrap();
    assert_eq!(options.len(), 1);
    assert_eq!(options[0].package.name, "Starter Shield");
    assert!(options[0].is_recommended);
}

#[test]
fn test_incomplete_book_rejected_before_serving() {
    let mut book = PriceBook::builtin();
    book.frequency_multipliers.remove(&Frequency::Quarterly);

    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "pricebook.json", &book);
    let err = load_pricebook_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("quarterly"), "got: {}", err);
}

#[test]
fn test_bounds_from_custom_book_clamp_quotes() {
    let mut book = PriceBook::builtin();
    let rate = book.pest_rates.get_mut(&PestType::Ants).unwrap();
    rate.min = Some(Money::dollars(500));

    let dir = TempDir::new().unwrap();
    let path = write_json(&dir, "pricebook.json", &book);
    let loaded = load_pricebook_from_file(&path).expect("load failed");

    let price = calculate_price(&factors(), &loaded, false).unwrap();
    assert_eq!(price.suggested_price, Money::dollars(500));
    assert!(price.clamped.is_some());
}
