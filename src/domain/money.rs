//! Integer money in minor currency units (cents).
//!
//! All monetary amounts in the engine are `i64` cents; percentages and
//! multipliers go through rust_decimal and are rounded to the nearest cent
//! exactly once per adjustment (half-up, away from zero).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A monetary amount in minor currency units (cents).
///
/// Serializes to a JSON integer. Negative values are discounts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create a Money from a cent count.
    pub fn cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Create a Money from a whole-dollar count.
    pub fn dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Get the underlying cent count.
    pub fn as_cents(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiply by a decimal quantity (e.g. miles, square feet), rounding
    /// to the nearest cent once.
    pub fn times(&self, qty: Decimal) -> Money {
        Money(round_to_cents(Decimal::from(self.0) * qty))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_currency(*self))
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl std::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl std::ops::Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0 * i64::from(rhs))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

/// A percentage rate (e.g. 12.5 means 12.5%).
///
/// Serializes to a JSON number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Percent(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

impl Percent {
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Create a whole-number percentage (e.g. `Percent::whole(15)` is 15%).
    pub fn whole(pct: i64) -> Self {
        Percent(Decimal::from(pct))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Take this percentage of an amount, rounded to the nearest cent.
    pub fn of(&self, amount: Money) -> Money {
        Money(round_to_cents(
            Decimal::from(amount.0) * self.0 / Decimal::ONE_HUNDRED,
        ))
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

/// A scaling multiplier (e.g. 1.15 scales by +15%).
///
/// Serializes to a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Factor(#[serde(with = "rust_decimal::serde::float")] pub Decimal);

impl Factor {
    pub const ONE: Factor = Factor(Decimal::ONE);

    /// Create a Factor from hundredths (e.g. `Factor::hundredths(115)` is 1.15).
    pub fn hundredths(h: i64) -> Self {
        Factor(Decimal::new(h, 2))
    }

    /// Scale an amount, rounded to the nearest cent.
    pub fn apply(&self, amount: Money) -> Money {
        Money(round_to_cents(Decimal::from(amount.0) * self.0))
    }
}

impl Default for Factor {
    fn default() -> Self {
        Factor::ONE
    }
}

/// Round a decimal cent amount to a whole number of cents, half-up
/// (midpoint away from zero). Saturates at i64 bounds.
fn round_to_cents(d: Decimal) -> i64 {
    let rounded = d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("not a currency amount: {0}")]
    Malformed(String),
    #[error("more than two decimal places: {0}")]
    TooPrecise(String),
}

/// Format cents as a display string, e.g. `Money(123456)` -> `"$1,234.56"`.
pub fn format_currency(amount: Money) -> String {
    let sign = if amount.0 < 0 { "-" } else { "" };
    let abs = amount.0.unsigned_abs();
    let dollars = abs / 100;
    let cents = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}${}.{:02}", sign, grouped, cents)
}

/// Parse a display string back into cents. Accepts an optional leading
/// minus, an optional dollar sign, and comma grouping.
///
/// Round-trip safe: `parse_currency(&format_currency(m)) == Ok(m)`.
pub fn parse_currency(input: &str) -> Result<Money, MoneyParseError> {
    use std::str::FromStr;

    let trimmed = input.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(r) => (true, r),
        None => (false, trimmed),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);
    let cleaned: String = rest.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err(MoneyParseError::Malformed(input.to_string()));
    }

    let value =
        Decimal::from_str(&cleaned).map_err(|_| MoneyParseError::Malformed(input.to_string()))?;
    if value.is_sign_negative() {
        // The sign belongs before the dollar symbol.
        return Err(MoneyParseError::Malformed(input.to_string()));
    }

    let cents = value * Decimal::ONE_HUNDRED;
    if cents.fract() != Decimal::ZERO {
        return Err(MoneyParseError::TooPrecise(input.to_string()));
    }
    let cents = cents
        .to_i64()
        .ok_or_else(|| MoneyParseError::Malformed(input.to_string()))?;

    Ok(Money(if negative { -cents } else { cents }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::cents(1050);
        let b = Money::cents(450);
        assert_eq!(a + b, Money::cents(1500));
        assert_eq!(a - b, Money::cents(600));
        assert_eq!(-a, Money::cents(-1050));
        assert_eq!(a * 3, Money::cents(3150));
    }

    #[test]
    fn test_money_sum() {
        let total: Money = vec![Money::cents(100), Money::cents(-30), Money::cents(5)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::cents(75));
    }

    #[test]
    fn test_percent_rounds_half_up() {
        // 5% of $10.50 = 52.5 cents, rounds up to 53.
        assert_eq!(Percent::whole(5).of(Money::cents(1050)), Money::cents(53));
        // 10% of $1.25 = 12.5 cents, rounds up to 13.
        assert_eq!(Percent::whole(10).of(Money::cents(125)), Money::cents(13));
        // Exact case does not round.
        assert_eq!(Percent::whole(10).of(Money::cents(1000)), Money::cents(100));
    }

    #[test]
    fn test_percent_zero() {
        assert_eq!(Percent::ZERO.of(Money::cents(99999)), Money::ZERO);
        assert!(Percent::ZERO.is_zero());
    }

    #[test]
    fn test_factor_apply() {
        assert_eq!(
            Factor::hundredths(115).apply(Money::cents(10000)),
            Money::cents(11500)
        );
        assert_eq!(Factor::ONE.apply(Money::cents(777)), Money::cents(777));
        // 1.15 * $0.99 = 113.85 cents -> 114.
        assert_eq!(
            Factor::hundredths(115).apply(Money::cents(99)),
            Money::cents(114)
        );
    }

    #[test]
    fn test_times_decimal_quantity() {
        use std::str::FromStr;
        let per_mile = Money::cents(150);
        let miles = Decimal::from_str("7.5").unwrap();
        assert_eq!(per_mile.times(miles), Money::cents(1125));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Money::cents(0)), "$0.00");
        assert_eq!(format_currency(Money::cents(5)), "$0.05");
        assert_eq!(format_currency(Money::cents(123456)), "$1,234.56");
        assert_eq!(format_currency(Money::cents(100000000)), "$1,000,000.00");
        assert_eq!(format_currency(Money::cents(-2500)), "-$25.00");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("$1,234.56"), Ok(Money::cents(123456)));
        assert_eq!(parse_currency("$0.05"), Ok(Money::cents(5)));
        assert_eq!(parse_currency("-$25.00"), Ok(Money::cents(-2500)));
        assert_eq!(parse_currency("175"), Ok(Money::cents(17500)));
        assert!(parse_currency("").is_err());
        assert!(parse_currency("$1.2345").is_err());
        assert!(parse_currency("abc").is_err());
    }

    #[test]
    fn test_currency_round_trip() {
        for cents in [0, 5, 99, 100, 12345, 123456, -2500, 100000000] {
            let m = Money::cents(cents);
            let formatted = format_currency(m);
            assert_eq!(
                parse_currency(&formatted),
                Ok(m),
                "round trip failed for {}",
                formatted
            );
        }
    }

    #[test]
    fn test_money_json_is_integer() {
        let json = serde_json::to_value(Money::cents(12345)).unwrap();
        assert!(json.is_i64());
        assert_eq!(json, serde_json::json!(12345));
    }
}
