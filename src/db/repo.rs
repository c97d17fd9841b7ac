//! Repository layer for the quote log.

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::domain::{
    CalculatedPrice, Money, PackageTier, PriceAdjustment, PriceBound, PricingFactors,
};

/// A persisted quote: the engine output plus the factors that produced it,
/// stored verbatim for auditability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredQuote {
    pub id: Uuid,
    pub issued_at_ms: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<PackageTier>,
    pub is_recurring: bool,
    pub factors: PricingFactors,
    pub price: CalculatedPrice,
}

pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert_quote(&self, quote: &StoredQuote) -> Result<(), sqlx::Error> {
        let factors_json = to_json(&quote.factors)?;
        let adjustments_json = to_json(&quote.price.adjustments)?;
        let tier = quote.tier.map(|t| t.to_string());
        let clamped = quote.price.clamped.map(|b| match b {
            PriceBound::Min => "min".to_string(),
            PriceBound::Max => "max".to_string(),
        });

        sqlx::query(
            r#"
            INSERT INTO quotes (
                id, issued_at_ms, tier, is_recurring, factors_json,
                base_price_cents, subtotal_cents, suggested_price_cents,
                annual_value_cents, visits_per_year, adjustments_json, clamped
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quote.id.to_string())
        .bind(quote.issued_at_ms)
        .bind(tier)
        .bind(quote.is_recurring)
        .bind(factors_json)
        .bind(quote.price.base_price.as_cents())
        .bind(quote.price.subtotal.as_cents())
        .bind(quote.price.suggested_price.as_cents())
        .bind(quote.price.annual_value.as_cents())
        .bind(i64::from(quote.price.visits_per_year))
        .bind(adjustments_json)
        .bind(clamped)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Most recent quotes, newest first; id breaks issued-at ties so the
    /// listing is deterministic.
    pub async fn list_quotes(&self, limit: i64) -> Result<Vec<StoredQuote>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, issued_at_ms, tier, is_recurring, factors_json,
                   base_price_cents, subtotal_cents, suggested_price_cents,
                   annual_value_cents, visits_per_year, adjustments_json, clamped
            FROM quotes
            ORDER BY issued_at_ms DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_quote).collect()
    }

    pub async fn get_quote(&self, id: &Uuid) -> Result<Option<StoredQuote>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, issued_at_ms, tier, is_recurring, factors_json,
                   base_price_cents, subtotal_cents, suggested_price_cents,
                   annual_value_cents, visits_per_year, adjustments_json, clamped
            FROM quotes
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_quote).transpose()
    }
}

fn row_to_quote(row: &SqliteRow) -> Result<StoredQuote, sqlx::Error> {
    let id_str: String = row.get("id");
    let id = Uuid::parse_str(&id_str).map_err(decode_err)?;

    let tier: Option<String> = row.get("tier");
    let tier = tier.as_deref().map(parse_tier).transpose()?;

    let factors_json: String = row.get("factors_json");
    let factors: PricingFactors = serde_json::from_str(&factors_json).map_err(decode_err)?;

    let adjustments_json: String = row.get("adjustments_json");
    let adjustments: Vec<PriceAdjustment> =
        serde_json::from_str(&adjustments_json).map_err(decode_err)?;

    let clamped: Option<String> = row.get("clamped");
    let clamped = match clamped.as_deref() {
        None => None,
        Some("min") => Some(PriceBound::Min),
        Some("max") => Some(PriceBound::Max),
        Some(other) => {
            return Err(decode_err(format!("unknown clamp bound: {}", other)));
        }
    };

    let visits_per_year: i64 = row.get("visits_per_year");

    Ok(StoredQuote {
        id,
        issued_at_ms: row.get("issued_at_ms"),
        tier,
        is_recurring: row.get("is_recurring"),
        factors,
        price: CalculatedPrice {
            base_price: Money::cents(row.get("base_price_cents")),
            subtotal: Money::cents(row.get("subtotal_cents")),
            adjustments,
            suggested_price: Money::cents(row.get("suggested_price_cents")),
            annual_value: Money::cents(row.get("annual_value_cents")),
            visits_per_year: visits_per_year as u32,
            clamped,
        },
    })
}

fn parse_tier(s: &str) -> Result<PackageTier, sqlx::Error> {
    match s {
        "basic" => Ok(PackageTier::Basic),
        "standard" => Ok(PackageTier::Standard),
        "premium" => Ok(PackageTier::Premium),
        other => Err(decode_err(format!("unknown package tier: {}", other))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(decode_err)
}

fn decode_err<E: Into<Box<dyn std::error::Error + Send + Sync>>>(err: E) -> sqlx::Error {
    sqlx::Error::Decode(err.into())
}
