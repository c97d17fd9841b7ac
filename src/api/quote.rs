use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::{CalculatedPrice, Frequency, PricingFactors};
use crate::engine::calculate_price;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub factors: PricingFactors,
    /// Defaults to true for any cadence other than one_time.
    pub is_recurring: Option<bool>,
}

impl QuoteRequest {
    pub fn is_recurring(&self) -> bool {
        self.is_recurring
            .unwrap_or(self.factors.frequency != Frequency::OneTime)
    }
}

pub async fn post_quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<CalculatedPrice>, AppError> {
    let price = calculate_price(&request.factors, &state.book, request.is_recurring())?;
    Ok(Json(price))
}
