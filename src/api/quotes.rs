//! The persisted quote log: issue, list, and fetch saved quotes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::quote::QuoteRequest;
use crate::api::AppState;
use crate::db::StoredQuote;
use crate::domain::PackageTier;
use crate::engine::calculate_price;
use crate::error::AppError;

const DEFAULT_LIST_LIMIT: i64 = 50;
const MAX_LIST_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuoteRequest {
    #[serde(flatten)]
    pub quote: QuoteRequest,
    #[serde(default)]
    pub tier: Option<PackageTier>,
}

pub async fn create_quote(
    State(state): State<AppState>,
    Json(request): Json<CreateQuoteRequest>,
) -> Result<(StatusCode, Json<StoredQuote>), AppError> {
    let is_recurring = request.quote.is_recurring();
    let price = calculate_price(&request.quote.factors, &state.book, is_recurring)?;

    let stored = StoredQuote {
        id: Uuid::new_v4(),
        issued_at_ms: chrono::Utc::now().timestamp_millis(),
        tier: request.tier,
        is_recurring,
        factors: request.quote.factors,
        price,
    };
    state.repo.insert_quote(&stored).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuotesQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuotesResponse {
    pub quotes: Vec<StoredQuote>,
}

pub async fn list_quotes(
    Query(params): Query<ListQuotesQuery>,
    State(state): State<AppState>,
) -> Result<Json<ListQuotesResponse>, AppError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    if limit < 1 || limit > MAX_LIST_LIMIT {
        return Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}",
            MAX_LIST_LIMIT
        )));
    }

    let quotes = state.repo.list_quotes(limit).await?;
    Ok(Json(ListQuotesResponse { quotes }))
}

pub async fn get_quote(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StoredQuote>, AppError> {
    let id = Uuid::parse_str(&id)
        .map_err(|_| AppError::BadRequest("Invalid quote id".to_string()))?;

    let quote = state
        .repo
        .get_quote(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No quote with id {}", id)))?;

    Ok(Json(quote))
}
