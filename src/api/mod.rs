pub mod health;
pub mod packages;
pub mod quote;
pub mod quotes;
pub mod tiers;

use crate::db::Repository;
use crate::domain::ServicePackage;
use crate::pricebook::PriceBook;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub book: Arc<PriceBook>,
    pub packages: Arc<Vec<ServicePackage>>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>, book: PriceBook, packages: Vec<ServicePackage>) -> Self {
        Self {
            repo,
            book: Arc::new(book),
            packages: Arc::new(packages),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/v1/quote", post(quote::post_quote))
        .route("/v1/quote/tiers", post(tiers::post_tiers))
        .route("/v1/packages", get(packages::get_packages))
        .route("/v1/quotes", post(quotes::create_quote).get(quotes::list_quotes))
        .route("/v1/quotes/:id", get(quotes::get_quote))
        .layer(cors)
        .with_state(state)
}
