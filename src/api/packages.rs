use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;
use crate::domain::ServicePackage;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagesResponse {
    pub packages: Vec<ServicePackage>,
}

pub async fn get_packages(State(state): State<AppState>) -> Json<PackagesResponse> {
    Json(PackagesResponse {
        packages: state.packages.as_ref().clone(),
    })
}
