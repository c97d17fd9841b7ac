use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Readiness probe. The price book and catalog are validated at startup,
/// so a serving process is always ready.
pub async fn ready() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ready" })
}
