use axum::{http::StatusCode, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `true` while the process is serving requests
    pub status: bool,
}

/// Health check endpoint
///
/// Returns the liveness of the service. It performs no work and cannot fail.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> (StatusCode, ResponseJson<HealthResponse>) {
    (StatusCode::OK, ResponseJson(HealthResponse { status: true }))
}
