// src/handlers/health.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{common::error::ApiError, config::AppState};

// GET /
pub async fn root() -> &'static str {
    "Server Çalışıyor!"
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Database reachable", body = String),
        (status = 503, description = "Database unreachable")
    )
)]
pub async fn health(State(app_state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    app_state
        .customer_service
        .ping()
        .await
        .map_err(|e| {
            tracing::error!("health check failed: {}", e);
            ApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Veritabanına ulaşılamıyor.")
        })?;

    Ok((StatusCode::OK, "OK"))
}
