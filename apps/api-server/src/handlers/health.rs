//! Health check endpoint.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub index: &'static str,
}

/// Health check endpoint - returns server status and index reachability.
///
/// GET /health
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let index = match state.index.ping().await {
        Ok(()) => "up",
        Err(e) => {
            tracing::warn!(error = %e, "Content index ping failed");
            "down"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        index,
    })
}
