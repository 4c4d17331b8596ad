use actix_web::{web, HttpResponse};

use ks_shared::{HealthResponse, HealthStatus};

use crate::app::AppState;

const SERVICE_NAME: &str = "keystone-api";

/// Health check endpoint handler
///
/// Reports `unhealthy` with 503 when the store does not answer a ping.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = HealthResponse::healthy(SERVICE_NAME, env!("CARGO_PKG_VERSION"));

    match state.store.ping().await {
        Ok(()) => HttpResponse::Ok().json(healthy),
        Err(e) => {
            tracing::warn!(error = %e, "Store ping failed");
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: HealthStatus::Unhealthy,
                ..healthy
            })
        }
    }
}
