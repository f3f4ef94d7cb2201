use actix_web::{web, HttpResponse};
use chrono::Utc;

use bc_core::services::verification::EmailServiceTrait;

use crate::app::AppState;
use crate::dto::HealthResponse;

/// Health check endpoint handler
pub async fn health_check<E>(state: web::Data<AppState<E>>) -> HttpResponse
where
    E: EmailServiceTrait + 'static,
{
    let pending = state.verification_service.registry().pending_count().await;
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "bouncer".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pending_verifications: pending,
        timestamp: Utc::now(),
    })
}
