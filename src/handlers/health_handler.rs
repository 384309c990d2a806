use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthReport {
    status: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<&'static str>,
}

impl HealthReport {
    fn new(status: &'static str) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store: None,
        }
    }
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthReport::new("healthy"))
}

#[get("/health/live")]
pub async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(HealthReport::new("alive"))
}

/// Ready once the quest store answers a ping.
#[get("/health/ready")]
pub async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    match state.quest_service.store_health().await {
        Ok(()) => HttpResponse::Ok().json(HealthReport {
            store: Some("ok"),
            ..HealthReport::new("ready")
        }),
        Err(e) => {
            log::warn!("Quest store is not ready: {}", e);
            HttpResponse::ServiceUnavailable().json(HealthReport {
                store: Some("unreachable"),
                ..HealthReport::new("not_ready")
            })
        }
    }
}
