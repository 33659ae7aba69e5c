//! 健康检查

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use tracing::warn;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<ServiceCheck>,
}

#[derive(Debug, Serialize)]
pub struct ServiceCheck {
    pub name: String,
    pub healthy: bool,
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let mut checks = Vec::with_capacity(state.dependencies.len());

    for dependency in state.dependencies.iter() {
        let healthy = match dependency.check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(dependency = dependency.name(), error = %e, "Readiness check failed");
                false
            }
        };
        checks.push(ServiceCheck {
            name: dependency.name().to_string(),
            healthy,
        });
    }

    let ready = checks.iter().all(|c| c.healthy);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(ReadinessResponse { ready, checks }))
}
