//! API 路由

use axum::{Router, middleware, routing::get};

use super::availability::get_availability;
use super::health::{health_check, readiness_check};
use super::middleware::auth_middleware;
use super::state::AppState;

/// 组装服务路由，`/health` 与 `/ready` 无需认证
pub fn router(state: AppState) -> Router {
    let planning = Router::new()
        .route("/work-orders/{id}/availability", get(get_availability))
        .route_layer(middleware::from_fn_with_state(
            state.token_service.clone(),
            auth_middleware,
        ));

    Router::new()
        .nest("/api/planning", planning)
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .with_state(state)
}
