//! HTTP 接口测试

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Request, StatusCode, header};
use monopilot_auth_core::TokenService;
use monopilot_common::{TenantId, UserId};
use monopilot_errors::{AppError, AppResult};
use monopilot_ports::DependencyCheck;
use serde_json::Value;
use tower::ServiceExt;

use common::{MockStore, STORE_FAILURE, handler};
use wo_availability::api::{AppState, router};
use wo_availability::domain::{WorkOrderId, WorkOrderStatus};

const SECRET: &str = "integration-test-secret-0123456789abcdef";

fn token_service() -> TokenService {
    TokenService::new(SECRET, 3600, "monopilot-auth", "monopilot-api")
}

fn bearer(tenant_id: &TenantId) -> String {
    let token = token_service()
        .generate_access_token(&UserId::new(), tenant_id)
        .unwrap();
    format!("Bearer {}", token)
}

struct StaticCheck(&'static str, bool);

#[async_trait]
impl DependencyCheck for StaticCheck {
    fn name(&self) -> &'static str {
        self.0
    }

    async fn check(&self) -> AppResult<()> {
        if self.1 {
            Ok(())
        } else {
            Err(AppError::external_service("unreachable"))
        }
    }
}

fn app(store: Arc<MockStore>, dependencies: Vec<Arc<dyn DependencyCheck>>) -> Router {
    router(AppState::new(handler(store), token_service(), dependencies))
}

async fn send(app: Router, uri: &str, auth: Option<String>) -> (StatusCode, Option<String>, Value) {
    let mut request = Request::builder().uri(uri);
    if let Some(auth) = auth {
        request = request.header(header::AUTHORIZATION, auth);
    }

    let response = app
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);

    (status, content_type, json)
}

fn availability_uri(id: impl std::fmt::Display) -> String {
    format!("/api/planning/work-orders/{}/availability", id)
}

fn seeded() -> (Arc<MockStore>, TenantId, WorkOrderId) {
    let store = MockStore::new();
    let tenant = TenantId::new();
    let wo = store.add_work_order(tenant, WorkOrderStatus::Released);
    let product = store.add_material(wo, "RM-FLOUR", 100.0);
    store.add_lot(tenant, product, 150.0, None);
    (store, tenant, wo)
}

#[tokio::test]
async fn test_returns_availability_payload() {
    let (store, tenant, wo) = seeded();

    let (status, _, body) = send(app(store, vec![]), &availability_uri(wo), Some(bearer(&tenant))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["wo_id"], wo.to_string());
    assert_eq!(body["overall_status"], "sufficient");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["cached"], false);
    assert!(body["checked_at"].is_string());
    assert!(body["cache_expires_at"].is_string());
    assert_eq!(body["summary"]["total_materials"], 1);

    let material = &body["materials"][0];
    for field in [
        "wo_material_id",
        "product_id",
        "product_code",
        "product_name",
        "uom",
        "required_qty",
        "available_qty",
        "reserved_qty",
        "shortage_qty",
        "coverage_percent",
        "status",
        "expired_excluded_qty",
    ] {
        assert!(material.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(material["product_code"], "RM-FLOUR");
    assert_eq!(material["shortage_qty"], -50.0);
}

#[tokio::test]
async fn test_second_request_is_cached_and_refresh_bypasses() {
    let (store, tenant, wo) = seeded();
    let app = app(store, vec![]);
    let uri = availability_uri(wo);

    let (_, _, first) = send(app.clone(), &uri, Some(bearer(&tenant))).await;
    let (_, _, second) = send(app.clone(), &uri, Some(bearer(&tenant))).await;
    let (status, _, refreshed) = send(
        app,
        &format!("{}?refresh=true", uri),
        Some(bearer(&tenant)),
    )
    .await;

    assert_eq!(first["cached"], false);
    assert_eq!(second["cached"], true);
    assert_eq!(first["checked_at"], second["checked_at"]);
    assert_eq!(status, StatusCode::OK);
    assert_eq!(refreshed["cached"], false);
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let (store, _, wo) = seeded();

    let (status, content_type, body) = send(app(store.clone(), vec![]), &availability_uri(wo), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "UNAUTHORIZED");
    assert_eq!(store.store_calls(), 0);
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let (store, _, wo) = seeded();

    let (status, _, body) = send(
        app(store, vec![]),
        &availability_uri(wo),
        Some("Bearer not.a.jwt".to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let (store, tenant, _) = seeded();

    let (status, content_type, body) = send(
        app(store.clone(), vec![]),
        &availability_uri("wo-123"),
        Some(bearer(&tenant)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(content_type.as_deref(), Some("application/problem+json"));
    assert_eq!(body["code"], "INVALID_ID");
    assert_eq!(store.store_calls(), 0);
}

#[tokio::test]
async fn test_invalid_refresh_flag_is_bad_request() {
    let (store, tenant, wo) = seeded();

    let (status, _, body) = send(
        app(store, vec![]),
        &format!("{}?refresh=maybe", availability_uri(wo)),
        Some(bearer(&tenant)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_other_tenant_gets_not_found() {
    let (store, _, wo) = seeded();

    let (status, _, body) = send(
        app(store, vec![]),
        &availability_uri(wo),
        Some(bearer(&TenantId::new())),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["detail"], "Work order not found");
}

#[tokio::test]
async fn test_store_failure_hides_internals() {
    let (store, tenant, wo) = seeded();
    store.fail_inventory(true);

    let (status, _, body) = send(app(store, vec![]), &availability_uri(wo), Some(bearer(&tenant))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "INTERNAL");
    assert_eq!(body["detail"], "Internal server error");
    assert!(!body.to_string().contains(STORE_FAILURE));
    assert!(body.get("materials").is_none());
}

#[tokio::test]
async fn test_disabled_check_still_returns_ok() {
    let (store, tenant, wo) = seeded();
    store.set_check_enabled(tenant, false);

    let (status, _, body) = send(app(store, vec![]), &availability_uri(wo), Some(bearer(&tenant))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enabled"], false);
    assert_eq!(body["overall_status"], "sufficient");
    assert_eq!(body["materials"].as_array().unwrap().len(), 0);
    assert!(body.get("cache_expires_at").is_none());
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let (status, _, body) = send(app(MockStore::new(), vec![]), "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_each_dependency() {
    let ok: Vec<Arc<dyn DependencyCheck>> = vec![
        Arc::new(StaticCheck("postgres", true)),
        Arc::new(StaticCheck("redis", true)),
    ];
    let (status, _, body) = send(app(MockStore::new(), ok), "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);

    let degraded: Vec<Arc<dyn DependencyCheck>> = vec![
        Arc::new(StaticCheck("postgres", true)),
        Arc::new(StaticCheck("redis", false)),
    ];
    let (status, _, body) = send(app(MockStore::new(), degraded), "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["ready"], false);
    assert_eq!(body["checks"][1]["name"], "redis");
    assert_eq!(body["checks"][1]["healthy"], false);
}
