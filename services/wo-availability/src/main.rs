//! Work-order material availability service

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::routing::get;
use monopilot_adapter_postgres::PostgresProbe;
use monopilot_adapter_redis::RedisCache;
use monopilot_auth_core::TokenService;
use monopilot_common::{RetryConfig, with_retry};
use monopilot_config::{AppConfig, CacheBackend};
use monopilot_ports::{CachePort, DependencyCheck};
use secrecy::ExposeSecret;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use wo_availability::api::{AppState, router};
use wo_availability::application::{AvailabilityHandler, SettingsGate, SnapshotCache};
use wo_availability::infrastructure::cache::MemoryCache;
use wo_availability::infrastructure::persistence::{
    PostgresInventoryLotRepository, PostgresMaterialCheckSettingRepository,
    PostgresReservationRepository, PostgresWorkOrderRepository,
};

/// 访问令牌由身份服务签发，这里只校验
const TOKEN_TTL_SECS: i64 = 3600;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = AppConfig::load("config").context("Failed to load configuration")?;

    // 2. 初始化 tracing / metrics
    monopilot_telemetry::init(&config.telemetry);
    let prometheus = monopilot_telemetry::init_metrics()?;

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Starting service"
    );

    // 3. 连接后端存储（仅启动期重试）
    let retry_config = RetryConfig::default();

    let pool = with_retry(&retry_config, "PostgreSQL connection", || {
        monopilot_adapter_postgres::connect(&config.database)
    })
    .await
    .context("Failed to connect to PostgreSQL")?;
    info!(
        max_connections = config.database.max_connections,
        min_connections = config.database.min_connections,
        "PostgreSQL connection pool created"
    );

    // `/ready` 探测的依赖：Postgres 总是需要，Redis 仅在作为缓存后端时
    let mut dependencies: Vec<Arc<dyn DependencyCheck>> =
        vec![Arc::new(PostgresProbe::new(pool.clone()))];

    let cache_backend: Arc<dyn CachePort> = match config.availability.cache_backend {
        CacheBackend::Redis => {
            let cache = with_retry(&retry_config, "Redis connection", || {
                RedisCache::connect(&config.redis)
            })
            .await
            .map(Arc::new)
            .context("Failed to connect to Redis")?;

            dependencies.push(cache.clone());
            cache
        }
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
    };
    info!(backend = ?config.availability.cache_backend, "Snapshot cache ready");

    // 4. 组装应用
    let handler = AvailabilityHandler::new(
        Arc::new(PostgresWorkOrderRepository::new(pool.clone())),
        Arc::new(PostgresInventoryLotRepository::new(pool.clone())),
        Arc::new(PostgresReservationRepository::new(pool.clone())),
        SettingsGate::new(
            Arc::new(PostgresMaterialCheckSettingRepository::new(pool.clone())),
            config.availability.default_enabled,
        ),
        SnapshotCache::new(
            cache_backend,
            Duration::from_secs(config.availability.cache_ttl_secs),
        ),
    );

    let token_service = TokenService::new(
        config.jwt.secret.expose_secret(),
        TOKEN_TTL_SECS,
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
    );

    let state = AppState::new(handler, token_service, dependencies);

    let app = router(state)
        .route(
            "/metrics",
            get(move || {
                let prometheus = prometheus.clone();
                async move { prometheus.render() }
            }),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http());

    // 5. 启动服务器
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Service stopped");
    Ok(())
}

/// 等待关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
