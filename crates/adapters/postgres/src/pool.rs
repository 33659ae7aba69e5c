//! 只读连接池与就绪探测
//!
//! 引擎只执行查询，连接池参数全部来自 `[database]` 配置。

use std::time::Duration;

use async_trait::async_trait;
use monopilot_config::DatabaseConfig;
use monopilot_errors::{AppError, AppResult};
use monopilot_ports::DependencyCheck;
use secrecy::ExposeSecret;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

/// 按配置构造连接池参数，min 不超过 max
pub fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
}

/// 建立连接池
pub async fn connect(config: &DatabaseConfig) -> AppResult<PgPool> {
    let pool = pool_options(config)
        .connect(config.url.expose_secret())
        .await
        .map_err(|e| AppError::database(format!("Failed to create pool: {}", e)))?;

    debug!(
        max_connections = config.max_connections,
        "PostgreSQL pool connected"
    );
    Ok(pool)
}

/// `SELECT 1` 探测
pub struct PostgresProbe {
    pool: PgPool,
}

impl PostgresProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DependencyCheck for PostgresProbe {
    fn name(&self) -> &'static str {
        "postgres"
    }

    async fn check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database health check failed: {}", e)))?;
        Ok(())
    }
}
