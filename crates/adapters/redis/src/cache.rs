//! Redis 快照缓存
//!
//! 连接失败与命令失败都映射为 `ExternalService`，由上层决定是否降级。

use async_trait::async_trait;
use monopilot_config::RedisConfig;
use monopilot_errors::{AppError, AppResult};
use monopilot_ports::{CachePort, DependencyCheck};
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Redis Cache
pub struct RedisCache {
    conn: ConnectionManager,
    key_prefix: Option<String>,
}

impl RedisCache {
    /// 按 `[redis]` 配置建立连接，带上配置中的键前缀
    pub async fn connect(config: &RedisConfig) -> AppResult<Self> {
        let client = Client::open(config.url.expose_secret().as_str())
            .map_err(|e| redis_error("open client", e))?;
        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| redis_error("connect", e))?;

        Ok(Self {
            conn,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, key: &str) -> String {
        prefixed_key(self.key_prefix.as_deref(), key)
    }
}

fn redis_error(op: &str, e: redis::RedisError) -> AppError {
    AppError::external_service(format!("Redis {} failed: {}", op, e))
}

/// 多个服务共用一个 Redis 时用前缀区分命名空间
fn prefixed_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, key),
        _ => key.to_string(),
    }
}

/// Redis 的 EX 参数必须大于 0
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CachePort for RedisCache {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.conn.clone();
        conn.get(self.key(key))
            .await
            .map_err(|e| redis_error("get", e))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        let mut conn = self.conn.clone();
        let key = self.key(key);
        let result: redis::RedisResult<()> = match ttl {
            Some(duration) => conn.set_ex(key, value, ttl_secs(duration)).await,
            None => conn.set(key, value).await,
        };
        result.map_err(|e| redis_error("set", e))
    }
}

#[async_trait]
impl DependencyCheck for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn check(&self) -> AppResult<()> {
        let mut conn = self.conn.clone();
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map_err(|e| redis_error("ping", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_key() {
        assert_eq!(
            prefixed_key(Some("mp"), "org:1:wo:2:availability"),
            "mp:org:1:wo:2:availability"
        );
        assert_eq!(prefixed_key(Some(""), "org:1"), "org:1");
        assert_eq!(prefixed_key(None, "org:1"), "org:1");
    }

    #[test]
    fn test_ttl_never_zero() {
        assert_eq!(ttl_secs(Duration::from_millis(200)), 1);
        assert_eq!(ttl_secs(Duration::from_secs(30)), 30);
    }

    #[test]
    fn test_failures_map_to_external_service() {
        let err = redis_error(
            "get",
            redis::RedisError::from((redis::ErrorKind::IoError, "connection reset")),
        );
        assert!(matches!(err, AppError::ExternalService(_)));
        assert_eq!(err.code(), "INTERNAL");
        assert_eq!(err.status_code(), 500);
    }
}
