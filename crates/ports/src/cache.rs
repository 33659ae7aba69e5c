//! Cache trait 定义

use async_trait::async_trait;
use monopilot_errors::AppResult;
use std::time::Duration;

/// 键值缓存 trait
///
/// 任何带 TTL 语义的键值存储（进程内 map、Redis 等）都可以实现。
#[async_trait]
pub trait CachePort: Send + Sync {
    /// 获取缓存值，不存在或已过期返回 None
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 设置缓存值（覆盖写）
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;
}
