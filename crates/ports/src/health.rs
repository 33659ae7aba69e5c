//! 就绪探测 trait

use async_trait::async_trait;
use monopilot_errors::AppResult;

/// 可探测的外部依赖（`/ready` 使用）
#[async_trait]
pub trait DependencyCheck: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self) -> AppResult<()>;
}
