use async_trait::async_trait;
use monopilot_common::TenantId;
use monopilot_errors::AppResult;

/// 租户级物料检查开关
#[async_trait]
pub trait MaterialCheckSettingRepository: Send + Sync {
    /// 没有设置记录时返回 None
    async fn find(&self, tenant_id: &TenantId) -> AppResult<Option<bool>>;
}
