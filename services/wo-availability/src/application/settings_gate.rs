//! 租户物料检查开关

use std::sync::Arc;

use chrono::{DateTime, Utc};
use monopilot_common::TenantId;
use monopilot_errors::AppResult;
use tracing::debug;

use super::dto::AvailabilityResponse;
use crate::domain::{MaterialCheckSettingRepository, WorkOrderId};

/// 开关判定结果
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// 执行完整计算
    Enforce,
    /// 检查已关闭，直接返回中性响应
    Bypass(AvailabilityResponse),
}

/// 唯一判断开关的位置，下游计算不感知开关存在
pub struct SettingsGate {
    repo: Arc<dyn MaterialCheckSettingRepository>,
    default_enabled: bool,
}

impl SettingsGate {
    pub fn new(repo: Arc<dyn MaterialCheckSettingRepository>, default_enabled: bool) -> Self {
        Self {
            repo,
            default_enabled,
        }
    }

    pub async fn decide(
        &self,
        tenant_id: &TenantId,
        wo_id: WorkOrderId,
        now: DateTime<Utc>,
    ) -> AppResult<GateDecision> {
        let setting = self.repo.find(tenant_id).await?;
        let enabled = setting.unwrap_or(self.default_enabled);

        debug!(
            tenant_id = %tenant_id,
            configured = setting.is_some(),
            enabled,
            "Material check setting resolved"
        );

        if enabled {
            Ok(GateDecision::Enforce)
        } else {
            Ok(GateDecision::Bypass(AvailabilityResponse::not_enforced(
                wo_id, now,
            )))
        }
    }
}
