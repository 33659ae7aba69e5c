//! 工单仓储接口

use async_trait::async_trait;
use monopilot_common::TenantId;
use monopilot_errors::AppResult;

use crate::domain::entities::{WorkOrder, WorkOrderMaterialLine};
use crate::domain::value_objects::WorkOrderId;

/// 工单仓储接口
#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    /// 按 ID 和租户查找工单，跨租户与不存在同样返回 None
    async fn find_by_id(
        &self,
        id: &WorkOrderId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<WorkOrder>>;

    /// 工单物料行，按 sequence 升序
    async fn find_materials(&self, wo_id: &WorkOrderId) -> AppResult<Vec<WorkOrderMaterialLine>>;
}
