//! 预留台账仓储接口

use async_trait::async_trait;
use monopilot_common::TenantId;
use monopilot_errors::AppResult;

use crate::domain::value_objects::{ProductId, WorkOrderId};

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// 其他未终结工单对该产品仍占用的数量合计
    ///
    /// `excluding_wo` 自己的预留不计入。
    async fn reserved_by_others(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        excluding_wo: &WorkOrderId,
    ) -> AppResult<f64>;
}
