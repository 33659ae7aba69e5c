//! 库存批次仓储接口

use async_trait::async_trait;
use monopilot_common::TenantId;
use monopilot_errors::AppResult;

use crate::domain::entities::InventoryLot;
use crate::domain::value_objects::ProductId;

#[async_trait]
pub trait InventoryLotRepository: Send + Sync {
    /// 某产品在租户内的可用批次（available / reserved），包含已过期批次
    async fn find_usable_lots(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Vec<InventoryLot>>;
}
