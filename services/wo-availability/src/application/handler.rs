//! 可用性检查编排

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use monopilot_common::TenantId;
use monopilot_errors::{AppError, AppResult};
use tracing::{debug, info, instrument};

use super::dto::{AvailabilityResponse, MaterialAvailability};
use super::settings_gate::{GateDecision, SettingsGate};
use super::snapshot_cache::SnapshotCache;
use crate::domain::{
    InventoryLotRepository, ReservationRepository, WorkOrderId, WorkOrderMaterialLine,
    WorkOrderRepository, calculate,
};

/// 查询：检查工单物料可用性
#[derive(Debug, Clone)]
pub struct CheckAvailabilityQuery {
    /// 未校验的路径参数
    pub wo_id: String,
    pub tenant_id: TenantId,
    /// 跳过缓存读取，重新计算并覆盖快照
    pub refresh: bool,
}

pub struct AvailabilityHandler {
    work_orders: Arc<dyn WorkOrderRepository>,
    lots: Arc<dyn InventoryLotRepository>,
    reservations: Arc<dyn ReservationRepository>,
    gate: SettingsGate,
    cache: SnapshotCache,
}

impl AvailabilityHandler {
    pub fn new(
        work_orders: Arc<dyn WorkOrderRepository>,
        lots: Arc<dyn InventoryLotRepository>,
        reservations: Arc<dyn ReservationRepository>,
        gate: SettingsGate,
        cache: SnapshotCache,
    ) -> Self {
        Self {
            work_orders,
            lots,
            reservations,
            gate,
            cache,
        }
    }

    #[instrument(skip(self, query), fields(wo_id = %query.wo_id, tenant_id = %query.tenant_id))]
    pub async fn check(&self, query: CheckAvailabilityQuery) -> AppResult<AvailabilityResponse> {
        let started = Instant::now();

        // 1. 先校验 ID，不合法时不触碰任何存储
        let wo_id = WorkOrderId::parse(&query.wo_id)?;

        // 2. 工单必须存在且属于当前租户
        let work_order = self
            .work_orders
            .find_by_id(&wo_id, &query.tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Work order not found"))?;

        let now = Utc::now();

        // 3. 租户开关
        if let GateDecision::Bypass(response) =
            self.gate.decide(&query.tenant_id, work_order.id, now).await?
        {
            record(&response, started);
            return Ok(response);
        }

        // 4. 快照缓存
        if !query.refresh {
            if let Some(response) = self.cache.get(&query.tenant_id, &wo_id, now).await {
                record(&response, started);
                return Ok(response);
            }
        }

        // 5. 全量计算
        let response = self.compute(&work_order.id, &query.tenant_id, now).await?;

        // 6. 覆盖写快照
        self.cache.put(&query.tenant_id, &wo_id, &response).await;

        record(&response, started);
        Ok(response)
    }

    async fn compute(
        &self,
        wo_id: &WorkOrderId,
        tenant_id: &TenantId,
        now: DateTime<Utc>,
    ) -> AppResult<AvailabilityResponse> {
        let lines = self.work_orders.find_materials(wo_id).await?;
        let today = now.date_naive();

        debug!(material_count = lines.len(), "Loaded work order materials");

        let materials = try_join_all(
            lines
                .iter()
                .map(|line| self.check_line(line, wo_id, tenant_id, today)),
        )
        .await?;

        Ok(AvailabilityResponse::assemble(
            *wo_id,
            now,
            materials,
            Some(self.cache.expires_at(now)),
        ))
    }

    async fn check_line(
        &self,
        line: &WorkOrderMaterialLine,
        wo_id: &WorkOrderId,
        tenant_id: &TenantId,
        today: chrono::NaiveDate,
    ) -> AppResult<MaterialAvailability> {
        let (lots, reserved_by_others) = futures::try_join!(
            self.lots.find_usable_lots(&line.product_id, tenant_id),
            self.reservations
                .reserved_by_others(&line.product_id, tenant_id, wo_id),
        )?;

        let result = calculate(line.required_qty, &lots, reserved_by_others, today);
        Ok(MaterialAvailability::new(line, result))
    }
}

fn record(response: &AvailabilityResponse, started: Instant) {
    let cached = if response.cached { "true" } else { "false" };
    let enabled = if response.enabled { "true" } else { "false" };

    metrics::counter!("wo_availability_checks_total", "cached" => cached, "enabled" => enabled)
        .increment(1);
    metrics::histogram!("wo_availability_check_duration_seconds")
        .record(started.elapsed().as_secs_f64());

    info!(
        cached = response.cached,
        enabled = response.enabled,
        overall_status = %response.overall_status,
        material_count = response.materials.len(),
        "Availability check completed"
    );
}
