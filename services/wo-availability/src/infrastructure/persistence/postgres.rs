//! PostgreSQL repository implementation

use async_trait::async_trait;
use monopilot_common::TenantId;
use monopilot_errors::{AppError, AppResult};
use sqlx::PgPool;

use super::converters::{claim_from_row, lot_from_row, material_line_from_row, work_order_from_row};
use super::rows::{LicensePlateRow, ReservationRow, WoMaterialRow, WorkOrderRow};
use crate::domain::{
    InventoryLot, InventoryLotRepository, LotStatus, MaterialCheckSettingRepository, ProductId,
    ReservationClaim, ReservationRepository, ReservationStatus, WorkOrder, WorkOrderId,
    WorkOrderMaterialLine, WorkOrderRepository, WorkOrderStatus,
};

// ============================================================================
// WorkOrderRepository 实现
// ============================================================================

pub struct PostgresWorkOrderRepository {
    pool: PgPool,
}

impl PostgresWorkOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkOrderRepository for PostgresWorkOrderRepository {
    async fn find_by_id(
        &self,
        id: &WorkOrderId,
        tenant_id: &TenantId,
    ) -> AppResult<Option<WorkOrder>> {
        let row = sqlx::query_as::<_, WorkOrderRow>(
            r#"
            SELECT id, org_id, wo_number, status
            FROM work_orders
            WHERE id = $1 AND org_id = $2
            "#,
        )
        .bind(id.0)
        .bind(tenant_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询工单失败: {}", e)))?;

        Ok(row.map(work_order_from_row))
    }

    async fn find_materials(&self, wo_id: &WorkOrderId) -> AppResult<Vec<WorkOrderMaterialLine>> {
        let rows = sqlx::query_as::<_, WoMaterialRow>(
            r#"
            SELECT m.id, m.wo_id, m.product_id,
                   p.code AS product_code, p.name AS product_name,
                   m.required_qty::float8 AS required_qty, m.uom, m.sequence
            FROM wo_materials m
            JOIN products p ON p.id = m.product_id
            WHERE m.wo_id = $1
            ORDER BY m.sequence ASC
            "#,
        )
        .bind(wo_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询工单物料失败: {}", e)))?;

        Ok(rows.into_iter().map(material_line_from_row).collect())
    }
}

// ============================================================================
// InventoryLotRepository 实现
// ============================================================================

pub struct PostgresInventoryLotRepository {
    pool: PgPool,
}

impl PostgresInventoryLotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryLotRepository for PostgresInventoryLotRepository {
    async fn find_usable_lots(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
    ) -> AppResult<Vec<InventoryLot>> {
        let statuses: Vec<String> = LotStatus::usable_states()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = sqlx::query_as::<_, LicensePlateRow>(
            r#"
            SELECT product_id, quantity::float8 AS quantity, uom, expiry_date, status
            FROM license_plates
            WHERE product_id = $1 AND org_id = $2 AND status = ANY($3)
            "#,
        )
        .bind(product_id.0)
        .bind(tenant_id.0)
        .bind(statuses)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询库存批次失败: {}", e)))?;

        Ok(rows.into_iter().filter_map(lot_from_row).collect())
    }
}

// ============================================================================
// ReservationRepository 实现
// ============================================================================

pub struct PostgresReservationRepository {
    pool: PgPool,
}

impl PostgresReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationRepository for PostgresReservationRepository {
    async fn reserved_by_others(
        &self,
        product_id: &ProductId,
        tenant_id: &TenantId,
        excluding_wo: &WorkOrderId,
    ) -> AppResult<f64> {
        let terminal: Vec<String> = WorkOrderStatus::terminal_states()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT r.wo_id, lp.product_id,
                   r.reserved_qty::float8 AS reserved_qty,
                   COALESCE(r.consumed_qty, 0)::float8 AS consumed_qty
            FROM wo_material_reservations r
            JOIN license_plates lp ON lp.id = r.lp_id
            JOIN work_orders wo ON wo.id = r.wo_id
            WHERE lp.product_id = $1
              AND r.org_id = $2
              AND r.status = $3
              AND r.wo_id <> $4
              AND wo.status <> ALL($5)
            "#,
        )
        .bind(product_id.0)
        .bind(tenant_id.0)
        .bind(ReservationStatus::Active.as_str())
        .bind(excluding_wo.0)
        .bind(terminal)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询预留失败: {}", e)))?;

        let claims: Vec<ReservationClaim> = rows.into_iter().map(claim_from_row).collect();
        Ok(ReservationClaim::total_remaining(&claims))
    }
}

// ============================================================================
// MaterialCheckSettingRepository 实现
// ============================================================================

pub struct PostgresMaterialCheckSettingRepository {
    pool: PgPool,
}

impl PostgresMaterialCheckSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaterialCheckSettingRepository for PostgresMaterialCheckSettingRepository {
    async fn find(&self, tenant_id: &TenantId) -> AppResult<Option<bool>> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT wo_material_check
            FROM planning_settings
            WHERE org_id = $1
            "#,
        )
        .bind(tenant_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("查询计划设置失败: {}", e)))
    }
}
