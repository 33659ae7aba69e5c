//! 行 → 实体转换

use monopilot_common::TenantId;

use super::rows::{LicensePlateRow, ReservationRow, WoMaterialRow, WorkOrderRow};
use crate::domain::{
    InventoryLot, LotStatus, ProductId, ReservationClaim, WoMaterialId, WorkOrder,
    WorkOrderId, WorkOrderMaterialLine, WorkOrderStatus,
};

pub fn work_order_from_row(row: WorkOrderRow) -> WorkOrder {
    WorkOrder {
        id: WorkOrderId(row.id),
        tenant_id: TenantId::from_uuid(row.org_id),
        wo_number: row.wo_number,
        status: WorkOrderStatus::from(row.status.as_str()),
    }
}

pub fn material_line_from_row(row: WoMaterialRow) -> WorkOrderMaterialLine {
    WorkOrderMaterialLine {
        id: WoMaterialId(row.id),
        wo_id: WorkOrderId(row.wo_id),
        product_id: ProductId(row.product_id),
        product_code: row.product_code,
        product_name: row.product_name,
        required_qty: row.required_qty,
        uom: row.uom,
        sequence: row.sequence,
    }
}

/// 状态不可识别或不可用的批次丢弃
pub fn lot_from_row(row: LicensePlateRow) -> Option<InventoryLot> {
    let status = LotStatus::parse(&row.status).filter(LotStatus::is_usable)?;
    Some(InventoryLot {
        product_id: ProductId(row.product_id),
        quantity: row.quantity,
        uom: row.uom,
        expiry_date: row.expiry_date,
        status,
    })
}

pub fn claim_from_row(row: ReservationRow) -> ReservationClaim {
    ReservationClaim {
        wo_id: WorkOrderId(row.wo_id),
        product_id: ProductId(row.product_id),
        reserved_qty: row.reserved_qty,
        consumed_qty: row.consumed_qty,
    }
}
