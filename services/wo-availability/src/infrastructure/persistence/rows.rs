//! 数据库行映射结构

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// 工单行
#[derive(Debug, FromRow)]
pub struct WorkOrderRow {
    pub id: Uuid,
    pub org_id: Uuid,
    pub wo_number: String,
    pub status: String,
}

/// 工单物料行（关联产品）
#[derive(Debug, FromRow)]
pub struct WoMaterialRow {
    pub id: Uuid,
    pub wo_id: Uuid,
    pub product_id: Uuid,
    pub product_code: String,
    pub product_name: String,
    pub required_qty: f64,
    pub uom: String,
    pub sequence: i32,
}

/// License Plate 行
#[derive(Debug, FromRow)]
pub struct LicensePlateRow {
    pub product_id: Uuid,
    pub quantity: f64,
    pub uom: String,
    pub expiry_date: Option<NaiveDate>,
    pub status: String,
}

/// 预留行
#[derive(Debug, FromRow)]
pub struct ReservationRow {
    pub wo_id: Uuid,
    pub product_id: Uuid,
    pub reserved_qty: f64,
    pub consumed_qty: f64,
}
