//! 响应结构

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AvailabilityResult, AvailabilityStatus, ProductId, WoMaterialId, WorkOrderId,
    WorkOrderMaterialLine,
};

/// 单条物料的可用性
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialAvailability {
    pub wo_material_id: WoMaterialId,
    pub product_id: ProductId,
    pub product_code: String,
    pub product_name: String,
    pub uom: String,
    pub required_qty: f64,
    pub available_qty: f64,
    pub reserved_qty: f64,
    pub shortage_qty: f64,
    pub coverage_percent: f64,
    pub status: AvailabilityStatus,
    pub expired_excluded_qty: f64,
}

impl MaterialAvailability {
    pub fn new(line: &WorkOrderMaterialLine, result: AvailabilityResult) -> Self {
        Self {
            wo_material_id: line.id,
            product_id: line.product_id,
            product_code: line.product_code.clone(),
            product_name: line.product_name.clone(),
            uom: line.uom.clone(),
            required_qty: result.required_qty,
            available_qty: result.available_qty,
            reserved_qty: result.reserved_qty,
            shortage_qty: result.shortage_qty,
            coverage_percent: result.coverage_percent,
            status: result.status,
            expired_excluded_qty: result.expired_excluded_qty,
        }
    }
}

/// 汇总计数
///
/// `shortage_count` 同时统计 shortage 和 no_stock。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySummary {
    pub total_materials: usize,
    pub sufficient_count: usize,
    pub low_stock_count: usize,
    pub shortage_count: usize,
}

impl AvailabilitySummary {
    pub fn from_materials(materials: &[MaterialAvailability]) -> Self {
        materials.iter().fold(
            Self {
                total_materials: materials.len(),
                ..Default::default()
            },
            |mut summary, material| {
                match material.status {
                    AvailabilityStatus::Sufficient => summary.sufficient_count += 1,
                    AvailabilityStatus::LowStock => summary.low_stock_count += 1,
                    AvailabilityStatus::Shortage | AvailabilityStatus::NoStock => {
                        summary.shortage_count += 1
                    }
                }
                summary
            },
        )
    }
}

/// 工单可用性响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub wo_id: WorkOrderId,
    pub checked_at: DateTime<Utc>,
    pub overall_status: AvailabilityStatus,
    pub materials: Vec<MaterialAvailability>,
    pub summary: AvailabilitySummary,
    pub enabled: bool,
    pub cached: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_expires_at: Option<DateTime<Utc>>,
}

impl AvailabilityResponse {
    /// 由逐行结果组装完整响应
    pub fn assemble(
        wo_id: WorkOrderId,
        checked_at: DateTime<Utc>,
        materials: Vec<MaterialAvailability>,
        cache_expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let overall_status = AvailabilityStatus::worst(materials.iter().map(|m| m.status));
        let summary = AvailabilitySummary::from_materials(&materials);

        Self {
            wo_id,
            checked_at,
            overall_status,
            materials,
            summary,
            enabled: true,
            cached: false,
            cache_expires_at,
        }
    }

    /// 检查被租户关闭时的中性响应
    pub fn not_enforced(wo_id: WorkOrderId, checked_at: DateTime<Utc>) -> Self {
        Self {
            wo_id,
            checked_at,
            overall_status: AvailabilityStatus::Sufficient,
            materials: Vec::new(),
            summary: AvailabilitySummary::default(),
            enabled: false,
            cached: false,
            cache_expires_at: None,
        }
    }

    pub fn mark_cached(mut self) -> Self {
        self.cached = true;
        self
    }
}
