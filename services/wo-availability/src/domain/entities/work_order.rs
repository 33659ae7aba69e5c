//! 工单及其物料行（由生产计划模块维护，这里只读）

use monopilot_common::TenantId;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProductId, WoMaterialId, WorkOrderId};

/// 工单状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    Draft,
    Planned,
    Released,
    InProgress,
    OnHold,
    Completed,
    Closed,
    Cancelled,
}

impl WorkOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Planned => "planned",
            Self::Released => "released",
            Self::InProgress => "in_progress",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Closed => "closed",
            Self::Cancelled => "cancelled",
        }
    }

    /// 终态工单持有的预留不再占用库存
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Closed | Self::Cancelled)
    }

    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// 终态状态名（SQL 过滤用）
    pub fn terminal_states() -> [&'static str; 3] {
        [
            Self::Completed.as_str(),
            Self::Closed.as_str(),
            Self::Cancelled.as_str(),
        ]
    }
}

impl From<&str> for WorkOrderStatus {
    /// 未知状态按草稿处理（非终态）
    fn from(value: &str) -> Self {
        match value {
            "planned" => Self::Planned,
            "released" => Self::Released,
            "in_progress" => Self::InProgress,
            "on_hold" => Self::OnHold,
            "completed" => Self::Completed,
            "closed" => Self::Closed,
            "cancelled" => Self::Cancelled,
            _ => Self::Draft,
        }
    }
}

/// 工单
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrder {
    pub id: WorkOrderId,
    pub tenant_id: TenantId,
    pub wo_number: String,
    pub status: WorkOrderStatus,
}

/// 工单物料行（BOM 快照）
#[derive(Debug, Clone, PartialEq)]
pub struct WorkOrderMaterialLine {
    pub id: WoMaterialId,
    pub wo_id: WorkOrderId,
    pub product_id: ProductId,
    pub product_code: String,
    pub product_name: String,
    pub required_qty: f64,
    pub uom: String,
    pub sequence: i32,
}
