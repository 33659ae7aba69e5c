//! 库存批次（License Plate）

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::ProductId;

/// 批次生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    Available,
    /// 已被某个工单预留，预留量经由预留台账单独扣减
    Reserved,
    Consumed,
    Blocked,
    Shipped,
}

impl LotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Consumed => "consumed",
            Self::Blocked => "blocked",
            Self::Shipped => "shipped",
        }
    }

    /// 是否计入在手供应
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Available | Self::Reserved)
    }

    /// 可用状态名（SQL 过滤用）
    pub fn usable_states() -> [&'static str; 2] {
        [Self::Available.as_str(), Self::Reserved.as_str()]
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "available" => Some(Self::Available),
            "reserved" => Some(Self::Reserved),
            "consumed" => Some(Self::Consumed),
            "blocked" => Some(Self::Blocked),
            "shipped" => Some(Self::Shipped),
            _ => None,
        }
    }
}

/// 库存批次
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLot {
    pub product_id: ProductId,
    pub quantity: f64,
    pub uom: String,
    pub expiry_date: Option<NaiveDate>,
    pub status: LotStatus,
}

impl InventoryLot {
    /// 过期日严格早于 today 才算过期，当天到期仍可用
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        matches!(self.expiry_date, Some(expiry) if expiry < today)
    }
}
