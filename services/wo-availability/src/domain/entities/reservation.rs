//! 预留台账条目

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProductId, WorkOrderId};

/// 预留状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Active,
    Released,
    Consumed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Released => "released",
            Self::Consumed => "consumed",
        }
    }
}

/// 某工单对某产品批次的一条预留
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationClaim {
    pub wo_id: WorkOrderId,
    pub product_id: ProductId,
    pub reserved_qty: f64,
    pub consumed_qty: f64,
}

impl ReservationClaim {
    /// 仍占用的数量，部分消耗后只占剩余部分
    pub fn remaining_qty(&self) -> f64 {
        (self.reserved_qty - self.consumed_qty).max(0.0)
    }

    pub fn total_remaining<'a>(claims: impl IntoIterator<Item = &'a ReservationClaim>) -> f64 {
        claims.into_iter().map(Self::remaining_qty).sum()
    }
}
