//! ID 值对象

use derive_more::{Display, From};
use monopilot_common::parse_canonical_uuid;
use monopilot_errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 工单 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
pub struct WorkOrderId(pub Uuid);

impl WorkOrderId {
    /// 解析路径参数，非规范 UUID 返回 INVALID_ID
    pub fn parse(raw: &str) -> AppResult<Self> {
        parse_canonical_uuid(raw)
            .map(Self)
            .ok_or_else(|| AppError::invalid_id("Work order id must be a canonical UUID"))
    }
}

/// 产品 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
pub struct ProductId(pub Uuid);

/// 工单物料行 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
pub struct WoMaterialId(pub Uuid);
