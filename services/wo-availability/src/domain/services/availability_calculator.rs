//! 单条物料行的可用量计算

use chrono::NaiveDate;

use super::AvailabilityStatus;
use crate::domain::entities::InventoryLot;

/// 单条物料行的计算结果
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityResult {
    pub required_qty: f64,
    /// 扣除他人预留后的可用量，不小于 0
    pub available_qty: f64,
    /// 其他未终结工单的预留量
    pub reserved_qty: f64,
    /// 因过期被排除的数量
    pub expired_excluded_qty: f64,
    /// required - available，负数表示富余
    pub shortage_qty: f64,
    pub coverage_percent: f64,
    pub status: AvailabilityStatus,
}

/// 四舍五入到两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 计算单条物料行的可用性
///
/// 过期日严格早于 `today` 的批次不计入供应，数量累加到 `expired_excluded_qty`。
/// 需求量不大于 0 时覆盖率固定为 100。
pub fn calculate(
    required_qty: f64,
    lots: &[InventoryLot],
    reserved_by_others: f64,
    today: NaiveDate,
) -> AvailabilityResult {
    let (expired, usable): (Vec<&InventoryLot>, Vec<&InventoryLot>) =
        lots.iter().partition(|lot| lot.is_expired(today));

    let usable_qty: f64 = usable.iter().map(|lot| lot.quantity).sum();
    let expired_excluded_qty: f64 = expired.iter().map(|lot| lot.quantity).sum();

    let available_qty = (usable_qty - reserved_by_others).max(0.0);
    let shortage_qty = required_qty - available_qty;

    let coverage_percent = if required_qty > 0.0 {
        round2(available_qty / required_qty * 100.0)
    } else {
        100.0
    };

    AvailabilityResult {
        required_qty,
        available_qty,
        reserved_qty: reserved_by_others,
        expired_excluded_qty,
        shortage_qty,
        coverage_percent,
        status: AvailabilityStatus::from_coverage(coverage_percent),
    }
}
