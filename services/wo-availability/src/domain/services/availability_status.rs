//! 可用性分级

use serde::{Deserialize, Serialize};

/// 物料可用性等级，声明顺序即严重程度（升序）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Sufficient,
    LowStock,
    Shortage,
    NoStock,
}

impl AvailabilityStatus {
    /// 按覆盖率分级，半开区间，从上到下首个匹配生效
    pub fn from_coverage(coverage_percent: f64) -> Self {
        if coverage_percent <= 0.0 {
            Self::NoStock
        } else if coverage_percent < 50.0 {
            Self::Shortage
        } else if coverage_percent < 100.0 {
            Self::LowStock
        } else {
            Self::Sufficient
        }
    }

    /// 最严重的等级；空集合为 Sufficient
    pub fn worst<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        statuses.into_iter().max().unwrap_or(Self::Sufficient)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sufficient => "sufficient",
            Self::LowStock => "low_stock",
            Self::Shortage => "shortage",
            Self::NoStock => "no_stock",
        }
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
