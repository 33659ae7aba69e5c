//! 应用层
//!
//! 编排一次可用性检查：设置开关 → 快照缓存 → 逐行计算 → 汇总

pub mod dto;
pub mod handler;
pub mod settings_gate;
pub mod snapshot_cache;

pub use dto::{AvailabilityResponse, AvailabilitySummary, MaterialAvailability};
pub use handler::{AvailabilityHandler, CheckAvailabilityQuery};
pub use settings_gate::{GateDecision, SettingsGate};
pub use snapshot_cache::SnapshotCache;
