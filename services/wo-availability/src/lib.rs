//! wo-availability - 工单物料可用性引擎
//!
//! 只读投影：按工单 BOM 快照逐行计算当前可用库存（扣除过期批次和其他在制工单的预留），
//! 给出严重程度信号，并用短 TTL 快照缓存支撑看板轮询。

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
