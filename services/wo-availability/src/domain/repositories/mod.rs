//! 仓储接口模块
//!
//! 引擎对所有后端存储只读

mod inventory_repository;
mod reservation_repository;
mod settings_repository;
mod work_order_repository;

pub use inventory_repository::InventoryLotRepository;
pub use reservation_repository::ReservationRepository;
pub use settings_repository::MaterialCheckSettingRepository;
pub use work_order_repository::WorkOrderRepository;
