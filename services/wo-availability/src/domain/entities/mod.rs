//! 实体模块

mod inventory_lot;
mod reservation;
mod work_order;

pub use inventory_lot::{InventoryLot, LotStatus};
pub use reservation::{ReservationClaim, ReservationStatus};
pub use work_order::{WorkOrder, WorkOrderMaterialLine, WorkOrderStatus};
