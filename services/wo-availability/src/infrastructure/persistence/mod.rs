//! PostgreSQL 只读仓储

mod converters;
mod postgres;
mod rows;

pub use postgres::{
    PostgresInventoryLotRepository, PostgresMaterialCheckSettingRepository,
    PostgresReservationRepository, PostgresWorkOrderRepository,
};
