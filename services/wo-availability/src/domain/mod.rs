//! 领域层
//!
//! 实体、值对象、仓储接口和纯计算逻辑（计算器、分级器）

pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use services::*;
pub use value_objects::*;
