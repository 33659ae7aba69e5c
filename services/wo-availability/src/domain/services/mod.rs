//! 领域服务：纯计算，不做 IO

mod availability_calculator;
mod availability_status;

pub use availability_calculator::{AvailabilityResult, calculate, round2};
pub use availability_status::AvailabilityStatus;
