//! HTTP 接口层

pub mod availability;
pub mod error;
pub mod health;
pub mod middleware;
pub mod routing;
pub mod state;

pub use error::ApiError;
pub use routing::router;
pub use state::AppState;
