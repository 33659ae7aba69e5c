//! monopilot-adapter-postgres - PostgreSQL 适配器

mod pool;

pub use pool::*;
