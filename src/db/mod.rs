//! Database layer: pool and user lookups for PostgreSQL.

mod pool;
mod repositories;

pub use pool::{create_pool, DbPool};
pub use repositories::*;
