pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod profiles;
pub mod queries;
pub mod store;

pub use pool::DbPool;
pub use store::{AuditLog, IndicatorStore, ProfileStore};
