//! Repository abstractions for data access.
//!
//! - `active` - Transactional single-active writer
//! - `gateway` - `RecordGateway` over the three record tables
//! - `mapping` - Row and record conversions, database error mapping

pub mod active;
pub mod gateway;
pub mod mapping;

pub use active::{ActiveRecordManager, ActiveTarget};
pub use gateway::SeaOrmRecordGateway;
pub use mapping::storage_error;
