//! Record types for the three stored kinds.
//!
//! - `SectorShareRecord` - one snapshot of the economy's sector decomposition
//! - `PeriodAmountRecord` - a (year, quarter, amount) observation with an
//!   active flag
//! - `TargetRecord` - a poverty/SDG-style target with trend and map series
//!
//! Records cross the gateway as `RecordData`; partial edits as `RecordPatch`.

pub mod patch;
pub mod period;
pub mod record;
pub mod sector;
pub mod target;
pub mod types;

pub use patch::{KindMismatch, PeriodAmountPatch, RecordPatch, SectorSharePatch, TargetPatch};
pub use period::PeriodAmountRecord;
pub use record::{Record, RecordData};
pub use sector::{SectorAmounts, SectorShareRecord, SubShares};
pub use target::{MapPoint, TargetRecord, TrendPoint};
pub use types::{Quarter, RecordKind};
