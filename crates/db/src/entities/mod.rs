//! `SeaORM` entities, one per record kind.

pub mod period_amounts;
pub mod sector_shares;
pub mod targets;
