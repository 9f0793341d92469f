//! `SeaORM` Entity for sector_shares table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sector_shares")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub total_gdp: Decimal,
    pub services_share: Decimal,
    pub industry_share: Decimal,
    pub agriculture_share: Decimal,
    pub taxes_share: Decimal,
    #[sea_orm(column_type = "JsonBinary")]
    pub services_sub_shares: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub agriculture_sub_shares: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub industry_sub_shares: Json,
    pub private_sector: Option<Decimal>,
    pub government_sector: Option<Decimal>,
    pub imports: Option<Decimal>,
    pub exports: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
