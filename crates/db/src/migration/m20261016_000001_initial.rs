//! Initial database migration.
//!
//! Creates the three record tables. Decimal columns are unconstrained
//! `NUMERIC` so stored values keep the scale they were entered with.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(SECTOR_SHARES_SQL).await?;
        db.execute_unprepared(PERIOD_AMOUNTS_SQL).await?;
        db.execute_unprepared(TARGETS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const SECTOR_SHARES_SQL: &str = r"
CREATE TABLE sector_shares (
    id UUID PRIMARY KEY,
    total_gdp NUMERIC NOT NULL,
    services_share NUMERIC NOT NULL,
    industry_share NUMERIC NOT NULL,
    agriculture_share NUMERIC NOT NULL,
    taxes_share NUMERIC NOT NULL,
    services_sub_shares JSONB NOT NULL DEFAULT '{}'::jsonb,
    agriculture_sub_shares JSONB NOT NULL DEFAULT '{}'::jsonb,
    industry_sub_shares JSONB NOT NULL DEFAULT '{}'::jsonb,
    private_sector NUMERIC,
    government_sector NUMERIC,
    imports NUMERIC,
    exports NUMERIC,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_total_gdp_non_negative CHECK (total_gdp >= 0),
    CONSTRAINT chk_shares_percent CHECK (
        services_share BETWEEN 0 AND 100
        AND industry_share BETWEEN 0 AND 100
        AND agriculture_share BETWEEN 0 AND 100
        AND taxes_share BETWEEN 0 AND 100
    ),
    -- Auxiliaries are independent measurements; each is checked on its own
    CONSTRAINT chk_auxiliaries_percent CHECK (
        (private_sector IS NULL OR private_sector BETWEEN 0 AND 100)
        AND (government_sector IS NULL OR government_sector BETWEEN 0 AND 100)
        AND (imports IS NULL OR imports BETWEEN 0 AND 100)
        AND (exports IS NULL OR exports BETWEEN 0 AND 100)
    ),
    CONSTRAINT chk_sub_shares_objects CHECK (
        jsonb_typeof(services_sub_shares) = 'object'
        AND jsonb_typeof(agriculture_sub_shares) = 'object'
        AND jsonb_typeof(industry_sub_shares) = 'object'
    )
);

CREATE INDEX idx_sector_shares_created ON sector_shares(created_at, id);
";

const PERIOD_AMOUNTS_SQL: &str = r"
CREATE TABLE period_amounts (
    id UUID PRIMARY KEY,
    year INTEGER NOT NULL,
    quarter VARCHAR(2) NOT NULL,
    amount_billion NUMERIC NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT false,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_year_range CHECK (year BETWEEN 1900 AND 2100),
    CONSTRAINT chk_quarter CHECK (quarter IN ('Q1', 'Q2', 'Q3', 'Q4')),
    CONSTRAINT chk_amount_positive CHECK (amount_billion > 0)
);

-- At most one active row, enforced by the storage engine itself
CREATE UNIQUE INDEX uq_period_amounts_single_active
    ON period_amounts(is_active) WHERE is_active;

CREATE INDEX idx_period_amounts_created ON period_amounts(created_at, id);
";

const TARGETS_SQL: &str = r"
CREATE TABLE targets (
    id UUID PRIMARY KEY,
    target_name TEXT NOT NULL,
    target_description TEXT,
    target_percentage NUMERIC,
    source TEXT,
    trend JSONB NOT NULL DEFAULT '[]'::jsonb,
    map JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_target_name_not_blank CHECK (length(trim(target_name)) > 0),
    CONSTRAINT chk_target_percentage CHECK (
        target_percentage IS NULL OR target_percentage BETWEEN 0 AND 100
    ),
    CONSTRAINT chk_series_arrays CHECK (
        jsonb_typeof(trend) = 'array' AND jsonb_typeof(map) = 'array'
    )
);

CREATE INDEX idx_targets_created ON targets(created_at, id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS targets CASCADE;
DROP TABLE IF EXISTS period_amounts CASCADE;
DROP TABLE IF EXISTS sector_shares CASCADE;
";
