//! Database seeder for Indicata development and testing.
//!
//! Drives the data-entry wizards headlessly, so seeded data passes through
//! the same step gating and store-side validation as user input:
//! - GDP amounts for the previous and current period (current is active)
//! - A sector share breakdown with its private/government and trade split
//! - A poverty target with trend and map series
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use indicata_core::gateway::RecordGateway;
use indicata_core::records::{MapPoint, Quarter, RecordKind, SubShares, TargetRecord, TrendPoint};
use indicata_core::wizard::{
    GdpAmountForm, PeriodEntry, SectorShareForm, SectorSplitForm, StepWizard, WizardForm,
};
use indicata_db::SeaOrmRecordGateway;
use indicata_shared::AppConfig;
use rust_decimal_macros::dec;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = indicata_db::connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    let gateway = SeaOrmRecordGateway::new(db);
    let timeout = config.wizard.submit_timeout();

    seed_gdp_amounts(&gateway, timeout).await?;
    seed_sector_shares(&gateway, timeout).await?;
    seed_targets(&gateway).await?;

    info!("Seeding complete");
    Ok(())
}

/// Walks a filled wizard to its final step and submits it.
async fn complete<F: WizardForm>(
    mut wizard: StepWizard<F>,
    gateway: &dyn RecordGateway,
    timeout: Option<Duration>,
) -> anyhow::Result<Vec<indicata_core::records::Record>> {
    while !wizard.is_last_step() {
        wizard.next()?;
    }
    Ok(wizard.submit_with_timeout(gateway, timeout).await?)
}

async fn seed_gdp_amounts(
    gateway: &SeaOrmRecordGateway,
    timeout: Option<Duration>,
) -> anyhow::Result<()> {
    if gateway.find_active(RecordKind::PeriodAmount).await?.is_some() {
        info!("Active GDP amount already exists, skipping");
        return Ok(());
    }

    let mut wizard = StepWizard::<GdpAmountForm>::new();
    wizard.update(|form| {
        form.last_year = PeriodEntry::new(2023, Quarter::Q4, dec!(16356));
        form.current_year = PeriodEntry::new(2024, Quarter::Q4, dec!(18785));
    });

    let records = complete(wizard, gateway, timeout).await?;
    info!(count = records.len(), "Seeded GDP amounts");
    Ok(())
}

async fn seed_sector_shares(
    gateway: &SeaOrmRecordGateway,
    timeout: Option<Duration>,
) -> anyhow::Result<()> {
    if !gateway.find_all(RecordKind::SectorShare).await?.is_empty() {
        info!("Sector shares already exist, skipping");
        return Ok(());
    }

    let mut wizard = StepWizard::<SectorShareForm>::new();
    wizard.update(|form| {
        form.total_gdp = Some(dec!(18785));
        form.services_share = Some(dec!(46));
        form.agriculture_share = Some(dec!(24));
        form.industry_share = Some(dec!(23));
        form.taxes_share = Some(dec!(7));
        form.services_sub_shares = SubShares::from([
            ("Trade".to_string(), dec!(10.5)),
            ("Transportation".to_string(), dec!(4.2)),
            ("Financial Services".to_string(), dec!(3.8)),
            ("ICT".to_string(), dec!(2.1)),
            ("Real Estate".to_string(), dec!(7.4)),
        ]);
        form.agriculture_sub_shares = SubShares::from([
            ("Food Crops".to_string(), dec!(15.2)),
            ("Export Crops".to_string(), dec!(2.6)),
            ("Livestock".to_string(), dec!(2.9)),
        ]);
        form.industry_sub_shares = SubShares::from([
            ("Manufacturing".to_string(), dec!(8.9)),
            ("Construction".to_string(), dec!(9.7)),
        ]);
    });

    let records = complete(wizard, gateway, timeout).await?;
    let record = records
        .first()
        .context("Sector share wizard stored no record")?;
    info!(id = %record.id, "Seeded sector shares");

    let mut split = StepWizard::with_initial(SectorSplitForm::for_record(record.id));
    split.update(|form| {
        form.private_sector = Some(dec!(78.4));
        form.government_sector = Some(dec!(21.6));
        form.imports = Some(dec!(36.1));
        form.exports = Some(dec!(21.3));
    });
    complete(split, gateway, timeout).await?;
    info!(id = %record.id, "Seeded sector split");
    Ok(())
}

async fn seed_targets(gateway: &SeaOrmRecordGateway) -> anyhow::Result<()> {
    if !gateway.find_all(RecordKind::Target).await?.is_empty() {
        info!("Targets already exist, skipping");
        return Ok(());
    }

    let mut target = TargetRecord::new("Poverty headcount");
    target.target_description = Some("Share of the population below the poverty line".to_string());
    target.target_percentage = Some(dec!(20));
    target.source = Some("EICV".to_string());
    target.trend = vec![
        TrendPoint {
            year: 2011,
            percentage: dec!(46.0),
        },
        TrendPoint {
            year: 2017,
            percentage: dec!(38.2),
        },
        TrendPoint {
            year: 2024,
            percentage: dec!(27.4),
        },
    ];
    target.map = vec![
        MapPoint {
            year: 2024,
            location: "Kigali".to_string(),
            poverty_rate: dec!(12.3),
        },
        MapPoint {
            year: 2024,
            location: "Southern Province".to_string(),
            poverty_rate: dec!(33.1),
        },
    ];

    let record = gateway.create(target.into()).await?;
    info!(id = %record.id, "Seeded target");
    Ok(())
}
