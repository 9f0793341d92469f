//! Sector share records.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::shares::Sector;

/// Sub-sector name to percentage.
///
/// Ordered so that serialization and error reporting are deterministic.
pub type SubShares = BTreeMap<String, Decimal>;

/// One snapshot of the economy's sector decomposition.
///
/// The four top-level shares must sum to 100 (within tolerance). Sub-shares
/// are display detail and are not reconciled against their parent share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorShareRecord {
    /// Total GDP the shares apply to.
    pub total_gdp: Decimal,
    /// Services share of GDP, in percent.
    pub services_share: Decimal,
    /// Industry share of GDP, in percent.
    pub industry_share: Decimal,
    /// Agriculture share of GDP, in percent.
    pub agriculture_share: Decimal,
    /// Taxes on products share of GDP, in percent.
    pub taxes_share: Decimal,
    /// Services breakdown.
    #[serde(default)]
    pub services_sub_shares: SubShares,
    /// Agriculture breakdown.
    #[serde(default)]
    pub agriculture_sub_shares: SubShares,
    /// Industry breakdown.
    #[serde(default)]
    pub industry_sub_shares: SubShares,
    /// Private sector share, independent of the other auxiliaries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_sector: Option<Decimal>,
    /// Government sector share.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub government_sector: Option<Decimal>,
    /// Imports as a share of GDP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imports: Option<Decimal>,
    /// Exports as a share of GDP.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exports: Option<Decimal>,
}

/// Sector amounts derived from the shares and the GDP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAmounts {
    /// Services amount.
    pub services: Decimal,
    /// Industry amount.
    pub industry: Decimal,
    /// Agriculture amount.
    pub agriculture: Decimal,
    /// Taxes amount.
    pub taxes: Decimal,
}

impl SectorShareRecord {
    /// The four top-level shares in `[services, industry, agriculture, taxes]`
    /// order.
    #[must_use]
    pub const fn shares(&self) -> [Decimal; 4] {
        [
            self.services_share,
            self.industry_share,
            self.agriculture_share,
            self.taxes_share,
        ]
    }

    /// Returns the share for `sector`.
    #[must_use]
    pub const fn share(&self, sector: Sector) -> Decimal {
        match sector {
            Sector::Services => self.services_share,
            Sector::Industry => self.industry_share,
            Sector::Agriculture => self.agriculture_share,
        }
    }

    /// Returns the sub-share map for `sector`.
    #[must_use]
    pub const fn sub_shares(&self, sector: Sector) -> &SubShares {
        match sector {
            Sector::Services => &self.services_sub_shares,
            Sector::Industry => &self.industry_sub_shares,
            Sector::Agriculture => &self.agriculture_sub_shares,
        }
    }

    /// Computes `totalGdp * share / 100` per sector, rounded to 2 dp with
    /// banker's rounding.
    ///
    /// Returns `None` if any product does not fit in a `Decimal`.
    #[must_use]
    pub fn sector_amounts(&self) -> Option<SectorAmounts> {
        let amount = |share: Decimal| {
            self.total_gdp
                .checked_mul(share)?
                .checked_div(Decimal::ONE_HUNDRED)
                .map(|value| value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        };

        Some(SectorAmounts {
            services: amount(self.services_share)?,
            industry: amount(self.industry_share)?,
            agriculture: amount(self.agriculture_share)?,
            taxes: amount(self.taxes_share)?,
        })
    }
}
