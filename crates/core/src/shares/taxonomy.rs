//! The fixed sector taxonomy.
//!
//! Sub-share keys are restricted to these names. The lists are part of the
//! published national accounts breakdown and are not user-configurable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Services sub-sectors.
pub const SERVICES_SUBSECTORS: &[&str] = &[
    "Trade",
    "Transportation",
    "Hotels and Restaurants",
    "Financial Services",
    "Government",
    "Health",
    "Education",
    "ICT",
    "Real Estate",
];

/// Industry sub-sectors.
pub const INDUSTRY_SUBSECTORS: &[&str] = &[
    "Mining and Quarrying",
    "Manufacturing",
    "Electricity",
    "Water and Waste Management",
    "Construction",
];

/// Agriculture sub-sectors.
pub const AGRICULTURE_SUBSECTORS: &[&str] = &[
    "Food Crops",
    "Export Crops",
    "Livestock",
    "Forestry",
    "Fishing",
];

/// Whether a sector's sub-share map may be left empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubDetail {
    /// At least one sub-share must be provided.
    Required,
    /// An empty map is accepted.
    Optional,
}

/// An economic sector with a sub-sector breakdown.
///
/// Taxes on products have a share but no breakdown, so they are not a
/// `Sector` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sector {
    /// Services (the primary sector).
    Services,
    /// Industry.
    Industry,
    /// Agriculture.
    Agriculture,
}

impl Sector {
    /// All sectors with a breakdown.
    pub const ALL: [Self; 3] = [Self::Services, Self::Industry, Self::Agriculture];

    /// Returns the sector's fixed sub-sector whitelist.
    #[must_use]
    pub const fn subsectors(self) -> &'static [&'static str] {
        match self {
            Self::Services => SERVICES_SUBSECTORS,
            Self::Industry => INDUSTRY_SUBSECTORS,
            Self::Agriculture => AGRICULTURE_SUBSECTORS,
        }
    }

    /// Returns true if `name` belongs to this sector's taxonomy.
    #[must_use]
    pub fn contains(self, name: &str) -> bool {
        self.subsectors().contains(&name)
    }

    /// Sub-detail policy. Only the primary sector's breakdown is mandatory.
    #[must_use]
    pub const fn sub_detail(self) -> SubDetail {
        match self {
            Self::Services => SubDetail::Required,
            Self::Industry | Self::Agriculture => SubDetail::Optional,
        }
    }

    /// Wire name of the sector's share field.
    #[must_use]
    pub const fn share_field(self) -> &'static str {
        match self {
            Self::Services => "servicesShare",
            Self::Industry => "industryShare",
            Self::Agriculture => "agricultureShare",
        }
    }

    /// Wire name of the sector's sub-share map.
    #[must_use]
    pub const fn sub_shares_field(self) -> &'static str {
        match self {
            Self::Services => "servicesSubShares",
            Self::Industry => "industrySubShares",
            Self::Agriculture => "agricultureSubShares",
        }
    }

    /// Returns the string representation of the sector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Services => "services",
            Self::Industry => "industry",
            Self::Agriculture => "agriculture",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
