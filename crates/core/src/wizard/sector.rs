//! Sector share entry over three steps.

use rust_decimal::Decimal;

use super::machine::{SubmitOp, WizardForm};
use crate::records::{SectorShareRecord, SubShares};
use crate::shares::{
    Bound, SUM_TOLERANCE, Sector, ValidationError, ValidationErrors, validate_bounds,
    validate_partial_sum, validate_percentage, validate_share_record, validate_sub_shares,
    validate_sum_to_100,
};

/// Three-step sector share form.
///
/// 1. GDP total, which must be positive.
/// 2. Services and agriculture shares with their breakdowns. The two shares
///    must leave room for the rest (`services + agriculture <= 100`).
/// 3. Taxes and industry shares with the industry breakdown. All four shares
///    must then sum to 100 within `SUM_TOLERANCE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectorShareForm {
    /// GDP total.
    pub total_gdp: Option<Decimal>,
    /// Services share.
    pub services_share: Option<Decimal>,
    /// Agriculture share.
    pub agriculture_share: Option<Decimal>,
    /// Taxes share.
    pub taxes_share: Option<Decimal>,
    /// Industry share.
    pub industry_share: Option<Decimal>,
    /// Services breakdown.
    pub services_sub_shares: SubShares,
    /// Agriculture breakdown.
    pub agriculture_sub_shares: SubShares,
    /// Industry breakdown.
    pub industry_sub_shares: SubShares,
}

fn required_percentage(errors: &mut ValidationErrors, field: &str, value: Option<Decimal>) {
    match value {
        Some(value) => errors.check(validate_percentage(field, value)),
        None => errors.push(ValidationError::missing(field)),
    }
}

impl SectorShareForm {
    /// The record this form describes, if every share is filled in.
    #[must_use]
    pub fn to_record(&self) -> Option<SectorShareRecord> {
        Some(SectorShareRecord {
            total_gdp: self.total_gdp?,
            services_share: self.services_share?,
            industry_share: self.industry_share?,
            agriculture_share: self.agriculture_share?,
            taxes_share: self.taxes_share?,
            services_sub_shares: self.services_sub_shares.clone(),
            agriculture_sub_shares: self.agriculture_sub_shares.clone(),
            industry_sub_shares: self.industry_sub_shares.clone(),
            private_sector: None,
            government_sector: None,
            imports: None,
            exports: None,
        })
    }

    fn validate_total(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match self.total_gdp {
            Some(total) => errors.check(validate_bounds("totalGdp", total, Bound::Positive)),
            None => errors.push(ValidationError::missing("totalGdp")),
        }
        errors
    }

    fn validate_services_agriculture(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        required_percentage(&mut errors, "servicesShare", self.services_share);
        required_percentage(&mut errors, "agricultureShare", self.agriculture_share);

        if let (Some(services), Some(agriculture)) = (self.services_share, self.agriculture_share) {
            errors.check(validate_partial_sum(
                "servicesShare + agricultureShare",
                &[services, agriculture],
                SUM_TOLERANCE,
            ));
        }

        errors.extend(validate_sub_shares(Sector::Services, &self.services_sub_shares));
        errors.extend(validate_sub_shares(
            Sector::Agriculture,
            &self.agriculture_sub_shares,
        ));
        errors
    }

    fn validate_taxes_industry(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        required_percentage(&mut errors, "taxesShare", self.taxes_share);
        required_percentage(&mut errors, "industryShare", self.industry_share);
        errors.extend(validate_sub_shares(Sector::Industry, &self.industry_sub_shares));

        if let (Some(services), Some(industry), Some(agriculture), Some(taxes)) = (
            self.services_share,
            self.industry_share,
            self.agriculture_share,
            self.taxes_share,
        ) {
            errors.check(validate_sum_to_100(
                &[services, industry, agriculture, taxes],
                SUM_TOLERANCE,
            ));
        }
        errors
    }
}

impl WizardForm for SectorShareForm {
    const STEPS: u8 = 3;

    fn validate_step(&self, step: u8) -> ValidationErrors {
        match step {
            1 => self.validate_total(),
            2 => self.validate_services_agriculture(),
            3 => self.validate_taxes_industry(),
            _ => ValidationErrors::new(),
        }
    }

    fn validate_all(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for step in 1..=Self::STEPS {
            errors.extend(self.validate_step(step));
        }
        if let Some(record) = self.to_record()
            && let Err(record_errors) = validate_share_record(&record)
        {
            errors.extend(record_errors);
        }
        errors
    }

    fn submission(&self) -> Result<Vec<SubmitOp>, ValidationErrors> {
        let record = self.to_record().ok_or_else(|| self.validate_all())?;
        Ok(vec![SubmitOp::Create(record.into())])
    }
}
