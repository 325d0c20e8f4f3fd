//! Data models for the storage layer

use crate::cli::types::amounts::{check_decimal, check_energy};
use crate::cli::types::{round2, AnalysisId};
use crate::error::{AnalysisError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Efficiency ratio `production / consumption * 100`, rounded to two decimals.
///
/// Fails with `InvalidInput` when `consumption` is zero (or rounds to zero),
/// or when either input is not finite.
pub fn efficiency_ratio(production: f64, consumption: f64) -> Result<f64> {
    if !production.is_finite() || !consumption.is_finite() {
        return Err(AnalysisError::invalid_input(format!(
            "cannot derive efficiency from {production} / {consumption}"
        )));
    }
    if round2(consumption) == 0.0 {
        return Err(AnalysisError::invalid_input(
            "consumption energy is zero, efficiency is undefined",
        ));
    }
    Ok(round2(production / consumption * 100.0))
}

/// One persisted row of the analysis table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub analysis_date: NaiveDate,
    pub production_energy: f64,
    pub consumption_energy: f64,
    pub efficiency: f64,
}

/// An analysis sample that has not been written yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnalysis {
    pub analysis_date: NaiveDate,
    pub production_energy: f64,
    pub consumption_energy: f64,
    pub efficiency: f64,
}

impl NewAnalysis {
    /// Build a sample with an explicitly supplied efficiency.
    ///
    /// The efficiency is stored as given, even when it disagrees with the
    /// two energies.
    pub fn new(
        analysis_date: NaiveDate,
        production_energy: f64,
        consumption_energy: f64,
        efficiency: f64,
    ) -> Self {
        Self {
            analysis_date,
            production_energy: round2(production_energy),
            consumption_energy: round2(consumption_energy),
            efficiency: round2(efficiency),
        }
    }

    /// Build a sample whose efficiency is derived from the two energies.
    pub fn derived(
        analysis_date: NaiveDate,
        production_energy: f64,
        consumption_energy: f64,
    ) -> Result<Self> {
        let production_energy = round2(production_energy);
        let consumption_energy = round2(consumption_energy);
        let efficiency = efficiency_ratio(production_energy, consumption_energy)?;
        Ok(Self {
            analysis_date,
            production_energy,
            consumption_energy,
            efficiency,
        })
    }

    /// Copy with every measurement rounded to two decimals.
    pub fn normalized(&self) -> Self {
        Self::new(
            self.analysis_date,
            self.production_energy,
            self.consumption_energy,
            self.efficiency,
        )
    }

    /// Check the numeric fields fit the table's column constraints.
    pub fn validate(&self) -> Result<()> {
        validate_measurements(
            self.production_energy,
            self.consumption_energy,
            self.efficiency,
        )
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: AnalysisId) -> AnalysisRecord {
        AnalysisRecord {
            id,
            analysis_date: self.analysis_date,
            production_energy: self.production_energy,
            consumption_energy: self.consumption_energy,
            efficiency: self.efficiency,
        }
    }
}

/// Shared validation for inserts and full-field updates.
pub(crate) fn validate_measurements(
    production_energy: f64,
    consumption_energy: f64,
    efficiency: f64,
) -> Result<()> {
    check_energy("production energy", production_energy)?;
    check_energy("consumption energy", consumption_energy)?;
    check_decimal("efficiency", efficiency)
}
