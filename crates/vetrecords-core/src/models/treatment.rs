//! Treatment models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lifecycle::soft_delete_flag;
use super::{TreatmentId, VisitId};

/// A treatment prescribed during a visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Treatment {
    /// Row identity
    pub id: TreatmentId,
    /// Prescribing visit
    pub visit_id: VisitId,
    /// Drug or procedure name
    pub name: String,
    /// Dosage (e.g., "5 mg/kg")
    pub dosage: String,
    /// Frequency (e.g., "every 12h")
    pub frequency: Option<String>,
    /// Duration (e.g., "7 days")
    pub duration: Option<String>,
    /// Additional notes
    pub notes: Option<String>,
    /// First day of treatment
    pub start_date: NaiveDate,
    /// Last day, set when the treatment is finished
    pub end_date: Option<NaiveDate>,
    /// Soft-delete flag
    pub active: bool,
}

soft_delete_flag!(Treatment, active);

impl Treatment {
    /// Whether an end date has been recorded.
    pub fn is_finished(&self) -> bool {
        self.end_date.is_some()
    }
}

/// Fields accepted when creating a treatment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTreatment {
    pub visit_id: VisitId,
    pub name: String,
    pub dosage: String,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to today (UTC)
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl NewTreatment {
    pub fn new(visit_id: VisitId, name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            visit_id,
            name: name.into(),
            dosage: dosage.into(),
            frequency: None,
            duration: None,
            notes: None,
            start_date: None,
            end_date: None,
        }
    }

    pub fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Partial update for a treatment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TreatmentPatch {
    pub name: Option<String>,
    pub dosage: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
