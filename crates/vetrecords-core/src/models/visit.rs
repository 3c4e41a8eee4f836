//! Visit models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::soft_delete_flag;
use super::{PetId, VeterinarianId, VisitId};

/// A clinical visit: one pet seen by one veterinarian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Visit {
    /// Row identity
    pub id: VisitId,
    /// Patient; changed only through reassignment
    pub pet_id: PetId,
    /// Attending veterinarian; changed only through reassignment
    pub veterinarian_id: VeterinarianId,
    /// When the visit took place
    pub visited_at: DateTime<Utc>,
    /// Reason for consultation
    pub reason: String,
    /// Diagnosis
    pub diagnosis: Option<String>,
    /// Free-form clinical notes
    pub notes: Option<String>,
    /// Soft-delete flag
    pub active: bool,
}

soft_delete_flag!(Visit, active);

/// Fields accepted when creating a visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVisit {
    pub pet_id: PetId,
    pub veterinarian_id: VeterinarianId,
    pub reason: String,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to the creation time
    #[serde(default)]
    pub visited_at: Option<DateTime<Utc>>,
}

impl NewVisit {
    pub fn new(pet_id: PetId, veterinarian_id: VeterinarianId, reason: impl Into<String>) -> Self {
        Self {
            pet_id,
            veterinarian_id,
            reason: reason.into(),
            diagnosis: None,
            notes: None,
            visited_at: None,
        }
    }

    /// Set an explicit visit time instead of the creation time.
    pub fn at(mut self, visited_at: DateTime<Utc>) -> Self {
        self.visited_at = Some(visited_at);
        self
    }
}

/// Partial update for the clinical content of a visit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VisitPatch {
    pub reason: Option<String>,
    pub diagnosis: Option<String>,
    pub notes: Option<String>,
}
