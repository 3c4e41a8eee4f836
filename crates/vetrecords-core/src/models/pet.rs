//! Pet models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lifecycle::soft_delete_flag;
use super::{OwnerId, PetId};

/// A patient animal belonging to one owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pet {
    /// Row identity
    pub id: PetId,
    /// Owning client; changed only through reassignment
    pub owner_id: OwnerId,
    /// Pet name
    pub name: String,
    /// Species (e.g., "canine", "feline")
    pub species: String,
    /// Breed
    pub breed: Option<String>,
    /// Sex
    pub sex: Option<String>,
    /// Date of birth
    pub birth_date: Option<NaiveDate>,
    /// Soft-delete flag
    pub active: bool,
}

soft_delete_flag!(Pet, active);

/// Fields accepted when creating a pet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPet {
    pub owner_id: OwnerId,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
}

impl NewPet {
    /// Create with required fields only.
    pub fn new(owner_id: OwnerId, name: impl Into<String>, species: impl Into<String>) -> Self {
        Self {
            owner_id,
            name: name.into(),
            species: species.into(),
            breed: None,
            sex: None,
            birth_date: None,
        }
    }
}

/// Partial update for a pet. The owner reference is not patchable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PetPatch {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<NaiveDate>,
}
