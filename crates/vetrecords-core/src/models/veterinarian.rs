//! Veterinarian models.

use serde::{Deserialize, Serialize};

use super::lifecycle::soft_delete_flag;
use super::VeterinarianId;

/// A licensed veterinarian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Veterinarian {
    /// Row identity
    pub id: VeterinarianId,
    /// Full name
    pub name: String,
    /// Professional license number, unique among active veterinarians
    pub license_number: String,
    /// Soft-delete flag
    pub active: bool,
}

soft_delete_flag!(Veterinarian, active);

/// Fields accepted when creating a veterinarian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVeterinarian {
    pub name: String,
    pub license_number: String,
}

impl NewVeterinarian {
    pub fn new(name: impl Into<String>, license_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            license_number: license_number.into(),
        }
    }
}

/// Partial update for a veterinarian. Only the name is routinely editable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VeterinarianPatch {
    pub name: Option<String>,
}
