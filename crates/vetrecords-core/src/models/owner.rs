//! Owner models.

use serde::{Deserialize, Serialize};

use super::lifecycle::soft_delete_flag;
use super::OwnerId;

/// A pet owner (clinic client).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    /// Row identity
    pub id: OwnerId,
    /// External identifier (national ID), unique among active owners
    pub national_id: String,
    /// Full name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Soft-delete flag
    pub active: bool,
}

soft_delete_flag!(Owner, active);

/// Fields accepted when creating an owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewOwner {
    pub national_id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl NewOwner {
    /// Create with required fields only.
    pub fn new(national_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            national_id: national_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Partial update for an owner. `None` leaves the column unchanged.
///
/// The national ID is deliberately absent; see
/// [`UnitOfWork::correct_owner_national_id`](crate::db::UnitOfWork::correct_owner_national_id).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OwnerPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}
