//! Domain error taxonomy.

use thiserror::Error;

use crate::models::{ClinicalFileId, OwnerId, PetId, TreatmentId, VeterinarianId, VisitId};

/// Failures raised by orchestration code when a referenced record is missing,
/// in the wrong state, or attached to the wrong parent.
///
/// The access layer never returns these; it reports missing records as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Owners
    #[error("owner {0} not found")]
    OwnerNotFound(OwnerId),

    #[error("owner {0} has no active pets")]
    OwnerHasNoPets(OwnerId),

    // Pets
    #[error("pet {0} not found")]
    PetNotFound(PetId),

    #[error("pet {0} is inactive")]
    PetInactive(PetId),

    #[error("pet {pet} does not belong to owner {owner}")]
    PetNotOwnedBy { pet: PetId, owner: OwnerId },

    // Veterinarians
    #[error("veterinarian {0} not found")]
    VeterinarianNotFound(VeterinarianId),

    #[error("veterinarian {0} is inactive")]
    VeterinarianInactive(VeterinarianId),

    // Visits
    #[error("visit {0} not found")]
    VisitNotFound(VisitId),

    #[error("visit {visit} does not belong to pet {pet}")]
    VisitNotForPet { visit: VisitId, pet: PetId },

    #[error("visit {0} is closed")]
    VisitClosed(VisitId),

    #[error("visit {0} has no active treatments")]
    VisitHasNoTreatments(VisitId),

    // Treatments
    #[error("treatment {0} not found")]
    TreatmentNotFound(TreatmentId),

    #[error("invalid treatment: {0}")]
    TreatmentInvalid(String),

    // Clinical files
    #[error("clinical file {0} not found")]
    ClinicalFileNotFound(ClinicalFileId),

    #[error("clinical file {file} does not belong to visit {visit}")]
    FileNotForVisit { file: ClinicalFileId, visit: VisitId },

    #[error("clinical file {0} no longer exists in storage")]
    ClinicalFileMissing(ClinicalFileId),

    // General
    #[error("operation not permitted: {0}")]
    OperationNotPermitted(String),

    #[error("invalid state: {0}")]
    InvalidState(String),
}

/// Fieldless discriminant of [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainErrorKind {
    NotFound,
    Inactive,
    Mismatch,
    Invalid,
    NotPermitted,
}

/// Entity group an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Owner,
    Pet,
    Veterinarian,
    Visit,
    Treatment,
    ClinicalFile,
    General,
}

impl DomainError {
    /// Coarse category, for mapping to a response at the boundary.
    pub fn kind(&self) -> DomainErrorKind {
        use DomainError::*;
        match self {
            OwnerNotFound(_) | PetNotFound(_) | VeterinarianNotFound(_) | VisitNotFound(_)
            | TreatmentNotFound(_) | ClinicalFileNotFound(_) => DomainErrorKind::NotFound,
            PetInactive(_) | VeterinarianInactive(_) | VisitClosed(_) => DomainErrorKind::Inactive,
            PetNotOwnedBy { .. } | VisitNotForPet { .. } | FileNotForVisit { .. } => {
                DomainErrorKind::Mismatch
            }
            OwnerHasNoPets(_)
            | VisitHasNoTreatments(_)
            | TreatmentInvalid(_)
            | ClinicalFileMissing(_)
            | InvalidState(_) => DomainErrorKind::Invalid,
            OperationNotPermitted(_) => DomainErrorKind::NotPermitted,
        }
    }

    /// Which entity the error is about.
    pub fn entity(&self) -> Entity {
        use DomainError::*;
        match self {
            OwnerNotFound(_) | OwnerHasNoPets(_) => Entity::Owner,
            PetNotFound(_) | PetInactive(_) | PetNotOwnedBy { .. } => Entity::Pet,
            VeterinarianNotFound(_) | VeterinarianInactive(_) => Entity::Veterinarian,
            VisitNotFound(_) | VisitNotForPet { .. } | VisitClosed(_) | VisitHasNoTreatments(_) => {
                Entity::Visit
            }
            TreatmentNotFound(_) | TreatmentInvalid(_) => Entity::Treatment,
            ClinicalFileNotFound(_) | FileNotForVisit { .. } | ClinicalFileMissing(_) => {
                Entity::ClinicalFile
            }
            OperationNotPermitted(_) | InvalidState(_) => Entity::General,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
