//! Relationship and state checks for orchestration code.
//!
//! These are pure functions over already-loaded records. They never touch
//! storage; callers load with the access layer, then check here.

use super::{DomainError, DomainResult};
use crate::models::{ClinicalFile, Owner, OwnerId, Pet, PetId, Treatment, Visit, VisitId};

/// Turn a lookup result into the matching not-found error.
///
/// ```
/// use vetrecords_core::domain::{require, DomainError};
/// use vetrecords_core::models::{OwnerId, Owner};
///
/// let missing: Option<Owner> = None;
/// let err = require(missing, DomainError::OwnerNotFound(OwnerId::new(5))).unwrap_err();
/// assert_eq!(err, DomainError::OwnerNotFound(OwnerId::new(5)));
/// ```
pub fn require<T>(found: Option<T>, missing: DomainError) -> DomainResult<T> {
    found.ok_or(missing)
}

pub fn ensure_pet_belongs_to_owner(pet: &Pet, owner_id: OwnerId) -> DomainResult<()> {
    if pet.owner_id == owner_id {
        Ok(())
    } else {
        Err(DomainError::PetNotOwnedBy {
            pet: pet.id,
            owner: owner_id,
        })
    }
}

pub fn ensure_visit_belongs_to_pet(visit: &Visit, pet_id: PetId) -> DomainResult<()> {
    if visit.pet_id == pet_id {
        Ok(())
    } else {
        Err(DomainError::VisitNotForPet {
            visit: visit.id,
            pet: pet_id,
        })
    }
}

pub fn ensure_file_belongs_to_visit(file: &ClinicalFile, visit_id: VisitId) -> DomainResult<()> {
    if file.visit_id == visit_id {
        Ok(())
    } else {
        Err(DomainError::FileNotForVisit {
            file: file.id,
            visit: visit_id,
        })
    }
}

/// A treatment may not end before it starts.
pub fn ensure_treatment_dates(treatment: &Treatment) -> DomainResult<()> {
    match treatment.end_date {
        Some(end) if end < treatment.start_date => Err(DomainError::TreatmentInvalid(format!(
            "end date {} is before start date {}",
            end, treatment.start_date
        ))),
        _ => Ok(()),
    }
}

pub fn ensure_owner_has_pets(owner: &Owner, pets: &[Pet]) -> DomainResult<()> {
    if pets.is_empty() {
        Err(DomainError::OwnerHasNoPets(owner.id))
    } else {
        Ok(())
    }
}

pub fn ensure_has_treatments(visit: &Visit, treatments: &[Treatment]) -> DomainResult<()> {
    if treatments.is_empty() {
        Err(DomainError::VisitHasNoTreatments(visit.id))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use super::*;
    use crate::models::{FileKind, TreatmentId, VeterinarianId};

    fn pet(id: i64, owner: i64) -> Pet {
        Pet {
            id: PetId::new(id),
            owner_id: OwnerId::new(owner),
            name: "Max".into(),
            species: "canine".into(),
            breed: None,
            sex: None,
            birth_date: None,
            active: true,
        }
    }

    fn visit(id: i64, pet: i64) -> Visit {
        Visit {
            id: VisitId::new(id),
            pet_id: PetId::new(pet),
            veterinarian_id: VeterinarianId::new(1),
            visited_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            reason: "checkup".into(),
            diagnosis: None,
            notes: None,
            active: true,
        }
    }

    fn treatment(start: NaiveDate, end: Option<NaiveDate>) -> Treatment {
        Treatment {
            id: TreatmentId::new(1),
            visit_id: VisitId::new(1),
            name: "Amoxicillin".into(),
            dosage: "10 mg/kg".into(),
            frequency: None,
            duration: None,
            notes: None,
            start_date: start,
            end_date: end,
            active: true,
        }
    }

    #[test]
    fn test_pet_owner_mismatch() {
        assert!(ensure_pet_belongs_to_owner(&pet(1, 2), OwnerId::new(2)).is_ok());
        assert_eq!(
            ensure_pet_belongs_to_owner(&pet(1, 2), OwnerId::new(3)).unwrap_err(),
            DomainError::PetNotOwnedBy {
                pet: PetId::new(1),
                owner: OwnerId::new(3)
            }
        );
    }

    #[test]
    fn test_visit_pet_mismatch() {
        assert!(ensure_visit_belongs_to_pet(&visit(5, 1), PetId::new(1)).is_ok());
        assert!(matches!(
            ensure_visit_belongs_to_pet(&visit(5, 1), PetId::new(2)),
            Err(DomainError::VisitNotForPet { .. })
        ));
    }

    #[test]
    fn test_file_visit_mismatch() {
        let file = ClinicalFile {
            id: crate::models::ClinicalFileId::new(8),
            visit_id: VisitId::new(5),
            original_name: "a.png".into(),
            storage_path: "f/a.png".into(),
            kind: FileKind::Image,
            uploaded_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            exists: true,
        };
        assert!(ensure_file_belongs_to_visit(&file, VisitId::new(5)).is_ok());
        assert!(matches!(
            ensure_file_belongs_to_visit(&file, VisitId::new(6)),
            Err(DomainError::FileNotForVisit { .. })
        ));
    }

    #[test]
    fn test_treatment_dates() {
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let before = NaiveDate::from_ymd_opt(2024, 4, 30).unwrap();
        assert!(ensure_treatment_dates(&treatment(start, None)).is_ok());
        assert!(ensure_treatment_dates(&treatment(start, Some(start))).is_ok());
        assert!(matches!(
            ensure_treatment_dates(&treatment(start, Some(before))),
            Err(DomainError::TreatmentInvalid(_))
        ));
    }

    #[test]
    fn test_empty_collections() {
        let v = visit(5, 1);
        assert_eq!(
            ensure_has_treatments(&v, &[]).unwrap_err(),
            DomainError::VisitHasNoTreatments(VisitId::new(5))
        );
        let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(ensure_has_treatments(&v, &[treatment(start, None)]).is_ok());
    }
}
