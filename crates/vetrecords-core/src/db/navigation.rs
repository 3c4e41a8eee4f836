//! Read-only relationship navigation.
//!
//! Each view is resolved lazily against the unit of work and applies the same
//! active-only filter as the access operations, so a parent that has been
//! soft-deleted navigates to `None`.

use super::{DbResult, UnitOfWork};
use crate::models::{ClinicalFile, Owner, Pet, Treatment, Veterinarian, Visit};

impl UnitOfWork<'_> {
    pub fn owner_of_pet(&self, pet: &Pet) -> DbResult<Option<Owner>> {
        self.get_owner(pet.owner_id)
    }

    pub fn pets_of_owner(&self, owner: &Owner) -> DbResult<Vec<Pet>> {
        self.list_pets_by_owner(owner.id)
    }

    pub fn visits_of_pet(&self, pet: &Pet) -> DbResult<Vec<Visit>> {
        self.list_visits_by_pet(pet.id)
    }

    pub fn pet_of_visit(&self, visit: &Visit) -> DbResult<Option<Pet>> {
        self.get_pet(visit.pet_id)
    }

    pub fn veterinarian_of_visit(&self, visit: &Visit) -> DbResult<Option<Veterinarian>> {
        self.get_veterinarian(visit.veterinarian_id)
    }

    pub fn visits_of_veterinarian(&self, vet: &Veterinarian) -> DbResult<Vec<Visit>> {
        self.list_visits_by_veterinarian(vet.id)
    }

    pub fn files_of_visit(&self, visit: &Visit) -> DbResult<Vec<ClinicalFile>> {
        self.list_files_by_visit(visit.id)
    }

    pub fn treatments_of_visit(&self, visit: &Visit) -> DbResult<Vec<Treatment>> {
        self.list_treatments_by_visit(visit.id)
    }

    pub fn visit_of_file(&self, file: &ClinicalFile) -> DbResult<Option<Visit>> {
        self.get_visit(file.visit_id)
    }

    pub fn visit_of_treatment(&self, treatment: &Treatment) -> DbResult<Option<Visit>> {
        self.get_visit(treatment.visit_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::models::{
        FileKind, NewClinicalFile, NewOwner, NewPet, NewTreatment, NewVeterinarian, NewVisit,
    };

    #[test]
    fn test_navigate_full_chain() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();

        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let pet = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();
        let vet = uow
            .create_veterinarian(NewVeterinarian::new("Dr. Smith", "MP-1"))
            .unwrap();
        let visit = uow.create_visit(NewVisit::new(pet.id, vet.id, "checkup")).unwrap();
        let file = uow
            .create_clinical_file(NewClinicalFile::new(visit.id, "a.pdf", "f/a.pdf", FileKind::Pdf))
            .unwrap();
        let treatment = uow
            .create_treatment(NewTreatment::new(visit.id, "Deworming", "1 tab"))
            .unwrap();

        assert_eq!(uow.owner_of_pet(&pet).unwrap(), Some(owner.clone()));
        assert_eq!(uow.pets_of_owner(&owner).unwrap(), vec![pet.clone()]);
        assert_eq!(uow.visits_of_pet(&pet).unwrap(), vec![visit.clone()]);
        assert_eq!(uow.pet_of_visit(&visit).unwrap(), Some(pet));
        assert_eq!(uow.veterinarian_of_visit(&visit).unwrap(), Some(vet.clone()));
        assert_eq!(uow.visits_of_veterinarian(&vet).unwrap(), vec![visit.clone()]);
        assert_eq!(uow.files_of_visit(&visit).unwrap(), vec![file.clone()]);
        assert_eq!(uow.treatments_of_visit(&visit).unwrap(), vec![treatment.clone()]);
        assert_eq!(uow.visit_of_file(&file).unwrap(), Some(visit.clone()));
        assert_eq!(uow.visit_of_treatment(&treatment).unwrap(), Some(visit));
    }

    #[test]
    fn test_inactive_parent_navigates_to_none() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();

        let mut owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let pet = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();
        uow.deactivate_owner(&mut owner).unwrap();

        assert!(uow.owner_of_pet(&pet).unwrap().is_none());
        // no cascade: the pet itself is still active
        assert!(uow.get_pet(pet.id).unwrap().is_some());
    }
}
