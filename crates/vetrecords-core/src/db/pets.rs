//! Pet database operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{retire_row, ColumnSet, DbResult, UnitOfWork};
use crate::models::{NewPet, OwnerId, Pet, PetId, PetPatch, SoftDelete};

const PET_COLUMNS: &str = "id, owner_id, name, species, breed, sex, birth_date, active";

fn pet_from_row(row: &Row<'_>) -> rusqlite::Result<Pet> {
    Ok(Pet {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        name: row.get(2)?,
        species: row.get(3)?,
        breed: row.get(4)?,
        sex: row.get(5)?,
        birth_date: row.get(6)?,
        active: row.get(7)?,
    })
}

impl UnitOfWork<'_> {
    /// Insert a new active pet for an existing owner.
    pub fn create_pet(&self, new: NewPet) -> DbResult<Pet> {
        self.tx.execute(
            r#"
            INSERT INTO pets (owner_id, name, species, breed, sex, birth_date, active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
            "#,
            params![
                new.owner_id,
                new.name,
                new.species,
                new.breed,
                new.sex,
                new.birth_date,
            ],
        )?;
        let pet = Pet {
            id: PetId::new(self.tx.last_insert_rowid()),
            owner_id: new.owner_id,
            name: new.name,
            species: new.species,
            breed: new.breed,
            sex: new.sex,
            birth_date: new.birth_date,
            active: true,
        };
        debug!(pet_id = %pet.id, owner_id = %pet.owner_id, "pet created");
        Ok(pet)
    }

    /// Get an active pet by ID.
    pub fn get_pet(&self, id: PetId) -> DbResult<Option<Pet>> {
        let sql = format!("SELECT {} FROM pets WHERE id = ?1 AND active = 1", PET_COLUMNS);
        self.tx
            .query_row(&sql, [id], pet_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List all active pets ordered by name.
    pub fn list_pets(&self) -> DbResult<Vec<Pet>> {
        let sql = format!(
            "SELECT {} FROM pets WHERE active = 1 ORDER BY name, id",
            PET_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([], pet_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List an owner's active pets ordered by name.
    pub fn list_pets_by_owner(&self, owner_id: OwnerId) -> DbResult<Vec<Pet>> {
        let sql = format!(
            "SELECT {} FROM pets WHERE owner_id = ?1 AND active = 1 ORDER BY name, id",
            PET_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([owner_id], pet_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply the supplied descriptive fields. The owner is never touched.
    pub fn update_pet(&self, mut pet: Pet, patch: PetPatch) -> DbResult<Pet> {
        let mut columns = ColumnSet::default();
        if let Some(name) = patch.name {
            columns.set("name", name.clone());
            pet.name = name;
        }
        if let Some(species) = patch.species {
            columns.set("species", species.clone());
            pet.species = species;
        }
        if let Some(breed) = patch.breed {
            columns.set("breed", breed.clone());
            pet.breed = Some(breed);
        }
        if let Some(sex) = patch.sex {
            columns.set("sex", sex.clone());
            pet.sex = Some(sex);
        }
        if let Some(birth_date) = patch.birth_date {
            columns.set("birth_date", birth_date);
            pet.birth_date = Some(birth_date);
        }
        columns.write(&self.tx, "pets", pet.id)?;
        Ok(pet)
    }

    /// Move a pet to another owner.
    ///
    /// Exceptional: the generic update never changes the owner reference.
    pub fn reassign_pet_owner(&self, mut pet: Pet, owner_id: OwnerId) -> DbResult<Pet> {
        self.tx.execute(
            "UPDATE pets SET owner_id = ?1 WHERE id = ?2",
            params![owner_id, pet.id],
        )?;
        debug!(pet_id = %pet.id, from = %pet.owner_id, to = %owner_id, "pet reassigned");
        pet.owner_id = owner_id;
        Ok(pet)
    }

    /// Soft-delete a pet. Visits are left as they are.
    pub fn deactivate_pet(&self, pet: &mut Pet) -> DbResult<()> {
        retire_row(&self.tx, "pets", "active", pet.id)?;
        pet.retire();
        debug!(pet_id = %pet.id, "pet deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::db::Database;
    use crate::models::{NewOwner, NewPet, PetPatch};

    #[test]
    fn test_create_and_get() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();

        let mut new = NewPet::new(owner.id, "Max", "canine");
        new.breed = Some("Golden Retriever".into());
        new.birth_date = NaiveDate::from_ymd_opt(2019, 4, 2);
        let pet = uow.create_pet(new).unwrap();

        let retrieved = uow.get_pet(pet.id).unwrap().unwrap();
        assert_eq!(retrieved, pet);
        assert_eq!(retrieved.birth_date, NaiveDate::from_ymd_opt(2019, 4, 2));
    }

    #[test]
    fn test_list_by_owner_sorted_by_name() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let other = uow.create_owner(NewOwner::new("2", "Beto")).unwrap();

        for name in ["Zeta", "Alpha", "Mimi"] {
            uow.create_pet(NewPet::new(owner.id, name, "feline")).unwrap();
        }
        uow.create_pet(NewPet::new(other.id, "Bruno", "canine")).unwrap();

        let names: Vec<String> = uow
            .list_pets_by_owner(owner.id)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Mimi", "Zeta"]);
        assert_eq!(uow.list_pets().unwrap().len(), 4);
    }

    #[test]
    fn test_update_keeps_owner() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let pet = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();

        let patch = PetPatch {
            sex: Some("male".into()),
            ..Default::default()
        };
        let updated = uow.update_pet(pet, patch).unwrap();

        let stored = uow.get_pet(updated.id).unwrap().unwrap();
        assert_eq!(stored.owner_id, owner.id);
        assert_eq!(stored.sex, Some("male".into()));
        assert_eq!(stored.name, "Max");
    }

    #[test]
    fn test_reassign_owner() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let ana = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let beto = uow.create_owner(NewOwner::new("2", "Beto")).unwrap();
        let pet = uow.create_pet(NewPet::new(ana.id, "Max", "canine")).unwrap();

        let moved = uow.reassign_pet_owner(pet, beto.id).unwrap();
        assert_eq!(moved.owner_id, beto.id);
        assert!(uow.list_pets_by_owner(ana.id).unwrap().is_empty());
        assert_eq!(uow.list_pets_by_owner(beto.id).unwrap(), vec![moved]);
    }

    #[test]
    fn test_create_for_missing_owner_fails() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();

        let err = uow
            .create_pet(NewPet::new(crate::models::OwnerId::new(404), "Ghost", "canine"))
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }
}
