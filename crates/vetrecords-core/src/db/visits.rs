//! Visit database operations.

use chrono::{SubsecRound, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{retire_row, ColumnSet, DbResult, UnitOfWork};
use crate::models::{NewVisit, PetId, SoftDelete, VeterinarianId, Visit, VisitId, VisitPatch};

const VISIT_COLUMNS: &str =
    "id, pet_id, veterinarian_id, visited_at, reason, diagnosis, notes, active";

fn visit_from_row(row: &Row<'_>) -> rusqlite::Result<Visit> {
    Ok(Visit {
        id: row.get(0)?,
        pet_id: row.get(1)?,
        veterinarian_id: row.get(2)?,
        visited_at: row.get(3)?,
        reason: row.get(4)?,
        diagnosis: row.get(5)?,
        notes: row.get(6)?,
        active: row.get(7)?,
    })
}

impl UnitOfWork<'_> {
    /// Insert a new active visit. The time defaults to now.
    pub fn create_visit(&self, new: NewVisit) -> DbResult<Visit> {
        let visited_at = new.visited_at.unwrap_or_else(|| Utc::now().trunc_subsecs(6));
        self.tx.execute(
            r#"
            INSERT INTO visits (
                pet_id, veterinarian_id, visited_at, reason, diagnosis, notes, active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1)
            "#,
            params![
                new.pet_id,
                new.veterinarian_id,
                visited_at,
                new.reason,
                new.diagnosis,
                new.notes,
            ],
        )?;
        let visit = Visit {
            id: VisitId::new(self.tx.last_insert_rowid()),
            pet_id: new.pet_id,
            veterinarian_id: new.veterinarian_id,
            visited_at,
            reason: new.reason,
            diagnosis: new.diagnosis,
            notes: new.notes,
            active: true,
        };
        debug!(visit_id = %visit.id, pet_id = %visit.pet_id, "visit created");
        Ok(visit)
    }

    /// Get an active visit by ID.
    pub fn get_visit(&self, id: VisitId) -> DbResult<Option<Visit>> {
        let sql = format!("SELECT {} FROM visits WHERE id = ?1 AND active = 1", VISIT_COLUMNS);
        self.tx
            .query_row(&sql, [id], visit_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List all active visits, oldest first.
    pub fn list_visits(&self) -> DbResult<Vec<Visit>> {
        let sql = format!(
            "SELECT {} FROM visits WHERE active = 1 ORDER BY visited_at, id",
            VISIT_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([], visit_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List a pet's active visits, oldest first.
    pub fn list_visits_by_pet(&self, pet_id: PetId) -> DbResult<Vec<Visit>> {
        let sql = format!(
            "SELECT {} FROM visits WHERE pet_id = ?1 AND active = 1 ORDER BY visited_at, id",
            VISIT_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([pet_id], visit_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List a veterinarian's active visits, oldest first.
    pub fn list_visits_by_veterinarian(&self, veterinarian_id: VeterinarianId) -> DbResult<Vec<Visit>> {
        let sql = format!(
            "SELECT {} FROM visits WHERE veterinarian_id = ?1 AND active = 1 ORDER BY visited_at, id",
            VISIT_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([veterinarian_id], visit_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply the supplied clinical fields. Pet and veterinarian are never touched.
    pub fn update_visit(&self, mut visit: Visit, patch: VisitPatch) -> DbResult<Visit> {
        let mut columns = ColumnSet::default();
        if let Some(reason) = patch.reason {
            columns.set("reason", reason.clone());
            visit.reason = reason;
        }
        if let Some(diagnosis) = patch.diagnosis {
            columns.set("diagnosis", diagnosis.clone());
            visit.diagnosis = Some(diagnosis);
        }
        if let Some(notes) = patch.notes {
            columns.set("notes", notes.clone());
            visit.notes = Some(notes);
        }
        columns.write(&self.tx, "visits", visit.id)?;
        Ok(visit)
    }

    /// Attach a visit to a different pet.
    ///
    /// Exceptional: the generic update never changes the pet reference.
    pub fn reassign_visit_pet(&self, mut visit: Visit, pet_id: PetId) -> DbResult<Visit> {
        self.tx.execute(
            "UPDATE visits SET pet_id = ?1 WHERE id = ?2",
            params![pet_id, visit.id],
        )?;
        debug!(visit_id = %visit.id, from = %visit.pet_id, to = %pet_id, "visit pet reassigned");
        visit.pet_id = pet_id;
        Ok(visit)
    }

    /// Attribute a visit to a different veterinarian.
    ///
    /// Exceptional: the generic update never changes the veterinarian reference.
    pub fn reassign_visit_veterinarian(
        &self,
        mut visit: Visit,
        veterinarian_id: VeterinarianId,
    ) -> DbResult<Visit> {
        self.tx.execute(
            "UPDATE visits SET veterinarian_id = ?1 WHERE id = ?2",
            params![veterinarian_id, visit.id],
        )?;
        debug!(
            visit_id = %visit.id,
            from = %visit.veterinarian_id,
            to = %veterinarian_id,
            "visit veterinarian reassigned"
        );
        visit.veterinarian_id = veterinarian_id;
        Ok(visit)
    }

    /// Soft-delete a visit. Files and treatments are left as they are.
    pub fn deactivate_visit(&self, visit: &mut Visit) -> DbResult<()> {
        retire_row(&self.tx, "visits", "active", visit.id)?;
        visit.retire();
        debug!(visit_id = %visit.id, "visit deactivated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use crate::db::Database;
    use crate::models::{NewOwner, NewPet, NewVeterinarian, NewVisit, VisitPatch};

    #[test]
    fn test_visits_ordered_by_time() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let pet = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();
        let vet = uow
            .create_veterinarian(NewVeterinarian::new("Dr. Smith", "MP-1"))
            .unwrap();

        let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let late = uow
            .create_visit(NewVisit::new(pet.id, vet.id, "follow-up").at(base + Duration::days(10)))
            .unwrap();
        let early = uow
            .create_visit(NewVisit::new(pet.id, vet.id, "vaccination").at(base))
            .unwrap();

        let visits = uow.list_visits_by_pet(pet.id).unwrap();
        assert_eq!(visits, vec![early.clone(), late.clone()]);
        assert_eq!(uow.list_visits_by_veterinarian(vet.id).unwrap(), vec![early, late]);
    }

    #[test]
    fn test_default_timestamp_round_trips() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let pet = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();
        let vet = uow
            .create_veterinarian(NewVeterinarian::new("Dr. Smith", "MP-1"))
            .unwrap();

        let visit = uow.create_visit(NewVisit::new(pet.id, vet.id, "checkup")).unwrap();
        assert_eq!(uow.get_visit(visit.id).unwrap().unwrap(), visit);
    }

    #[test]
    fn test_update_clinical_fields() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let pet = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();
        let vet = uow
            .create_veterinarian(NewVeterinarian::new("Dr. Smith", "MP-1"))
            .unwrap();
        let visit = uow.create_visit(NewVisit::new(pet.id, vet.id, "limping")).unwrap();

        let patch = VisitPatch {
            diagnosis: Some("sprained carpus".into()),
            ..Default::default()
        };
        let updated = uow.update_visit(visit, patch).unwrap();

        let stored = uow.get_visit(updated.id).unwrap().unwrap();
        assert_eq!(stored.reason, "limping");
        assert_eq!(stored.diagnosis, Some("sprained carpus".into()));
        assert_eq!(stored.pet_id, pet.id);
        assert_eq!(stored.veterinarian_id, vet.id);
    }

    #[test]
    fn test_reassign_visit() {
        let mut db = Database::open_in_memory().unwrap();
        let uow = db.unit_of_work().unwrap();
        let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
        let max = uow.create_pet(NewPet::new(owner.id, "Max", "canine")).unwrap();
        let luna = uow.create_pet(NewPet::new(owner.id, "Luna", "feline")).unwrap();
        let smith = uow
            .create_veterinarian(NewVeterinarian::new("Dr. Smith", "MP-1"))
            .unwrap();
        let jones = uow
            .create_veterinarian(NewVeterinarian::new("Dr. Jones", "MP-2"))
            .unwrap();
        let visit = uow.create_visit(NewVisit::new(max.id, smith.id, "cough")).unwrap();

        let visit = uow.reassign_visit_pet(visit, luna.id).unwrap();
        let visit = uow.reassign_visit_veterinarian(visit, jones.id).unwrap();

        let stored = uow.get_visit(visit.id).unwrap().unwrap();
        assert_eq!(stored.pet_id, luna.id);
        assert_eq!(stored.veterinarian_id, jones.id);
        assert!(uow.list_visits_by_pet(max.id).unwrap().is_empty());
    }
}
