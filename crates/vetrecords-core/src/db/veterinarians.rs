//! Veterinarian database operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{retire_row, ColumnSet, DbResult, UnitOfWork};
use crate::models::{NewVeterinarian, SoftDelete, Veterinarian, VeterinarianId, VeterinarianPatch};

const VETERINARIAN_COLUMNS: &str = "id, name, license_number, active";

fn veterinarian_from_row(row: &Row<'_>) -> rusqlite::Result<Veterinarian> {
    Ok(Veterinarian {
        id: row.get(0)?,
        name: row.get(1)?,
        license_number: row.get(2)?,
        active: row.get(3)?,
    })
}

impl UnitOfWork<'_> {
    /// Insert a new active veterinarian.
    ///
    /// Fails with a constraint violation if an active veterinarian already
    /// holds the license number.
    pub fn create_veterinarian(&self, new: NewVeterinarian) -> DbResult<Veterinarian> {
        self.tx.execute(
            "INSERT INTO veterinarians (name, license_number, active) VALUES (?1, ?2, 1)",
            params![new.name, new.license_number],
        )?;
        let vet = Veterinarian {
            id: VeterinarianId::new(self.tx.last_insert_rowid()),
            name: new.name,
            license_number: new.license_number,
            active: true,
        };
        debug!(veterinarian_id = %vet.id, "veterinarian created");
        Ok(vet)
    }

    /// Get an active veterinarian by ID.
    pub fn get_veterinarian(&self, id: VeterinarianId) -> DbResult<Option<Veterinarian>> {
        let sql = format!(
            "SELECT {} FROM veterinarians WHERE id = ?1 AND active = 1",
            VETERINARIAN_COLUMNS
        );
        self.tx
            .query_row(&sql, [id], veterinarian_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Get an active veterinarian by license number.
    pub fn find_veterinarian_by_license(&self, license_number: &str) -> DbResult<Option<Veterinarian>> {
        let sql = format!(
            "SELECT {} FROM veterinarians WHERE license_number = ?1 AND active = 1",
            VETERINARIAN_COLUMNS
        );
        self.tx
            .query_row(&sql, [license_number], veterinarian_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List active veterinarians ordered by name.
    pub fn list_veterinarians(&self) -> DbResult<Vec<Veterinarian>> {
        let sql = format!(
            "SELECT {} FROM veterinarians WHERE active = 1 ORDER BY name, id",
            VETERINARIAN_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([], veterinarian_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply the supplied fields. The license number is never touched.
    pub fn update_veterinarian(
        &self,
        mut vet: Veterinarian,
        patch: VeterinarianPatch,
    ) -> DbResult<Veterinarian> {
        let mut columns = ColumnSet::default();
        if let Some(name) = patch.name {
            columns.set("name", name.clone());
            vet.name = name;
        }
        columns.write(&self.tx, "veterinarians", vet.id)?;
        Ok(vet)
    }

    /// Correct a veterinarian's license number.
    ///
    /// Exceptional: the generic update never changes this field.
    pub fn correct_veterinarian_license(
        &self,
        mut vet: Veterinarian,
        license_number: impl Into<String>,
    ) -> DbResult<Veterinarian> {
        let license_number = license_number.into();
        self.tx.execute(
            "UPDATE veterinarians SET license_number = ?1 WHERE id = ?2",
            params![license_number, vet.id],
        )?;
        debug!(veterinarian_id = %vet.id, "veterinarian license corrected");
        vet.license_number = license_number;
        Ok(vet)
    }

    /// Soft-delete a veterinarian. Their visits are left as they are.
    pub fn deactivate_veterinarian(&self, vet: &mut Veterinarian) -> DbResult<()> {
        retire_row(&self.tx, "veterinarians", "active", vet.id)?;
        vet.retire();
        debug!(veterinarian_id = %vet.id, "veterinarian deactivated");
        Ok(())
    }
}
