//! Treatment database operations.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{retire_row, ColumnSet, DbResult, UnitOfWork};
use crate::models::{NewTreatment, SoftDelete, Treatment, TreatmentId, TreatmentPatch, VisitId};

const TREATMENT_COLUMNS: &str =
    "id, visit_id, name, dosage, frequency, duration, notes, start_date, end_date, active";

fn treatment_from_row(row: &Row<'_>) -> rusqlite::Result<Treatment> {
    Ok(Treatment {
        id: row.get(0)?,
        visit_id: row.get(1)?,
        name: row.get(2)?,
        dosage: row.get(3)?,
        frequency: row.get(4)?,
        duration: row.get(5)?,
        notes: row.get(6)?,
        start_date: row.get(7)?,
        end_date: row.get(8)?,
        active: row.get(9)?,
    })
}

impl UnitOfWork<'_> {
    /// Insert a new active treatment. The start date defaults to today.
    pub fn create_treatment(&self, new: NewTreatment) -> DbResult<Treatment> {
        let start_date = new.start_date.unwrap_or_else(|| Utc::now().date_naive());
        self.tx.execute(
            r#"
            INSERT INTO treatments (
                visit_id, name, dosage, frequency, duration, notes,
                start_date, end_date, active
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1)
            "#,
            params![
                new.visit_id,
                new.name,
                new.dosage,
                new.frequency,
                new.duration,
                new.notes,
                start_date,
                new.end_date,
            ],
        )?;
        let treatment = Treatment {
            id: TreatmentId::new(self.tx.last_insert_rowid()),
            visit_id: new.visit_id,
            name: new.name,
            dosage: new.dosage,
            frequency: new.frequency,
            duration: new.duration,
            notes: new.notes,
            start_date,
            end_date: new.end_date,
            active: true,
        };
        debug!(treatment_id = %treatment.id, visit_id = %treatment.visit_id, "treatment created");
        Ok(treatment)
    }

    /// Get an active treatment by ID.
    pub fn get_treatment(&self, id: TreatmentId) -> DbResult<Option<Treatment>> {
        let sql = format!(
            "SELECT {} FROM treatments WHERE id = ?1 AND active = 1",
            TREATMENT_COLUMNS
        );
        self.tx
            .query_row(&sql, [id], treatment_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List all active treatments by start date.
    pub fn list_treatments(&self) -> DbResult<Vec<Treatment>> {
        let sql = format!(
            "SELECT {} FROM treatments WHERE active = 1 ORDER BY start_date, id",
            TREATMENT_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([], treatment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List a visit's active treatments by start date.
    pub fn list_treatments_by_visit(&self, visit_id: VisitId) -> DbResult<Vec<Treatment>> {
        let sql = format!(
            "SELECT {} FROM treatments WHERE visit_id = ?1 AND active = 1 ORDER BY start_date, id",
            TREATMENT_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([visit_id], treatment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply the supplied fields. The visit is never touched.
    pub fn update_treatment(&self, mut treatment: Treatment, patch: TreatmentPatch) -> DbResult<Treatment> {
        let mut columns = ColumnSet::default();
        if let Some(name) = patch.name {
            columns.set("name", name.clone());
            treatment.name = name;
        }
        if let Some(dosage) = patch.dosage {
            columns.set("dosage", dosage.clone());
            treatment.dosage = dosage;
        }
        if let Some(frequency) = patch.frequency {
            columns.set("frequency", frequency.clone());
            treatment.frequency = Some(frequency);
        }
        if let Some(duration) = patch.duration {
            columns.set("duration", duration.clone());
            treatment.duration = Some(duration);
        }
        if let Some(notes) = patch.notes {
            columns.set("notes", notes.clone());
            treatment.notes = Some(notes);
        }
        if let Some(start_date) = patch.start_date {
            columns.set("start_date", start_date);
            treatment.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            columns.set("end_date", end_date);
            treatment.end_date = Some(end_date);
        }
        columns.write(&self.tx, "treatments", treatment.id)?;
        Ok(treatment)
    }

    /// Close a treatment by recording its end date.
    pub fn finish_treatment(&self, mut treatment: Treatment, end_date: NaiveDate) -> DbResult<Treatment> {
        self.tx.execute(
            "UPDATE treatments SET end_date = ?1 WHERE id = ?2",
            params![end_date, treatment.id],
        )?;
        debug!(treatment_id = %treatment.id, %end_date, "treatment finished");
        treatment.end_date = Some(end_date);
        Ok(treatment)
    }

    /// Soft-delete a treatment.
    pub fn deactivate_treatment(&self, treatment: &mut Treatment) -> DbResult<()> {
        retire_row(&self.tx, "treatments", "active", treatment.id)?;
        treatment.retire();
        debug!(treatment_id = %treatment.id, "treatment deactivated");
        Ok(())
    }
}
