//! Clinical file metadata operations.

use chrono::{SubsecRound, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{retire_row, DbResult, UnitOfWork};
use crate::models::{ClinicalFile, ClinicalFileId, FileKind, NewClinicalFile, SoftDelete, VisitId};

const FILE_COLUMNS: &str =
    "id, visit_id, original_name, storage_path, kind, uploaded_at, exists_flag";

impl ToSql for FileKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for FileKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse::<FileKind>()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

fn file_from_row(row: &Row<'_>) -> rusqlite::Result<ClinicalFile> {
    Ok(ClinicalFile {
        id: row.get(0)?,
        visit_id: row.get(1)?,
        original_name: row.get(2)?,
        storage_path: row.get(3)?,
        kind: row.get(4)?,
        uploaded_at: row.get(5)?,
        exists: row.get(6)?,
    })
}

impl UnitOfWork<'_> {
    /// Record a new attachment for a visit, uploaded now.
    pub fn create_clinical_file(&self, new: NewClinicalFile) -> DbResult<ClinicalFile> {
        let uploaded_at = Utc::now().trunc_subsecs(6);
        self.tx.execute(
            r#"
            INSERT INTO clinical_files (
                visit_id, original_name, storage_path, kind, uploaded_at, exists_flag
            ) VALUES (?1, ?2, ?3, ?4, ?5, 1)
            "#,
            params![
                new.visit_id,
                new.original_name,
                new.storage_path,
                new.kind,
                uploaded_at,
            ],
        )?;
        let file = ClinicalFile {
            id: ClinicalFileId::new(self.tx.last_insert_rowid()),
            visit_id: new.visit_id,
            original_name: new.original_name,
            storage_path: new.storage_path,
            kind: new.kind,
            uploaded_at,
            exists: true,
        };
        debug!(file_id = %file.id, visit_id = %file.visit_id, kind = %file.kind, "clinical file recorded");
        Ok(file)
    }

    /// Get an existing attachment by ID.
    pub fn get_clinical_file(&self, id: ClinicalFileId) -> DbResult<Option<ClinicalFile>> {
        let sql = format!(
            "SELECT {} FROM clinical_files WHERE id = ?1 AND exists_flag = 1",
            FILE_COLUMNS
        );
        self.tx
            .query_row(&sql, [id], file_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List a visit's attachments in upload order.
    pub fn list_files_by_visit(&self, visit_id: VisitId) -> DbResult<Vec<ClinicalFile>> {
        let sql = format!(
            "SELECT {} FROM clinical_files WHERE visit_id = ?1 AND exists_flag = 1 ORDER BY uploaded_at, id",
            FILE_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([visit_id], file_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Soft-delete an attachment. The stored bytes are not touched.
    pub fn deactivate_clinical_file(&self, file: &mut ClinicalFile) -> DbResult<()> {
        retire_row(&self.tx, "clinical_files", "exists_flag", file.id)?;
        file.retire();
        debug!(file_id = %file.id, "clinical file deactivated");
        Ok(())
    }
}
