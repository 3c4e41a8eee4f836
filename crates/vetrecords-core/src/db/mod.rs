//! Database layer for the clinic records store.
//!
//! [`Database`] owns the SQLite connection and bootstraps the schema.
//! Every access operation lives on [`UnitOfWork`], a transaction that the
//! caller opens, passes around, and finally commits or drops. The access
//! layer itself never commits.

mod schema;
mod owners;
mod pets;
mod veterinarians;
mod visits;
mod treatments;
mod clinical_files;
mod navigation;

pub use schema::*;

use std::path::Path;
use std::time::Duration;

use rusqlite::{params_from_iter, Connection, ErrorCode, ToSql, Transaction};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, JournalMode, StoreConfig};

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DbError {
    /// Whether the storage engine rejected a write on a uniqueness,
    /// foreign-key, or check constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating file and tables if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        Self::from_config(&StoreConfig::at(path.as_ref()))
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::from_config(&StoreConfig::in_memory())
    }

    /// Open the store described by `config`.
    pub fn from_config(config: &StoreConfig) -> DbResult<Self> {
        let conn = if config.is_in_memory() {
            Connection::open_in_memory()?
        } else {
            Connection::open(&config.path)?
        };
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        if !config.is_in_memory() {
            apply_journal_mode(&conn, config.journal_mode)?;
        }

        let db = Self { conn };
        db.ensure_schema()?;
        info!(path = %config.path.display(), "clinic records store ready");
        Ok(db)
    }

    /// Open the store described by a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let config = StoreConfig::from_file(path)?;
        Self::from_config(&config)
    }

    /// Create any missing tables and indexes. Safe to call repeatedly.
    pub fn ensure_schema(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Names of the clinic tables present in the database.
    pub fn table_names(&self) -> DbResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names
            .into_iter()
            .filter(|name| TABLES.contains(&name.as_str()))
            .collect())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin a unit of work.
    pub fn unit_of_work(&mut self) -> DbResult<UnitOfWork<'_>> {
        Ok(UnitOfWork {
            tx: self.conn.transaction()?,
        })
    }
}

fn apply_journal_mode(conn: &Connection, mode: JournalMode) -> DbResult<()> {
    let applied: String =
        conn.pragma_update_and_check(None, "journal_mode", mode.as_str(), |row| row.get(0))?;
    debug!(requested = mode.as_str(), applied = %applied, "journal mode set");
    Ok(())
}

/// A transaction that accumulates creates, updates and deactivations.
///
/// Owned by the caller. Dropping it without [`commit`](Self::commit) rolls
/// back everything done through it.
pub struct UnitOfWork<'db> {
    tx: Transaction<'db>,
}

impl UnitOfWork<'_> {
    /// Make every change in this unit of work durable.
    pub fn commit(self) -> DbResult<()> {
        self.tx.commit()?;
        Ok(())
    }

    /// Discard every change in this unit of work.
    pub fn rollback(self) -> DbResult<()> {
        self.tx.rollback()?;
        Ok(())
    }

    /// Underlying connection, for queries the access layer doesn't cover.
    pub fn conn(&self) -> &Connection {
        &self.tx
    }
}

/// Columns explicitly supplied to an update, written in one statement.
#[derive(Default)]
pub(crate) struct ColumnSet {
    columns: Vec<&'static str>,
    values: Vec<Box<dyn ToSql>>,
}

impl ColumnSet {
    pub(crate) fn set<T: ToSql + 'static>(&mut self, column: &'static str, value: T) {
        self.columns.push(column);
        self.values.push(Box::new(value));
    }

    /// Write the collected columns to row `id` of `table`. Does nothing
    /// when no column was supplied.
    pub(crate) fn write<I: ToSql + 'static>(
        mut self,
        conn: &Connection,
        table: &'static str,
        id: I,
    ) -> DbResult<usize> {
        if self.columns.is_empty() {
            return Ok(0);
        }

        let assignments = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{} = ?{}", column, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            table,
            assignments,
            self.columns.len() + 1
        );
        self.values.push(Box::new(id));

        let rows_affected = conn.execute(&sql, params_from_iter(self.values.iter()))?;
        debug!(table, columns = ?self.columns, "columns updated");
        Ok(rows_affected)
    }
}

/// Flip the soft-delete flag of row `id`. Idempotent.
pub(crate) fn retire_row<I: ToSql>(
    conn: &Connection,
    table: &'static str,
    flag: &'static str,
    id: I,
) -> DbResult<usize> {
    let sql = format!("UPDATE {} SET {} = 0 WHERE id = ?1", table, flag);
    Ok(conn.execute(&sql, [id])?)
}
