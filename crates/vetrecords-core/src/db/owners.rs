//! Owner database operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{retire_row, ColumnSet, DbResult, UnitOfWork};
use crate::models::{NewOwner, Owner, OwnerId, OwnerPatch, SoftDelete};

const OWNER_COLUMNS: &str = "id, national_id, name, phone, email, address, active";

fn owner_from_row(row: &Row<'_>) -> rusqlite::Result<Owner> {
    Ok(Owner {
        id: row.get(0)?,
        national_id: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        address: row.get(5)?,
        active: row.get(6)?,
    })
}

impl UnitOfWork<'_> {
    /// Insert a new active owner.
    pub fn create_owner(&self, new: NewOwner) -> DbResult<Owner> {
        self.tx.execute(
            r#"
            INSERT INTO owners (national_id, name, phone, email, address, active)
            VALUES (?1, ?2, ?3, ?4, ?5, 1)
            "#,
            params![new.national_id, new.name, new.phone, new.email, new.address],
        )?;
        let owner = Owner {
            id: OwnerId::new(self.tx.last_insert_rowid()),
            national_id: new.national_id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            address: new.address,
            active: true,
        };
        debug!(owner_id = %owner.id, "owner created");
        Ok(owner)
    }

    /// Get an active owner by ID.
    pub fn get_owner(&self, id: OwnerId) -> DbResult<Option<Owner>> {
        let sql = format!("SELECT {} FROM owners WHERE id = ?1 AND active = 1", OWNER_COLUMNS);
        self.tx
            .query_row(&sql, [id], owner_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Get an active owner by national ID.
    pub fn find_owner_by_national_id(&self, national_id: &str) -> DbResult<Option<Owner>> {
        let sql = format!(
            "SELECT {} FROM owners WHERE national_id = ?1 AND active = 1",
            OWNER_COLUMNS
        );
        self.tx
            .query_row(&sql, [national_id], owner_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List active owners ordered by name.
    pub fn list_owners(&self) -> DbResult<Vec<Owner>> {
        let sql = format!(
            "SELECT {} FROM owners WHERE active = 1 ORDER BY name, id",
            OWNER_COLUMNS
        );
        let mut stmt = self.tx.prepare(&sql)?;
        let rows = stmt.query_map([], owner_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Apply the supplied contact fields. The national ID is never touched.
    pub fn update_owner(&self, mut owner: Owner, patch: OwnerPatch) -> DbResult<Owner> {
        let mut columns = ColumnSet::default();
        if let Some(name) = patch.name {
            columns.set("name", name.clone());
            owner.name = name;
        }
        if let Some(phone) = patch.phone {
            columns.set("phone", phone.clone());
            owner.phone = Some(phone);
        }
        if let Some(email) = patch.email {
            columns.set("email", email.clone());
            owner.email = Some(email);
        }
        if let Some(address) = patch.address {
            columns.set("address", address.clone());
            owner.address = Some(address);
        }
        columns.write(&self.tx, "owners", owner.id)?;
        Ok(owner)
    }

    /// Correct an owner's national ID.
    ///
    /// Exceptional: the generic update never changes this field. Fails with a
    /// constraint violation if another active owner already holds the ID.
    pub fn correct_owner_national_id(
        &self,
        mut owner: Owner,
        national_id: impl Into<String>,
    ) -> DbResult<Owner> {
        let national_id = national_id.into();
        self.tx.execute(
            "UPDATE owners SET national_id = ?1 WHERE id = ?2",
            params![national_id, owner.id],
        )?;
        debug!(owner_id = %owner.id, "owner national ID corrected");
        owner.national_id = national_id;
        Ok(owner)
    }

    /// Soft-delete an owner. Pets are left as they are.
    pub fn deactivate_owner(&self, owner: &mut Owner) -> DbResult<()> {
        retire_row(&self.tx, "owners", "active", owner.id)?;
        owner.retire();
        debug!(owner_id = %owner.id, "owner deactivated");
        Ok(())
    }
}
