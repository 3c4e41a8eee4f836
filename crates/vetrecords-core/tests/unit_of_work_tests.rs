//! Unit-of-work lifecycle and store bootstrap.

use std::fs;

use vetrecords_core::config::{JournalMode, StoreConfig};
use vetrecords_core::db::{Database, DbError, TABLES};
use vetrecords_core::models::{NewOwner, NewVeterinarian, OwnerPatch};

#[test]
fn test_committed_work_is_visible_to_next_unit() {
    let mut db = Database::open_in_memory().unwrap();

    let uow = db.unit_of_work().unwrap();
    let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
    uow.commit().unwrap();

    let uow = db.unit_of_work().unwrap();
    assert_eq!(uow.get_owner(owner.id).unwrap(), Some(owner));
}

#[test]
fn test_dropped_unit_rolls_back() {
    let mut db = Database::open_in_memory().unwrap();

    let owner = {
        let uow = db.unit_of_work().unwrap();
        uow.create_owner(NewOwner::new("1", "Ana")).unwrap()
    };

    let uow = db.unit_of_work().unwrap();
    assert!(uow.get_owner(owner.id).unwrap().is_none());
}

#[test]
fn test_explicit_rollback_discards_update() {
    let mut db = Database::open_in_memory().unwrap();

    let uow = db.unit_of_work().unwrap();
    let owner = uow.create_owner(NewOwner::new("1", "Ana")).unwrap();
    uow.commit().unwrap();

    let uow = db.unit_of_work().unwrap();
    let patch = OwnerPatch {
        name: Some("Changed".into()),
        ..Default::default()
    };
    uow.update_owner(owner.clone(), patch).unwrap();
    uow.rollback().unwrap();

    let uow = db.unit_of_work().unwrap();
    assert_eq!(uow.get_owner(owner.id).unwrap().unwrap().name, "Ana");
}

#[test]
fn test_reopening_file_store_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");

    {
        let mut db = Database::open(&path).unwrap();
        let uow = db.unit_of_work().unwrap();
        uow.create_veterinarian(NewVeterinarian::new("Dr. Smith", "MP-1"))
            .unwrap();
        uow.commit().unwrap();
    }

    let mut db = Database::open(&path).unwrap();
    db.ensure_schema().unwrap();
    assert_eq!(db.table_names().unwrap().len(), TABLES.len());

    let uow = db.unit_of_work().unwrap();
    assert_eq!(uow.list_veterinarians().unwrap().len(), 1);
}

#[test]
fn test_open_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("records.db");
    let config_path = dir.path().join("store.toml");
    fs::write(
        &config_path,
        format!(
            "path = {:?}\njournal_mode = \"delete\"\nbusy_timeout_ms = 250\n",
            db_path.display().to_string()
        ),
    )
    .unwrap();

    let config = StoreConfig::from_file(&config_path).unwrap();
    assert_eq!(config.journal_mode, JournalMode::Delete);

    let db = Database::from_config_file(&config_path).unwrap();
    assert_eq!(db.table_names().unwrap().len(), TABLES.len());
    assert!(db_path.exists());
}

#[test]
fn test_missing_config_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Database::from_config_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(DbError::Config(_))));
}
