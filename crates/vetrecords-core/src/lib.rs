//! Vet Records Core Library
//!
//! Persistence layer for a veterinary clinic: owners, pets, veterinarians,
//! visits, treatments and clinical file attachments.
//!
//! # Architecture
//!
//! ```text
//!   Owner ──< Pet ──< Visit >── Veterinarian
//!                       │
//!              ┌────────┴────────┐
//!              ▼                 ▼
//!         ClinicalFile       Treatment
//! ```
//!
//! Records are never physically deleted. Each one carries an active flag
//! and every lookup and listing filters on it.
//!
//! # Unit of work
//!
//! ```
//! use vetrecords_core::{Database, models::{NewOwner, NewPet}};
//!
//! let mut db = Database::open_in_memory()?;
//! let uow = db.unit_of_work()?;
//! let owner = uow.create_owner(NewOwner::new("30111222", "Ana Perez"))?;
//! uow.create_pet(NewPet::new(owner.id, "Max", "canine"))?;
//! uow.commit()?;
//! # Ok::<(), vetrecords_core::DbError>(())
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite storage handle, unit of work and per-entity access
//! - [`models`]: Record types, creation inputs and partial-update patches
//! - [`domain`]: Domain error taxonomy and relationship checks
//! - [`config`]: Store configuration

pub mod config;
pub mod db;
pub mod domain;
pub mod models;

// Re-export commonly used types
pub use config::StoreConfig;
pub use db::{Database, DbError, DbResult, UnitOfWork};
pub use domain::{DomainError, DomainErrorKind};
pub use models::{
    ClinicalFile, FileKind, Owner, Pet, RecordState, SoftDelete, Treatment, Veterinarian, Visit,
};
