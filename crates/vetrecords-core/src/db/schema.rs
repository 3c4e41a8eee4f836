//! SQLite schema definition.

/// Complete database schema for the clinic records store.
///
/// Every statement is `IF NOT EXISTS`, so applying it to an already
/// initialized database is a no-op.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Owners
-- ============================================================================

CREATE TABLE IF NOT EXISTS owners (
    id INTEGER PRIMARY KEY,
    national_id TEXT NOT NULL,
    name TEXT NOT NULL,
    phone TEXT,
    email TEXT,
    address TEXT,
    active INTEGER NOT NULL DEFAULT 1
);

-- Unique among active owners only; a retired record keeps its ID for history
CREATE UNIQUE INDEX IF NOT EXISTS idx_owners_national_id_active
    ON owners(national_id) WHERE active = 1;
CREATE INDEX IF NOT EXISTS idx_owners_name ON owners(name);

-- ============================================================================
-- Pets
-- ============================================================================

CREATE TABLE IF NOT EXISTS pets (
    id INTEGER PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES owners(id),
    name TEXT NOT NULL,
    species TEXT NOT NULL,
    breed TEXT,
    sex TEXT,
    birth_date TEXT,                             -- YYYY-MM-DD
    active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_pets_owner ON pets(owner_id);
CREATE INDEX IF NOT EXISTS idx_pets_name ON pets(name);

-- ============================================================================
-- Veterinarians
-- ============================================================================

CREATE TABLE IF NOT EXISTS veterinarians (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    license_number TEXT NOT NULL,
    active INTEGER NOT NULL DEFAULT 1
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_veterinarians_license_active
    ON veterinarians(license_number) WHERE active = 1;
CREATE INDEX IF NOT EXISTS idx_veterinarians_name ON veterinarians(name);

-- ============================================================================
-- Visits
-- ============================================================================

CREATE TABLE IF NOT EXISTS visits (
    id INTEGER PRIMARY KEY,
    pet_id INTEGER NOT NULL REFERENCES pets(id),
    veterinarian_id INTEGER NOT NULL REFERENCES veterinarians(id),
    visited_at TEXT NOT NULL,
    reason TEXT NOT NULL,
    diagnosis TEXT,
    notes TEXT,
    active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_visits_pet ON visits(pet_id, visited_at);
CREATE INDEX IF NOT EXISTS idx_visits_veterinarian ON visits(veterinarian_id, visited_at);

-- ============================================================================
-- Clinical Files (metadata only; bytes live in the external file store)
-- ============================================================================

CREATE TABLE IF NOT EXISTS clinical_files (
    id INTEGER PRIMARY KEY,
    visit_id INTEGER NOT NULL REFERENCES visits(id),
    original_name TEXT NOT NULL,
    storage_path TEXT NOT NULL,
    kind TEXT NOT NULL CHECK (kind IN ('image', 'xray', 'study', 'lab', 'pdf')),
    uploaded_at TEXT NOT NULL,
    exists_flag INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_clinical_files_visit ON clinical_files(visit_id, uploaded_at);

-- ============================================================================
-- Treatments
-- ============================================================================

CREATE TABLE IF NOT EXISTS treatments (
    id INTEGER PRIMARY KEY,
    visit_id INTEGER NOT NULL REFERENCES visits(id),
    name TEXT NOT NULL,
    dosage TEXT NOT NULL,
    frequency TEXT,
    duration TEXT,
    notes TEXT,
    start_date TEXT NOT NULL,                    -- YYYY-MM-DD
    end_date TEXT,
    active INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_treatments_visit ON treatments(visit_id, start_date);
"#;

/// Tables created by [`SCHEMA`].
pub const TABLES: [&str; 6] = [
    "owners",
    "pets",
    "veterinarians",
    "visits",
    "clinical_files",
    "treatments",
];
