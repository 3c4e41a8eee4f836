//! Typed record identities.

use std::fmt;

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw row id.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw row id as stored.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                self.0.to_sql()
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                i64::column_result(value).map(Self)
            }
        }
    };
}

record_id!(
    /// Identity of an [`Owner`](super::Owner).
    OwnerId
);
record_id!(
    /// Identity of a [`Pet`](super::Pet).
    PetId
);
record_id!(
    /// Identity of a [`Veterinarian`](super::Veterinarian).
    VeterinarianId
);
record_id!(
    /// Identity of a [`Visit`](super::Visit).
    VisitId
);
record_id!(
    /// Identity of a [`Treatment`](super::Treatment).
    TreatmentId
);
record_id!(
    /// Identity of a [`ClinicalFile`](super::ClinicalFile).
    ClinicalFileId
);
