//! Clinical file attachment models.
//!
//! Only the metadata triple (name, path, kind) is recorded here. The bytes
//! live in an external file store.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lifecycle::soft_delete_flag;
use super::{ClinicalFileId, VisitId};

/// Type tag of a clinical attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Photograph or other image
    Image,
    /// Radiograph
    XRay,
    /// Imaging or diagnostic study
    Study,
    /// Laboratory result
    Lab,
    /// PDF document
    Pdf,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Image,
        FileKind::XRay,
        FileKind::Study,
        FileKind::Lab,
        FileKind::Pdf,
    ];

    /// Stored tag.
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::XRay => "xray",
            FileKind::Study => "study",
            FileKind::Lab => "lab",
            FileKind::Pdf => "pdf",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized file type tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown clinical file kind: {0}")]
pub struct UnknownFileKind(pub String);

impl FromStr for FileKind {
    type Err = UnknownFileKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownFileKind(s.to_string()))
    }
}

/// Metadata for a file attached to a visit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicalFile {
    /// Row identity
    pub id: ClinicalFileId,
    /// Visit the file is attached to
    pub visit_id: VisitId,
    /// Filename as uploaded
    pub original_name: String,
    /// Location in the external file store
    pub storage_path: String,
    /// Type tag
    pub kind: FileKind,
    /// Upload time
    pub uploaded_at: DateTime<Utc>,
    /// Existence flag (soft delete)
    pub exists: bool,
}

soft_delete_flag!(ClinicalFile, exists);

/// Fields accepted when recording a new attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewClinicalFile {
    pub visit_id: VisitId,
    pub original_name: String,
    pub storage_path: String,
    pub kind: FileKind,
}

impl NewClinicalFile {
    pub fn new(
        visit_id: VisitId,
        original_name: impl Into<String>,
        storage_path: impl Into<String>,
        kind: FileKind,
    ) -> Self {
        Self {
            visit_id,
            original_name: original_name.into(),
            storage_path: storage_path.into(),
            kind,
        }
    }
}
