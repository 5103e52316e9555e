use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::NoteType;
use super::HasId;

/// Per-patient clinical record: one per patient, created lazily on first
/// access. Doctors read and write; the owning patient and admins read only
/// (enforced by the presentation layer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    pub id: String,
    pub patient_id: String,
    pub allergies: Vec<String>,
    pub chronic_diseases: Vec<String>,
    pub medications: Vec<String>,
    pub surgeries: Vec<String>,
    /// Free-text summary, doctor-authored.
    pub notes: String,
    #[serde(default)]
    pub medical_notes: Vec<MedicalNote>,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl HasId for MedicalHistory {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A dated note added by a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalNote {
    pub id: String,
    pub doctor_id: String,
    pub note: String,
    #[serde(rename = "type")]
    pub note_type: NoteType,
    pub created_at: DateTime<Utc>,
}
