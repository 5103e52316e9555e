use chrono::Utc;

use crate::config;
use crate::ids;
use crate::models::{MedicalHistory, MedicalNote, NoteType};
use crate::storage::Store;

/// CRUD over per-patient medical histories: one record per patient, created
/// lazily on first access via an explicit two-step get-or-create (not atomic,
/// acceptable under the single-writer model).
///
/// The four list fields (allergies, chronic diseases, medications,
/// surgeries) behave as ordered sets: adding an existing value is a no-op,
/// removing filters every exact-string occurrence.
#[derive(Clone)]
pub struct MedicalHistoryRepository {
    store: Store,
}

impl MedicalHistoryRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn find_by_patient(&self, patient_id: &str) -> Option<MedicalHistory> {
        self.store
            .filter_collection(config::MEDICAL_HISTORIES_KEY, |h: &MedicalHistory| {
                h.patient_id == patient_id
            })
            .into_iter()
            .next()
    }

    /// Creates an empty history for the patient. Callers use `get_or_create`;
    /// this path does not guard against duplicates.
    pub fn create_for_patient(&self, patient_id: &str) -> MedicalHistory {
        let now = Utc::now();
        let history = MedicalHistory {
            id: ids::generate_id("hist"),
            patient_id: patient_id.into(),
            allergies: Vec::new(),
            chronic_diseases: Vec::new(),
            medications: Vec::new(),
            surgeries: Vec::new(),
            notes: String::new(),
            medical_notes: Vec::new(),
            last_updated: now,
            created_at: now,
        };
        self.store
            .add_to_collection(config::MEDICAL_HISTORIES_KEY, &history);
        tracing::info!(patient_id, "medical history created");
        history
    }

    pub fn get_or_create(&self, patient_id: &str) -> MedicalHistory {
        match self.find_by_patient(patient_id) {
            Some(history) => history,
            None => self.create_for_patient(patient_id),
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<MedicalHistory> {
        self.store
            .find_in_collection(config::MEDICAL_HISTORIES_KEY, id)
    }

    pub fn list(&self) -> Vec<MedicalHistory> {
        self.store.get_collection(config::MEDICAL_HISTORIES_KEY)
    }

    pub fn delete(&self, id: &str) -> bool {
        self.store
            .remove_from_collection::<MedicalHistory>(config::MEDICAL_HISTORIES_KEY, id)
    }

    /// Applies a patch to the patient's history (creating it if absent) and
    /// stamps `last_updated`.
    pub fn update(
        &self,
        patient_id: &str,
        patch: impl FnOnce(&mut MedicalHistory),
    ) -> Option<MedicalHistory> {
        let history = self.get_or_create(patient_id);
        self.store.update_in_collection(
            config::MEDICAL_HISTORIES_KEY,
            &history.id,
            |h: &mut MedicalHistory| {
                patch(h);
                h.last_updated = Utc::now();
            },
        )
    }

    /// Replaces the free-text summary.
    pub fn update_notes(&self, patient_id: &str, notes: &str) -> Option<MedicalHistory> {
        self.update(patient_id, |h| h.notes = notes.to_string())
    }

    // ── Set-like list fields ─────────────────────────────────────────────

    pub fn add_allergy(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.add_unique(patient_id, value, |h| &mut h.allergies)
    }

    pub fn remove_allergy(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.remove_matching(patient_id, value, |h| &mut h.allergies)
    }

    pub fn add_chronic_disease(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.add_unique(patient_id, value, |h| &mut h.chronic_diseases)
    }

    pub fn remove_chronic_disease(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.remove_matching(patient_id, value, |h| &mut h.chronic_diseases)
    }

    pub fn add_medication(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.add_unique(patient_id, value, |h| &mut h.medications)
    }

    pub fn remove_medication(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.remove_matching(patient_id, value, |h| &mut h.medications)
    }

    pub fn add_surgery(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.add_unique(patient_id, value, |h| &mut h.surgeries)
    }

    pub fn remove_surgery(&self, patient_id: &str, value: &str) -> Option<MedicalHistory> {
        self.remove_matching(patient_id, value, |h| &mut h.surgeries)
    }

    /// Idempotent insert preserving insertion order.
    fn add_unique(
        &self,
        patient_id: &str,
        value: &str,
        field: impl Fn(&mut MedicalHistory) -> &mut Vec<String>,
    ) -> Option<MedicalHistory> {
        self.update(patient_id, |h| {
            let items = field(h);
            if !items.iter().any(|item| item == value) {
                items.push(value.to_string());
            }
        })
    }

    /// Removes every exact-string occurrence.
    fn remove_matching(
        &self,
        patient_id: &str,
        value: &str,
        field: impl Fn(&mut MedicalHistory) -> &mut Vec<String>,
    ) -> Option<MedicalHistory> {
        self.update(patient_id, |h| field(h).retain(|item| item != value))
    }

    // ── Doctor-authored notes ────────────────────────────────────────────

    pub fn add_medical_note(
        &self,
        patient_id: &str,
        doctor_id: &str,
        note: &str,
        note_type: NoteType,
    ) -> Option<MedicalHistory> {
        let entry = MedicalNote {
            id: ids::generate_id("note"),
            doctor_id: doctor_id.into(),
            note: note.into(),
            note_type,
            created_at: Utc::now(),
        };
        self.update(patient_id, |h| h.medical_notes.push(entry))
    }

    /// Notes in insertion order; empty when the patient has no history yet.
    pub fn medical_notes(&self, patient_id: &str) -> Vec<MedicalNote> {
        self.find_by_patient(patient_id)
            .map(|h| h.medical_notes)
            .unwrap_or_default()
    }

    pub fn remove_medical_note(&self, patient_id: &str, note_id: &str) -> Option<MedicalHistory> {
        self.update(patient_id, |h| {
            h.medical_notes.retain(|note| note.id != note_id)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::MemoryBackend;

    fn repo() -> MedicalHistoryRepository {
        MedicalHistoryRepository::new(Store::new(Arc::new(MemoryBackend::new())))
    }

    #[test]
    fn get_or_create_is_lazy_and_stable() {
        let repo = repo();
        assert!(repo.find_by_patient("patient-001").is_none());

        let first = repo.get_or_create("patient-001");
        let second = repo.get_or_create("patient-001");
        assert_eq!(first.id, second.id);
        assert_eq!(repo.list().len(), 1);
        assert!(first.allergies.is_empty());
    }

    #[test]
    fn add_allergy_is_idempotent() {
        let repo = repo();
        repo.add_allergy("patient-001", "maní").unwrap();
        let history = repo.add_allergy("patient-001", "maní").unwrap();
        assert_eq!(history.allergies, vec!["maní".to_string()]);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let repo = repo();
        repo.add_medication("patient-001", "ibuprofeno").unwrap();
        repo.add_medication("patient-001", "amoxicilina").unwrap();
        let history = repo.find_by_patient("patient-001").unwrap();
        assert_eq!(history.medications, ["ibuprofeno", "amoxicilina"]);
    }

    #[test]
    fn remove_filters_exact_matches() {
        let repo = repo();
        repo.add_chronic_disease("patient-001", "diabetes").unwrap();
        repo.add_chronic_disease("patient-001", "hipertensión").unwrap();

        let history = repo
            .remove_chronic_disease("patient-001", "diabetes")
            .unwrap();
        assert_eq!(history.chronic_diseases, ["hipertensión"]);

        // Removing an absent value changes nothing.
        let history = repo.remove_surgery("patient-001", "apendicectomía").unwrap();
        assert!(history.surgeries.is_empty());
    }

    #[test]
    fn update_stamps_last_updated() {
        let repo = repo();
        let created = repo.get_or_create("patient-001");
        let updated = repo.update_notes("patient-001", "Paciente estable").unwrap();
        assert_eq!(updated.notes, "Paciente estable");
        assert!(updated.last_updated >= created.last_updated);
    }

    #[test]
    fn medical_notes_lifecycle() {
        let repo = repo();
        repo.add_medical_note(
            "patient-001",
            "doctor-001",
            "Gripe estacional",
            NoteType::Diagnostico,
        )
        .unwrap();
        repo.add_medical_note(
            "patient-001",
            "doctor-001",
            "Reposo 48h",
            NoteType::Tratamiento,
        )
        .unwrap();

        let notes = repo.medical_notes("patient-001");
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].note_type, NoteType::Diagnostico);

        repo.remove_medical_note("patient-001", &notes[0].id).unwrap();
        let remaining = repo.medical_notes("patient-001");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].note, "Reposo 48h");
    }

    #[test]
    fn medical_notes_empty_without_history() {
        let repo = repo();
        assert!(repo.medical_notes("unknown").is_empty());
        // Reading notes must not create a history record.
        assert!(repo.find_by_patient("unknown").is_none());
    }
}
