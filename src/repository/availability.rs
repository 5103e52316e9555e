use chrono::Utc;

use crate::config;
use crate::ids;
use crate::models::{DoctorAvailability, WeeklyTemplate};
use crate::storage::Store;

/// CRUD over doctor availability records. At most one record per doctor:
/// writes go through `upsert_for_doctor`.
#[derive(Clone)]
pub struct AvailabilityRepository {
    store: Store,
}

impl AvailabilityRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn find_by_doctor(&self, doctor_id: &str) -> Option<DoctorAvailability> {
        self.store
            .filter_collection(config::DOCTOR_AVAILABILITY_KEY, |rec: &DoctorAvailability| {
                rec.doctor_id == doctor_id
            })
            .into_iter()
            .next()
    }

    /// Replaces the doctor's template, creating the record on first write.
    pub fn upsert_for_doctor(
        &self,
        doctor_id: &str,
        template: WeeklyTemplate,
    ) -> DoctorAvailability {
        let now = Utc::now();
        match self.find_by_doctor(doctor_id) {
            Some(existing) => self
                .store
                .update_in_collection(
                    config::DOCTOR_AVAILABILITY_KEY,
                    &existing.id,
                    |rec: &mut DoctorAvailability| {
                        rec.availability = template;
                        rec.updated_at = now;
                    },
                )
                .unwrap_or(existing),
            None => {
                let record = DoctorAvailability {
                    id: ids::generate_id("davail"),
                    doctor_id: doctor_id.into(),
                    availability: template,
                    updated_at: now,
                };
                self.store
                    .add_to_collection(config::DOCTOR_AVAILABILITY_KEY, &record);
                tracing::info!(doctor_id, "availability record created");
                record
            }
        }
    }

    pub fn get_by_id(&self, id: &str) -> Option<DoctorAvailability> {
        self.store
            .find_in_collection(config::DOCTOR_AVAILABILITY_KEY, id)
    }

    pub fn list(&self) -> Vec<DoctorAvailability> {
        self.store.get_collection(config::DOCTOR_AVAILABILITY_KEY)
    }

    pub fn delete(&self, id: &str) -> bool {
        self.store
            .remove_from_collection::<DoctorAvailability>(config::DOCTOR_AVAILABILITY_KEY, id)
    }
}
