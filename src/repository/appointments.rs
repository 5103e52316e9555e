use chrono::NaiveDate;

use crate::config;
use crate::models::{Appointment, AppointmentStatus};
use crate::storage::Store;

/// Thin CRUD over the appointments collection. Lifecycle rules (status
/// transitions, history) live in `booking::BookingEngine`.
#[derive(Clone)]
pub struct AppointmentRepository {
    store: Store,
}

impl AppointmentRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Appends an already-built appointment record.
    pub fn insert(&self, appointment: &Appointment) -> bool {
        self.store
            .add_to_collection(config::APPOINTMENTS_KEY, appointment)
    }

    pub fn get_by_id(&self, id: &str) -> Option<Appointment> {
        self.store.find_in_collection(config::APPOINTMENTS_KEY, id)
    }

    pub fn list(&self) -> Vec<Appointment> {
        self.store.get_collection(config::APPOINTMENTS_KEY)
    }

    pub fn list_where(&self, predicate: impl Fn(&Appointment) -> bool) -> Vec<Appointment> {
        self.store
            .filter_collection(config::APPOINTMENTS_KEY, predicate)
    }

    pub fn by_patient(&self, patient_id: &str) -> Vec<Appointment> {
        self.list_where(|apt| apt.patient_id == patient_id)
    }

    pub fn by_doctor(&self, doctor_id: &str) -> Vec<Appointment> {
        self.list_where(|apt| apt.doctor_id == doctor_id)
    }

    pub fn by_status(&self, status: AppointmentStatus) -> Vec<Appointment> {
        self.list_where(|apt| apt.status == status)
    }

    pub fn by_doctor_and_date(&self, doctor_id: &str, date: NaiveDate) -> Vec<Appointment> {
        self.list_where(|apt| apt.doctor_id == doctor_id && apt.date == date)
    }

    /// Applies a patch; `None` when the id is unknown.
    pub fn update(&self, id: &str, patch: impl FnOnce(&mut Appointment)) -> Option<Appointment> {
        self.store
            .update_in_collection(config::APPOINTMENTS_KEY, id, patch)
    }

    /// Hard delete (admin maintenance only — the normal flow cancels).
    pub fn delete(&self, id: &str) -> bool {
        self.store
            .remove_from_collection::<Appointment>(config::APPOINTMENTS_KEY, id)
    }
}
