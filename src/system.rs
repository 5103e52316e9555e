//! Composition root wiring one backend into every component.
//!
//! A `HospitalSystem` owns one `Store` and hands out repositories and
//! engines that all share it; the session lives in its own ephemeral slot.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::booking::BookingEngine;
use crate::config;
use crate::repository::{
    AppointmentRepository, AvailabilityRepository, MedicalHistoryRepository, UserRepository,
};
use crate::scheduling::AvailabilityEngine;
use crate::seed;
use crate::session::SessionStore;
use crate::storage::{FileBackend, MemoryBackend, StorageError, StoragePort, Store};

pub struct HospitalSystem {
    pub store: Store,
    pub users: UserRepository,
    pub appointments: AppointmentRepository,
    pub availability: AvailabilityRepository,
    pub histories: MedicalHistoryRepository,
    pub scheduling: AvailabilityEngine,
    pub booking: BookingEngine,
    pub auth: AuthService,
    pub session: SessionStore,
}

impl HospitalSystem {
    pub fn new(backend: Arc<dyn StoragePort>) -> Self {
        let store = Store::new(backend);
        let users = UserRepository::new(store.clone());
        let appointments = AppointmentRepository::new(store.clone());
        let availability = AvailabilityRepository::new(store.clone());
        let histories = MedicalHistoryRepository::new(store.clone());
        let scheduling = AvailabilityEngine::new(
            availability.clone(),
            appointments.clone(),
            users.clone(),
        );
        let booking = BookingEngine::new(appointments.clone());
        let session = SessionStore::new();
        let auth = AuthService::new(users.clone(), session.clone());
        Self {
            store,
            users,
            appointments,
            availability,
            histories,
            scheduling,
            booking,
            auth,
            session,
        }
    }

    /// Fully in-memory system; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// System persisted under the per-user data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        let backend = FileBackend::open(config::collections_dir())?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// Writes the default dataset for any collection not yet present.
    pub fn initialize_defaults(&self) {
        seed::initialize_defaults(&self.store);
    }
}
