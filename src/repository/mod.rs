//! Typed CRUD wrappers over the store adapter.
//!
//! Repositories own the in-memory entity shape and identity generation.
//! "Not found" is an absent value or `false`, never an error; callers check.

pub mod appointments;
pub mod availability;
pub mod medical_history;
pub mod users;

pub use appointments::AppointmentRepository;
pub use availability::AvailabilityRepository;
pub use medical_history::MedicalHistoryRepository;
pub use users::{NewUser, UserRepository, UserStats};
