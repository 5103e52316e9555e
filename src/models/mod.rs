//! Persisted entity shapes and their wire-format codecs.
//!
//! Field names serialize in camelCase and enum values keep the original
//! lowercase/Spanish strings, so a store written by this crate matches the
//! documented collection layout byte for byte.

pub mod appointment;
pub mod availability;
pub mod enums;
pub mod medical_history;
pub mod user;

pub use appointment::{Appointment, HistoryEntry, HistoryLog};
pub use availability::{DayWindow, DoctorAvailability, WeeklyTemplate};
pub use enums::{AppointmentStatus, HistoryAction, NoteType, Role};
pub use medical_history::{MedicalHistory, MedicalNote};
pub use user::User;

use thiserror::Error;

/// Failure to parse a persisted enum string.
#[derive(Debug, Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Entities addressable by string id inside a persisted collection.
pub trait HasId {
    fn id(&self) -> &str;
}
