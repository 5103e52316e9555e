//! Slot computation over weekly availability templates.
//!
//! Slots are fixed 30-minute steps inside a doctor's per-weekday window.
//! A slot is free unless a non-cancelled appointment for that doctor holds
//! the exact same date and start time.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::models::{AppointmentStatus, DoctorAvailability, Role, User, WeeklyTemplate};
use crate::repository::{AppointmentRepository, AvailabilityRepository, UserRepository};

pub const SLOT_MINUTES: i64 = 30;

/// Per-doctor summary for admin listings.
#[derive(Debug, Clone)]
pub struct DoctorOverview {
    pub doctor: User,
    pub availability: Option<DoctorAvailability>,
    pub appointment_count: usize,
    pub completed_count: usize,
}

/// Answers "when can this doctor be booked": template management, slot
/// enumeration and single-slot checks.
#[derive(Clone)]
pub struct AvailabilityEngine {
    availability: AvailabilityRepository,
    appointments: AppointmentRepository,
    users: UserRepository,
}

impl AvailabilityEngine {
    pub fn new(
        availability: AvailabilityRepository,
        appointments: AppointmentRepository,
        users: UserRepository,
    ) -> Self {
        Self {
            availability,
            appointments,
            users,
        }
    }

    /// Replaces the doctor's weekly template. Windows are stored as given;
    /// an inverted window simply yields no slots.
    pub fn set_weekly_template(&self, doctor_id: &str, template: WeeklyTemplate) -> DoctorAvailability {
        self.availability.upsert_for_doctor(doctor_id, template)
    }

    pub fn weekly_template(&self, doctor_id: &str) -> Option<WeeklyTemplate> {
        self.availability
            .find_by_doctor(doctor_id)
            .map(|record| record.availability)
    }

    /// Free 30-minute slot starts for the doctor on `date`, ascending.
    /// Empty when the doctor has no template or the weekday is closed.
    pub fn compute_slots(&self, doctor_id: &str, date: NaiveDate) -> Vec<NaiveTime> {
        let Some(template) = self.weekly_template(doctor_id) else {
            return Vec::new();
        };
        let Some((start, end)) = template.window_for(date.weekday()) else {
            return Vec::new();
        };

        let mut slots = Vec::new();
        let mut current = start;
        while current < end {
            if self.is_slot_free(doctor_id, date, current) {
                slots.push(current);
            }
            let (next, wrapped) = current.overflowing_add_signed(Duration::minutes(SLOT_MINUTES));
            if wrapped != 0 {
                // Past midnight; a window never crosses a day boundary.
                break;
            }
            current = next;
        }
        slots
    }

    /// Whether no active appointment occupies the doctor's slot. Cancelled
    /// appointments free their slot; completed ones keep holding it.
    pub fn is_slot_free(&self, doctor_id: &str, date: NaiveDate, time: NaiveTime) -> bool {
        !self
            .appointments
            .by_doctor_and_date(doctor_id, date)
            .iter()
            .any(|apt| apt.time == time && apt.status != AppointmentStatus::Cancelled)
    }

    /// Doctors with at least one free slot on `date`.
    pub fn available_doctors(&self, date: NaiveDate) -> Vec<User> {
        self.users
            .by_role(Role::Doctor)
            .into_iter()
            .filter(|doctor| !self.compute_slots(&doctor.id, date).is_empty())
            .collect()
    }

    pub fn doctor_overview(&self, doctor_id: &str) -> Option<DoctorOverview> {
        let doctor = self.users.get_by_id(doctor_id)?;
        let appointments = self.appointments.by_doctor(doctor_id);
        let completed_count = appointments
            .iter()
            .filter(|apt| apt.status == AppointmentStatus::Completed)
            .count();
        Some(DoctorOverview {
            doctor,
            availability: self.availability.find_by_doctor(doctor_id),
            appointment_count: appointments.len(),
            completed_count,
        })
    }
}
