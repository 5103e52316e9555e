//! Appointment lifecycle: creation, patching, cancellation, completion.
//!
//! Every mutation appends one entry to the appointment's history log; the
//! log is append-only and never rewritten. Updates are deliberately
//! permissive: a terminal appointment can still be patched, only
//! `can_transition` reports whether a transition is advisable.

use chrono::{NaiveDate, NaiveTime, Utc};

use crate::ids;
use crate::models::appointment::time_hhmm;
use crate::models::{Appointment, AppointmentStatus, HistoryAction, HistoryEntry, HistoryLog};
use crate::repository::AppointmentRepository;

/// Counts per lifecycle state for dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub reason: Option<String>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct BookingEngine {
    appointments: AppointmentRepository,
}

impl BookingEngine {
    pub fn new(appointments: AppointmentRepository) -> Self {
        Self { appointments }
    }

    /// Books an appointment in `scheduled` state with a `created` history
    /// entry. Slot availability is the caller's concern (validators check it
    /// at the boundary); booking itself never rejects.
    pub fn create(
        &self,
        patient_id: &str,
        doctor_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        reason: &str,
    ) -> Appointment {
        let now = Utc::now();
        let mut history = HistoryLog::default();
        history.append(HistoryEntry {
            timestamp: now,
            action: HistoryAction::Created,
            status: AppointmentStatus::Scheduled,
            details: format!(
                "Cita creada para el {} a las {}",
                date,
                time.format(time_hhmm::FORMAT)
            ),
        });
        let appointment = Appointment {
            id: ids::generate_id("apt"),
            patient_id: patient_id.into(),
            doctor_id: doctor_id.into(),
            date,
            time,
            reason: reason.into(),
            status: AppointmentStatus::Scheduled,
            notes: String::new(),
            created_at: now,
            updated_at: now,
            history,
        };
        self.appointments.insert(&appointment);
        tracing::info!(id = %appointment.id, doctor_id, %date, "appointment created");
        appointment
    }

    /// Applies `patch`, stamps `updated_at` and appends a history entry for
    /// `action`. `None` when the id is unknown. Terminal appointments are
    /// patched like any other.
    pub fn update(
        &self,
        id: &str,
        patch: AppointmentPatch,
        action: HistoryAction,
    ) -> Option<Appointment> {
        let action_name = action.as_str();
        let updated = self.appointments.update(id, |apt| {
            // Details describe the pre-patch appointment.
            let details = action_details(action, apt, patch.notes.as_deref());
            if let Some(date) = patch.date {
                apt.date = date;
            }
            if let Some(time) = patch.time {
                apt.time = time;
            }
            if let Some(reason) = patch.reason {
                apt.reason = reason;
            }
            if let Some(status) = patch.status {
                apt.status = status;
            }
            if let Some(notes) = patch.notes {
                apt.notes = notes;
            }
            apt.updated_at = Utc::now();
            apt.history.append(HistoryEntry {
                timestamp: apt.updated_at,
                action,
                status: apt.status,
                details,
            });
        })?;
        tracing::info!(id, action = action_name, status = updated.status.as_str(), "appointment updated");
        Some(updated)
    }

    pub fn cancel(&self, id: &str) -> Option<Appointment> {
        self.update(
            id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Cancelled),
                ..Default::default()
            },
            HistoryAction::Cancelled,
        )
    }

    pub fn complete(&self, id: &str, notes: &str) -> Option<Appointment> {
        self.update(
            id,
            AppointmentPatch {
                status: Some(AppointmentStatus::Completed),
                notes: Some(notes.into()),
                ..Default::default()
            },
            HistoryAction::Completed,
        )
    }

    /// Advisory check: `created` never applies to an existing appointment,
    /// and terminal states admit no further transition.
    pub fn can_transition(&self, appointment: &Appointment, action: HistoryAction) -> bool {
        match action {
            HistoryAction::Created => false,
            _ => !appointment.status.is_terminal(),
        }
    }

    /// History entries in append order; empty for unknown ids.
    pub fn history(&self, id: &str) -> Vec<HistoryEntry> {
        self.appointments
            .get_by_id(id)
            .map(|apt| apt.history.entries().to_vec())
            .unwrap_or_default()
    }

    pub fn count_by_status(&self) -> AppointmentStats {
        let mut stats = AppointmentStats::default();
        for appointment in self.appointments.list() {
            stats.total += 1;
            match appointment.status {
                AppointmentStatus::Scheduled => stats.scheduled += 1,
                AppointmentStatus::Completed => stats.completed += 1,
                AppointmentStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }
}

/// Spanish history detail line for `action`, built against the pre-patch
/// appointment.
fn action_details(action: HistoryAction, before: &Appointment, notes: Option<&str>) -> String {
    match action {
        HistoryAction::Created => format!(
            "Cita creada para el {} a las {}",
            before.date,
            before.time.format(time_hhmm::FORMAT)
        ),
        HistoryAction::Modified => format!(
            "Cita modificada de {} {}",
            before.date,
            before.time.format(time_hhmm::FORMAT)
        ),
        HistoryAction::Completed => match notes {
            Some(notes) if !notes.is_empty() => format!("Cita completada: {notes}"),
            _ => "Cita completada".into(),
        },
        HistoryAction::Cancelled => "Cita cancelada".into(),
        HistoryAction::Updated => "Cita actualizada".into(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::{MemoryBackend, Store};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn engine() -> BookingEngine {
        let store = Store::new(Arc::new(MemoryBackend::new()));
        BookingEngine::new(AppointmentRepository::new(store))
    }

    fn book(engine: &BookingEngine) -> Appointment {
        engine.create(
            "patient-001",
            "doctor-001",
            "2025-02-17".parse().unwrap(),
            hm(10, 0),
            "Consulta general",
        )
    }

    #[test]
    fn create_starts_scheduled_with_created_entry() {
        let engine = engine();
        let apt = book(&engine);
        assert_eq!(apt.status, AppointmentStatus::Scheduled);
        assert_eq!(apt.history.len(), 1);

        let entry = apt.history.last().unwrap();
        assert_eq!(entry.action, HistoryAction::Created);
        assert_eq!(entry.details, "Cita creada para el 2025-02-17 a las 10:00");
    }

    #[test]
    fn every_update_appends_exactly_one_entry() {
        let engine = engine();
        let apt = book(&engine);

        let updated = engine
            .update(
                &apt.id,
                AppointmentPatch {
                    reason: Some("Control".into()),
                    ..Default::default()
                },
                HistoryAction::Updated,
            )
            .unwrap();
        assert_eq!(updated.history.len(), 2);
        assert_eq!(updated.reason, "Control");

        let cancelled = engine.cancel(&apt.id).unwrap();
        assert_eq!(cancelled.history.len(), 3);
        assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
        assert_eq!(cancelled.history.last().unwrap().details, "Cita cancelada");
    }

    #[test]
    fn modified_details_describe_previous_slot() {
        let engine = engine();
        let apt = book(&engine);

        let moved = engine
            .update(
                &apt.id,
                AppointmentPatch {
                    date: Some("2025-02-18".parse().unwrap()),
                    time: Some(hm(11, 30)),
                    ..Default::default()
                },
                HistoryAction::Modified,
            )
            .unwrap();
        assert_eq!(moved.date, "2025-02-18".parse().unwrap());
        assert_eq!(moved.time, hm(11, 30));
        assert_eq!(
            moved.history.last().unwrap().details,
            "Cita modificada de 2025-02-17 10:00"
        );
    }

    #[test]
    fn complete_records_notes_in_details() {
        let engine = engine();
        let apt = book(&engine);

        let done = engine.complete(&apt.id, "Paciente estable").unwrap();
        assert_eq!(done.status, AppointmentStatus::Completed);
        assert_eq!(done.notes, "Paciente estable");
        assert_eq!(
            done.history.last().unwrap().details,
            "Cita completada: Paciente estable"
        );

        let apt2 = book(&engine);
        let done2 = engine.complete(&apt2.id, "").unwrap();
        assert_eq!(done2.history.last().unwrap().details, "Cita completada");
    }

    #[test]
    fn terminal_appointments_still_accept_updates() {
        let engine = engine();
        let apt = book(&engine);
        engine.cancel(&apt.id).unwrap();

        let patched = engine
            .update(
                &apt.id,
                AppointmentPatch {
                    notes: Some("Reagendar".into()),
                    ..Default::default()
                },
                HistoryAction::Updated,
            )
            .unwrap();
        assert_eq!(patched.notes, "Reagendar");
        assert_eq!(patched.status, AppointmentStatus::Cancelled);
        assert_eq!(patched.history.len(), 3);
    }

    #[test]
    fn can_transition_is_advisory() {
        let engine = engine();
        let apt = book(&engine);
        assert!(engine.can_transition(&apt, HistoryAction::Cancelled));
        assert!(!engine.can_transition(&apt, HistoryAction::Created));

        let done = engine.complete(&apt.id, "").unwrap();
        assert!(!engine.can_transition(&done, HistoryAction::Updated));
    }

    #[test]
    fn unknown_id_yields_none_and_empty_history() {
        let engine = engine();
        assert!(engine.cancel("apt-missing").is_none());
        assert!(engine.history("apt-missing").is_empty());
    }

    #[test]
    fn count_by_status_totals_each_state() {
        let engine = engine();
        let a = book(&engine);
        let b = book(&engine);
        book(&engine);
        engine.cancel(&a.id).unwrap();
        engine.complete(&b.id, "").unwrap();

        let stats = engine.count_by_status();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.scheduled, 1);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.cancelled, 1);
    }
}
