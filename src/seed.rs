//! Default dataset written on first run.
//!
//! Each collection is seeded independently and only when its key is absent,
//! so a partially populated store keeps whatever it already has.

use chrono::{NaiveTime, Utc, Weekday};

use crate::config;
use crate::models::{
    Appointment, AppointmentStatus, DayWindow, DoctorAvailability, HistoryLog, Role, User,
    WeeklyTemplate,
};
use crate::storage::Store;

/// Seeds users, availability and appointments where missing.
pub fn initialize_defaults(store: &Store) {
    if !store.contains(config::USERS_KEY) {
        store.set_collection(config::USERS_KEY, &default_users());
        tracing::info!("default users seeded");
    }
    if !store.contains(config::DOCTOR_AVAILABILITY_KEY) {
        store.set_collection(config::DOCTOR_AVAILABILITY_KEY, &default_availability());
        tracing::info!("default availability seeded");
    }
    if !store.contains(config::APPOINTMENTS_KEY) {
        store.set_collection(config::APPOINTMENTS_KEY, &default_appointments());
        tracing::info!("default appointments seeded");
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid seed time")
}

fn user(id: &str, username: &str, password: &str, role: Role, name: &str, email: &str) -> User {
    User {
        id: id.into(),
        username: username.into(),
        password: password.into(),
        role,
        name: name.into(),
        email: email.into(),
        created_at: Utc::now(),
    }
}

fn default_users() -> Vec<User> {
    vec![
        user(
            "admin-001",
            "admin",
            "admin123",
            Role::Admin,
            "Administrador del Hospital",
            "admin@hospital.com",
        ),
        user(
            "doctor-001",
            "doctor1",
            "doctor123",
            Role::Doctor,
            "Dr. Carlos Rodríguez",
            "carlos@hospital.com",
        ),
        user(
            "doctor-002",
            "doctor2",
            "doctor123",
            Role::Doctor,
            "Dra. María García",
            "maria@hospital.com",
        ),
        user(
            "patient-001",
            "juan",
            "patient123",
            Role::Patient,
            "Juan Pérez",
            "juan@email.com",
        ),
        user(
            "patient-002",
            "ana",
            "patient123",
            Role::Patient,
            "Ana López",
            "ana@email.com",
        ),
    ]
}

fn template(windows: &[(Weekday, u32, u32)]) -> WeeklyTemplate {
    let mut template = WeeklyTemplate::default();
    for &(day, start_h, end_h) in windows {
        template.set_window(day, DayWindow::open(hm(start_h, 0), hm(end_h, 0)));
    }
    template
}

fn default_availability() -> Vec<DoctorAvailability> {
    vec![
        DoctorAvailability {
            id: "davail-001".into(),
            doctor_id: "doctor-001".into(),
            availability: template(&[
                (Weekday::Mon, 9, 17),
                (Weekday::Tue, 9, 17),
                (Weekday::Wed, 10, 16),
                (Weekday::Thu, 9, 17),
                (Weekday::Fri, 9, 14),
            ]),
            updated_at: Utc::now(),
        },
        DoctorAvailability {
            id: "davail-002".into(),
            doctor_id: "doctor-002".into(),
            availability: template(&[
                (Weekday::Mon, 10, 18),
                (Weekday::Wed, 10, 18),
                (Weekday::Thu, 10, 18),
                (Weekday::Fri, 10, 18),
                (Weekday::Sat, 9, 13),
            ]),
            updated_at: Utc::now(),
        },
    ]
}

fn appointment(
    id: &str,
    patient_id: &str,
    doctor_id: &str,
    date: &str,
    time: NaiveTime,
    reason: &str,
) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: id.into(),
        patient_id: patient_id.into(),
        doctor_id: doctor_id.into(),
        date: date.parse().expect("valid seed date"),
        time,
        reason: reason.into(),
        status: AppointmentStatus::Scheduled,
        notes: String::new(),
        created_at: now,
        updated_at: now,
        history: HistoryLog::default(),
    }
}

fn default_appointments() -> Vec<Appointment> {
    vec![
        appointment(
            "apt-001",
            "patient-001",
            "doctor-001",
            "2025-02-15",
            hm(10, 0),
            "Consulta general",
        ),
        appointment(
            "apt-002",
            "patient-002",
            "doctor-002",
            "2025-02-16",
            hm(14, 30),
            "Revisión de síntomas",
        ),
    ]
}
