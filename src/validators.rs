//! Pure input validation with user-facing Spanish messages.
//!
//! Validators never touch storage themselves; the appointment validator takes
//! the availability engine and the reference date from the caller so every
//! function stays deterministic under test.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::models::appointment::time_hhmm;
use crate::scheduling::AvailabilityEngine;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// Outcome of a validation pass: valid iff no errors accumulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Password verdict: validity gates, strength advises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCheck {
    pub valid: bool,
    pub strength: PasswordStrength,
    pub errors: Vec<String>,
}

/// One "{label} es requerido" error per empty field, in input order.
pub fn validate_required(fields: &[(&str, &str)]) -> ValidationResult {
    let errors = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| format!("{label} es requerido"))
        .collect();
    ValidationResult::from_errors(errors)
}

pub fn validate_login(username: &str, password: &str) -> ValidationResult {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push("Usuario es requerido".into());
    }
    if password.is_empty() {
        errors.push("Contraseña es requerida".into());
    }
    ValidationResult::from_errors(errors)
}

pub fn validate_registration(
    username: &str,
    password: &str,
    name: &str,
    email: &str,
) -> ValidationResult {
    let mut errors = Vec::new();
    if username.trim().is_empty() {
        errors.push("Usuario es requerido".into());
    } else if username.len() < 3 {
        errors.push("Usuario debe tener al menos 3 caracteres".into());
    }
    if password.is_empty() {
        errors.push("Contraseña es requerida".into());
    } else if password.len() < 6 {
        errors.push("Contraseña debe tener al menos 6 caracteres".into());
    }
    if name.trim().is_empty() {
        errors.push("Nombre es requerido".into());
    }
    if email.trim().is_empty() {
        errors.push("Email es requerido".into());
    } else if !EMAIL_RE.is_match(email) {
        errors.push("Email inválido".into());
    }
    ValidationResult::from_errors(errors)
}

pub fn validate_username(username: &str) -> ValidationResult {
    let mut errors = Vec::new();
    if username.len() < 3 {
        errors.push("Usuario debe tener mínimo 3 caracteres".into());
    }
    if !USERNAME_RE.is_match(username) {
        errors.push("Usuario solo puede contener letras, números, guiones o guion bajo".into());
    }
    ValidationResult::from_errors(errors)
}

/// Length plus character-class checks; strength is advisory and independent
/// of validity. Length ≥ 8 grades medium; uppercase plus digit plus symbol
/// grades strong at any accepted length.
pub fn validate_password(password: &str) -> PasswordCheck {
    let mut errors = Vec::new();
    let mut strength = PasswordStrength::Weak;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| "!@#$%^&*".contains(c));

    if password.len() < 6 {
        errors.push("Mínimo 6 caracteres".into());
    } else if password.len() >= 8 {
        strength = PasswordStrength::Medium;
    }
    if !has_upper {
        errors.push("Debe contener mayúsculas".into());
    } else if has_digit && has_symbol {
        strength = PasswordStrength::Strong;
    }
    if !has_digit {
        errors.push("Debe contener números".into());
    }

    PasswordCheck {
        valid: errors.is_empty(),
        strength,
        errors,
    }
}

/// Booking-form validation: field presence, format, past-date rejection and
/// the live slot check. `today` comes from the caller.
pub fn validate_appointment(
    engine: &AvailabilityEngine,
    doctor_id: &str,
    date: &str,
    time: &str,
    today: NaiveDate,
) -> ValidationResult {
    let mut errors = Vec::new();

    if doctor_id.trim().is_empty() {
        errors.push("Doctor es requerido".into());
    }

    let parsed_date = if date.trim().is_empty() {
        errors.push("Fecha es requerida".into());
        None
    } else {
        match date.parse::<NaiveDate>() {
            Ok(d) if d < today => {
                errors.push("Fecha no puede ser en el pasado".into());
                None
            }
            Ok(d) => Some(d),
            Err(_) => {
                errors.push("Fecha inválida".into());
                None
            }
        }
    };

    let parsed_time = if time.trim().is_empty() {
        errors.push("Hora es requerida".into());
        None
    } else {
        match NaiveTime::parse_from_str(time, time_hhmm::FORMAT) {
            Ok(t) => Some(t),
            Err(_) => {
                errors.push("Hora inválida".into());
                None
            }
        }
    };

    if let (true, Some(d), Some(t)) = (errors.is_empty(), parsed_date, parsed_time) {
        if !engine.is_slot_free(doctor_id, d, t) {
            errors.push("Este horario no está disponible".into());
        }
    }

    ValidationResult::from_errors(errors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Weekday;

    use super::*;
    use crate::booking::BookingEngine;
    use crate::models::{DayWindow, WeeklyTemplate};
    use crate::repository::{AppointmentRepository, AvailabilityRepository, UserRepository};
    use crate::storage::{MemoryBackend, Store};

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn engine_with_booking() -> (AvailabilityEngine, BookingEngine) {
        let store = Store::new(Arc::new(MemoryBackend::new()));
        let appointments = AppointmentRepository::new(store.clone());
        let engine = AvailabilityEngine::new(
            AvailabilityRepository::new(store.clone()),
            appointments.clone(),
            UserRepository::new(store),
        );
        (engine, BookingEngine::new(appointments))
    }

    #[test]
    fn required_fields_report_per_label() {
        let result = validate_required(&[("Usuario", ""), ("Nombre", "Juan")]);
        assert!(!result.valid);
        assert_eq!(result.errors, ["Usuario es requerido"]);

        assert!(validate_required(&[("Nombre", "Juan")]).valid);
    }

    #[test]
    fn login_validation() {
        let result = validate_login("", "");
        assert_eq!(
            result.errors,
            ["Usuario es requerido", "Contraseña es requerida"]
        );
        assert!(validate_login("juan", "patient123").valid);
    }

    #[test]
    fn registration_validation_accumulates() {
        let result = validate_registration("ab", "12345", "", "no-arroba");
        assert_eq!(
            result.errors,
            [
                "Usuario debe tener al menos 3 caracteres",
                "Contraseña debe tener al menos 6 caracteres",
                "Nombre es requerido",
                "Email inválido",
            ]
        );

        assert!(validate_registration("juan", "patient123", "Juan Pérez", "juan@email.com").valid);
    }

    #[test]
    fn username_charset_is_restricted() {
        assert!(validate_username("juan_perez-99").valid);

        let result = validate_username("ju an!");
        assert_eq!(
            result.errors,
            ["Usuario solo puede contener letras, números, guiones o guion bajo"]
        );

        let result = validate_username("ab");
        assert_eq!(result.errors, ["Usuario debe tener mínimo 3 caracteres"]);
    }

    #[test]
    fn password_strength_ladder() {
        let weak = validate_password("abc");
        assert!(!weak.valid);
        assert_eq!(weak.strength, PasswordStrength::Weak);
        assert_eq!(
            weak.errors,
            [
                "Mínimo 6 caracteres",
                "Debe contener mayúsculas",
                "Debe contener números",
            ]
        );

        let medium = validate_password("Abcdef12");
        assert!(medium.valid);
        assert_eq!(medium.strength, PasswordStrength::Medium);

        let strong = validate_password("Abcdef12!");
        assert!(strong.valid);
        assert_eq!(strong.strength, PasswordStrength::Strong);
    }

    #[test]
    fn password_strength_is_independent_of_length_threshold() {
        // Uppercase + digit + symbol grades strong even below 8 characters.
        let short_strong = validate_password("Abc12!");
        assert!(short_strong.valid);
        assert_eq!(short_strong.strength, PasswordStrength::Strong);

        // Length alone reaches medium; the missing uppercase still errors.
        let long_no_upper = validate_password("abcdefg1");
        assert!(!long_no_upper.valid);
        assert_eq!(long_no_upper.strength, PasswordStrength::Medium);
        assert_eq!(long_no_upper.errors, ["Debe contener mayúsculas"]);
    }

    #[test]
    fn appointment_requires_all_fields() {
        let (engine, _) = engine_with_booking();
        let today = "2025-02-17".parse().unwrap();
        let result = validate_appointment(&engine, "", "", "", today);
        assert_eq!(
            result.errors,
            [
                "Doctor es requerido",
                "Fecha es requerida",
                "Hora es requerida",
            ]
        );
    }

    #[test]
    fn appointment_rejects_past_dates_and_bad_formats() {
        let (engine, _) = engine_with_booking();
        let today = "2025-02-17".parse().unwrap();

        let past = validate_appointment(&engine, "doctor-001", "2025-02-10", "10:00", today);
        assert_eq!(past.errors, ["Fecha no puede ser en el pasado"]);

        let bad = validate_appointment(&engine, "doctor-001", "17/02/2025", "25:99", today);
        assert_eq!(bad.errors, ["Fecha inválida", "Hora inválida"]);
    }

    #[test]
    fn appointment_rejects_taken_slot() {
        let (engine, booking) = engine_with_booking();
        let today: NaiveDate = "2025-02-17".parse().unwrap();
        let mut template = WeeklyTemplate::default();
        template.set_window(Weekday::Mon, DayWindow::open(hm(9, 0), hm(12, 0)));
        engine.set_weekly_template("doctor-001", template);

        assert!(validate_appointment(&engine, "doctor-001", "2025-02-17", "10:00", today).valid);

        booking.create("patient-001", "doctor-001", today, hm(10, 0), "Consulta");
        let result = validate_appointment(&engine, "doctor-001", "2025-02-17", "10:00", today);
        assert_eq!(result.errors, ["Este horario no está disponible"]);

        // A different slot the same day is still bookable.
        assert!(validate_appointment(&engine, "doctor-001", "2025-02-17", "10:30", today).valid);
    }
}
