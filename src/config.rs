use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Citamed";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Namespace prefix applied to every persisted key.
pub const STORAGE_PREFIX: &str = "hospital_";

/// Persisted collection keys (before prefixing).
pub const USERS_KEY: &str = "users";
pub const APPOINTMENTS_KEY: &str = "appointments";
pub const DOCTOR_AVAILABILITY_KEY: &str = "doctor_availability";
pub const MEDICAL_HISTORIES_KEY: &str = "medical_histories";

/// Key of the ephemeral session slot holding the authenticated user.
pub const SESSION_KEY: &str = "current_user";

/// Get the application data directory
/// ~/Citamed/ on all platforms (user-visible)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Citamed")
}

/// Get the directory backing the persistent collections
pub fn collections_dir() -> PathBuf {
    app_data_dir().join("collections")
}
