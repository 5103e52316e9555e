//! Citamed — local-first hospital appointment engine.
//!
//! Role-based users (admin/doctor/patient), per-doctor weekly availability
//! templates, 30-minute bookable slots, an appointment lifecycle with an
//! append-only history log, and per-patient medical histories — all persisted
//! in a namespaced JSON key-value store. Presentation is an external
//! collaborator: every operation takes plain data and returns plain data,
//! with "not found" as an absent value rather than an error.

pub mod auth;
pub mod booking; // appointment lifecycle state machine
pub mod config;
pub mod ids;
pub mod models;
pub mod repository;
pub mod scheduling; // availability engine: weekly template -> bookable slots
pub mod seed;
pub mod session;
pub mod storage;
pub mod system;
pub mod validators;
