//! Core domain logic for the sales contact tracker.
//! This crate is the single source of truth for contact/activity persistence
//! and pipeline grouping rules.

pub mod config;
pub mod db;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::CrmConfig;
pub use lifecycle::{
    health_check, initialize_and_seed, initialize_and_seed_in_memory, HealthReport, StartupError,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityId};
pub use model::board::StatusBoard;
pub use model::contact::{Contact, ContactDraft, ContactId, ContactStatus, ContactValidationError};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::contact_repo::{
    ContactOrder, ContactRepository, RepoError, RepoResult, SqliteContactRepository,
};
pub use service::contact_service::{ContactDetail, ContactService, ContactServiceError};
pub use service::seed_service::{seed_if_empty, SeedOutcome, SEED_CONTACTS};

/// Minimal health-check API for smoke integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
