//! Process startup hook and health probe.
//!
//! # Responsibility
//! - Open the store, apply schema and seed fixtures before serving.
//! - Report a cheap liveness/schema status for callers.

use crate::db::migrations::current_user_version;
use crate::db::{open_db, open_db_in_memory, DbError, DbResult};
use crate::repo::contact_repo::RepoError;
use crate::service::seed_service::{seed_if_empty, SeedOutcome};
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Startup failure.
#[derive(Debug)]
pub enum StartupError {
    /// Store could not be opened or migrated.
    Db(DbError),
    /// Seeding failed; nothing was committed.
    Seed(RepoError),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "database startup failed: {err}"),
            Self::Seed(err) => write!(f, "seeding failed: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Seed(err) => Some(err),
        }
    }
}

impl From<DbError> for StartupError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<RepoError> for StartupError {
    fn from(value: RepoError) -> Self {
        Self::Seed(value)
    }
}

/// Opens the database file, creates schema if absent and seeds once.
///
/// The returned connection is ready for repository use.
pub fn initialize_and_seed(
    path: impl AsRef<Path>,
) -> Result<(Connection, SeedOutcome), StartupError> {
    let mut conn = open_db(path)?;
    let outcome = seed_if_empty(&mut conn)?;
    Ok((conn, outcome))
}

/// In-memory variant of `initialize_and_seed`.
pub fn initialize_and_seed_in_memory() -> Result<(Connection, SeedOutcome), StartupError> {
    let mut conn = open_db_in_memory()?;
    let outcome = seed_if_empty(&mut conn)?;
    Ok((conn, outcome))
}

/// Health probe payload, serialized as `{"status":"ok","schema_version":N}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub schema_version: u32,
}

/// Checks that the connection answers queries.
pub fn health_check(conn: &Connection) -> DbResult<HealthReport> {
    let schema_version = current_user_version(conn)?;
    Ok(HealthReport {
        status: "ok",
        schema_version,
    })
}
