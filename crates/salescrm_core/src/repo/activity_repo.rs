//! Activity repository contracts and SQLite implementation.
//!
//! # Invariants
//! - An activity is only written when its contact exists; the existence
//!   check and insert are one statement.
//! - Per-contact listing is `timestamp ASC, id ASC`.

use crate::model::activity::Activity;
use crate::model::contact::ContactId;
use crate::repo::contact_repo::{ensure_connection_ready, now_epoch_ms, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

const ACTIVITY_COLUMNS: &[&str] = &["id", "contact_id", "description", "timestamp"];

/// Repository interface for activity log operations.
pub trait ActivityRepository {
    /// Appends an activity stamped with the current time.
    fn add_activity(&self, contact_id: ContactId, description: &str) -> RepoResult<Activity> {
        self.add_activity_at(contact_id, description, now_epoch_ms())
    }
    /// Appends an activity with an explicit timestamp.
    ///
    /// Returns `RepoError::NotFound` without writing when the contact is absent.
    fn add_activity_at(
        &self,
        contact_id: ContactId,
        description: &str,
        timestamp: i64,
    ) -> RepoResult<Activity>;
    /// Lists activities of one contact, oldest first.
    fn list_activities(&self, contact_id: ContactId) -> RepoResult<Vec<Activity>>;
    fn count_activities(&self) -> RepoResult<u64>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "activities", ACTIVITY_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn add_activity_at(
        &self,
        contact_id: ContactId,
        description: &str,
        timestamp: i64,
    ) -> RepoResult<Activity> {
        let inserted = self.conn.execute(
            "INSERT INTO activities (contact_id, description, timestamp)
             SELECT id, ?2, ?3
             FROM contacts
             WHERE id = ?1;",
            params![contact_id, description, timestamp],
        )?;

        if inserted == 0 {
            return Err(RepoError::NotFound(contact_id));
        }

        Ok(Activity {
            id: self.conn.last_insert_rowid(),
            contact_id,
            description: description.to_string(),
            timestamp,
        })
    }

    fn list_activities(&self, contact_id: ContactId) -> RepoResult<Vec<Activity>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, contact_id, description, timestamp
             FROM activities
             WHERE contact_id = ?1
             ORDER BY timestamp ASC, id ASC;",
        )?;
        let activities = stmt
            .query_map([contact_id], parse_activity_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(activities)
    }

    fn count_activities(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM activities;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative activity count `{count}`")))
    }
}

fn parse_activity_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        contact_id: row.get("contact_id")?,
        description: row.get("description")?,
        timestamp: row.get("timestamp")?,
    })
}
