//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/full-replace/delete APIs over `contacts`.
//! - Own list ordering and status grouping queries.
//!
//! # Invariants
//! - Write paths store field values verbatim; no status normalization.
//! - `created_at` is written once by `create_contact*` and never updated.
//! - Every ordered scan has an `id ASC` tie-breaker so repeated reads of
//!   unchanged data are identical.
//! - Deleting a contact relies on the `ON DELETE CASCADE` foreign key.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::board::StatusBoard;
use crate::model::contact::{Contact, ContactDraft, ContactId};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    phone,
    company,
    status,
    competitive_intel,
    created_at
FROM contacts";

const CONTACT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "phone",
    "company",
    "status",
    "competitive_intel",
    "created_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact/activity persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite failure.
    Db(DbError),
    /// Target contact does not exist.
    NotFound(ContactId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Scan order for contact lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactOrder {
    /// Insertion order (`id ASC`).
    #[default]
    Inserted,
    /// Newest first; ties keep insertion order.
    CreatedDesc,
    /// Company name ascending; ties keep insertion order.
    CompanyAsc,
}

impl ContactOrder {
    fn order_by_sql(self) -> &'static str {
        match self {
            Self::Inserted => "ORDER BY id ASC",
            Self::CreatedDesc => "ORDER BY created_at DESC, id ASC",
            Self::CompanyAsc => "ORDER BY company ASC, id ASC",
        }
    }
}

/// Repository interface for contact operations.
pub trait ContactRepository {
    /// Inserts a contact stamped with the current time.
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<Contact> {
        self.create_contact_at(draft, now_epoch_ms())
    }
    /// Inserts a contact with an explicit creation timestamp.
    fn create_contact_at(&self, draft: &ContactDraft, created_at: i64) -> RepoResult<Contact>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn list_contacts(&self, order: ContactOrder) -> RepoResult<Vec<Contact>>;
    /// Replaces every mutable field and returns the refreshed record.
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact>;
    /// Deletes one contact together with its activities.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    fn count_contacts(&self) -> RepoResult<u64>;

    fn list_contacts_by_created_desc(&self) -> RepoResult<Vec<Contact>> {
        self.list_contacts(ContactOrder::CreatedDesc)
    }

    fn list_contacts_by_company_asc(&self) -> RepoResult<Vec<Contact>> {
        self.list_contacts(ContactOrder::CompanyAsc)
    }

    /// Groups all contacts into the four canonical status columns.
    fn list_contacts_grouped_by_status(&self) -> RepoResult<StatusBoard> {
        Ok(StatusBoard::from_contacts(
            self.list_contacts(ContactOrder::Inserted)?,
        ))
    }
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "contacts", CONTACT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact_at(&self, draft: &ContactDraft, created_at: i64) -> RepoResult<Contact> {
        self.conn.execute(
            "INSERT INTO contacts (
                name,
                email,
                phone,
                company,
                status,
                competitive_intel,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                draft.name.as_str(),
                draft.email.as_str(),
                draft.phone.as_deref(),
                draft.company.as_str(),
                draft.status.as_str(),
                draft.competitive_intel.as_deref(),
                created_at,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        self.get_contact(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("created contact {id} missing in read-back"))
        })
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let contact = self
            .conn
            .query_row(
                &format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_contact_row,
            )
            .optional()?;
        Ok(contact)
    }

    fn list_contacts(&self, order: ContactOrder) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} {};", order.order_by_sql()))?;
        let contacts = stmt
            .query_map([], parse_contact_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<Contact> {
        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?2,
                email = ?3,
                phone = ?4,
                company = ?5,
                status = ?6,
                competitive_intel = ?7
             WHERE id = ?1;",
            params![
                id,
                draft.name.as_str(),
                draft.email.as_str(),
                draft.phone.as_deref(),
                draft.company.as_str(),
                draft.status.as_str(),
                draft.competitive_intel.as_deref(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_contact(id)?.ok_or(RepoError::NotFound(id))
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_contacts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative contact count `{count}`")))
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

fn parse_contact_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company: row.get("company")?,
        status: row.get("status")?,
        competitive_intel: row.get("competitive_intel")?,
        created_at: row.get("created_at")?,
    })
}

/// Verifies schema version, table and columns before a repository is built.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    table: &'static str,
    columns: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, table)? {
        return Err(RepoError::MissingRequiredTable(table));
    }

    for &column in columns {
        if !table_has_column(conn, table, column)? {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
