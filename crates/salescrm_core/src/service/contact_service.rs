//! Contact use-case service.
//!
//! # Responsibility
//! - Provide the board, list, detail, edit, activity and intel use-cases.
//! - Check required-field presence before delegating writes.
//!
//! # Invariants
//! - Updates are full replacements; omitted optional fields are cleared.
//! - `get_contact` always returns activities ordered oldest first.
//! - Status values are never normalized or rejected here.

use crate::model::activity::Activity;
use crate::model::board::StatusBoard;
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::contact_repo::{
    ContactRepository, RepoError, RepoResult, SqliteContactRepository,
};
use log::info;
use rusqlite::Connection;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ContactServiceError {
    /// A required input field is blank.
    MissingField(&'static str),
    /// Target contact does not exist.
    ContactNotFound(ContactId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ContactServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
            Self::ContactNotFound(id) => write!(f, "contact not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ContactServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ContactServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ContactNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ContactValidationError> for ContactServiceError {
    fn from(value: ContactValidationError) -> Self {
        match value {
            ContactValidationError::MissingField(field) => Self::MissingField(field),
        }
    }
}

/// Detail read model: one contact with its activity log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactDetail {
    pub contact: Contact,
    /// Ordered by `timestamp ASC, id ASC`.
    pub activities: Vec<Activity>,
}

/// Contact service facade over repository implementations.
pub struct ContactService<C: ContactRepository, A: ActivityRepository> {
    contacts: C,
    activities: A,
}

impl<'conn> ContactService<SqliteContactRepository<'conn>, SqliteActivityRepository<'conn>> {
    /// Builds a service over SQLite repositories sharing one connection.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteContactRepository::try_new(conn)?,
            SqliteActivityRepository::try_new(conn)?,
        ))
    }
}

impl<C: ContactRepository, A: ActivityRepository> ContactService<C, A> {
    pub fn new(contacts: C, activities: A) -> Self {
        Self {
            contacts,
            activities,
        }
    }

    /// Creates one contact after the required-field check.
    pub fn create_contact(&self, draft: &ContactDraft) -> Result<Contact, ContactServiceError> {
        draft.validate()?;
        let contact = self.contacts.create_contact(draft)?;
        info!(
            "event=contact_create module=service status=ok contact_id={}",
            contact.id
        );
        Ok(contact)
    }

    /// Loads one contact with its ordered activity log.
    pub fn get_contact(&self, id: ContactId) -> Result<ContactDetail, ContactServiceError> {
        let contact = self
            .contacts
            .get_contact(id)?
            .ok_or(ContactServiceError::ContactNotFound(id))?;
        let activities = self.activities.list_activities(id)?;
        Ok(ContactDetail {
            contact,
            activities,
        })
    }

    /// Lists contacts newest first.
    pub fn list_contacts(&self) -> Result<Vec<Contact>, ContactServiceError> {
        Ok(self.contacts.list_contacts_by_created_desc()?)
    }

    /// Lists contacts for the competitive intel report, by company.
    pub fn intel_report(&self) -> Result<Vec<Contact>, ContactServiceError> {
        Ok(self.contacts.list_contacts_by_company_asc()?)
    }

    /// Builds the kanban board.
    pub fn status_board(&self) -> Result<StatusBoard, ContactServiceError> {
        Ok(self.contacts.list_contacts_grouped_by_status()?)
    }

    /// Replaces every mutable field of one contact.
    pub fn update_contact(
        &self,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactServiceError> {
        draft.validate()?;
        let contact = self.contacts.update_contact(id, draft)?;
        info!("event=contact_update module=service status=ok contact_id={id}");
        Ok(contact)
    }

    /// Appends a free-text activity to one contact.
    pub fn add_activity(
        &self,
        contact_id: ContactId,
        description: &str,
    ) -> Result<Activity, ContactServiceError> {
        if description.trim().is_empty() {
            return Err(ContactServiceError::MissingField("description"));
        }
        let activity = self.activities.add_activity(contact_id, description)?;
        info!(
            "event=activity_add module=service status=ok contact_id={} activity_id={}",
            contact_id, activity.id
        );
        Ok(activity)
    }

    /// Deletes one contact and, through the store cascade, its activities.
    pub fn delete_contact(&self, id: ContactId) -> Result<(), ContactServiceError> {
        self.contacts.delete_contact(id)?;
        info!("event=contact_delete module=service status=ok contact_id={id}");
        Ok(())
    }
}
