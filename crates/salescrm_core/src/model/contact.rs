//! Contact domain model.
//!
//! # Responsibility
//! - Define the sales contact record and its pipeline status vocabulary.
//! - Provide the write-side draft shape used by create/full-replace updates.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused.
//! - `created_at` is set once at insert time and never rewritten.
//! - `status` is stored verbatim; only the four `ContactStatus` values are
//!   recognized by the status board.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned contact identifier (SQLite rowid).
pub type ContactId = i64;

/// Canonical pipeline stage of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ContactStatus {
    /// Prospect not yet reached.
    #[default]
    Lead,
    /// First conversation happened.
    Contacted,
    /// Proposal sent and pending.
    Proposal,
    /// Deal closed.
    Closed,
}

impl ContactStatus {
    /// All canonical stages in board column order.
    pub const ALL: [ContactStatus; 4] = [
        ContactStatus::Lead,
        ContactStatus::Contacted,
        ContactStatus::Proposal,
        ContactStatus::Closed,
    ];

    /// Returns the persisted text form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Contacted => "Contacted",
            Self::Proposal => "Proposal",
            Self::Closed => "Closed",
        }
    }

    /// Parses persisted text. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Lead" => Some(Self::Lead),
            "Contacted" => Some(Self::Contacted),
            "Proposal" => Some(Self::Proposal),
            "Closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub(crate) fn column(self) -> usize {
        match self {
            Self::Lead => 0,
            Self::Contacted => 1,
            Self::Proposal => 2,
            Self::Closed => 3,
        }
    }
}

impl Display for ContactStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: String,
    /// Raw status text. See `Contact::canonical_status`.
    pub status: String,
    pub competitive_intel: Option<String>,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Contact {
    /// Returns the recognized pipeline stage, or `None` for free-form values.
    pub fn canonical_status(&self) -> Option<ContactStatus> {
        ContactStatus::parse(&self.status)
    }

    /// Returns the mutable fields of this record as a draft.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            company: self.company.clone(),
            status: self.status.clone(),
            competitive_intel: self.competitive_intel.clone(),
        }
    }
}

/// Full set of caller-supplied contact fields.
///
/// Used for both create and update. Updates replace every field, so a `None`
/// here clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: String,
    pub status: String,
    pub competitive_intel: Option<String>,
}

impl ContactDraft {
    /// Creates a draft with status `Lead` and no optional fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: None,
            company: company.into(),
            status: ContactStatus::default().as_str().to_string(),
            competitive_intel: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn with_intel(mut self, intel: impl Into<String>) -> Self {
        self.competitive_intel = Some(intel.into());
        self
    }

    /// Checks required-field presence.
    ///
    /// Only blank `name`, `email` or `status` is rejected; status values
    /// outside `ContactStatus` are accepted.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("status", &self.status),
        ] {
            if value.trim().is_empty() {
                return Err(ContactValidationError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// Required-field check failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    MissingField(&'static str),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "required field `{field}` is missing"),
        }
    }
}

impl Error for ContactValidationError {}
