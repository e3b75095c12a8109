//! Activity log entry model.
//!
//! # Invariants
//! - Every activity belongs to exactly one existing contact.
//! - Activities are immutable once written; they disappear only when the
//!   owning contact is deleted.

use crate::model::contact::ContactId;
use serde::{Deserialize, Serialize};

/// Storage-assigned activity identifier.
pub type ActivityId = i64;

/// Timestamped free-text note attached to a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub contact_id: ContactId,
    pub description: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}
