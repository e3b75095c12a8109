//! Kanban projection of contacts grouped by pipeline stage.
//!
//! # Invariants
//! - All four canonical columns always exist, possibly empty.
//! - Contacts with a non-canonical status are dropped, not bucketed.
//! - Column order follows input order.

use crate::model::contact::{Contact, ContactStatus};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Contacts bucketed by `ContactStatus`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    columns: [Vec<Contact>; 4],
}

impl StatusBoard {
    /// Buckets contacts in iteration order.
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut board = Self::default();
        for contact in contacts {
            if let Some(status) = contact.canonical_status() {
                board.columns[status.column()].push(contact);
            }
        }
        board
    }

    /// Returns one column.
    pub fn column(&self, status: ContactStatus) -> &[Contact] {
        &self.columns[status.column()]
    }

    /// Iterates columns in `ContactStatus::ALL` order.
    pub fn columns(&self) -> impl Iterator<Item = (ContactStatus, &[Contact])> {
        ContactStatus::ALL
            .into_iter()
            .map(move |status| (status, self.column(status)))
    }

    /// Number of contacts placed on the board.
    pub fn total(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }
}

// Serialized as `{"Lead": [...], "Contacted": [...], ...}` in column order.
impl Serialize for StatusBoard {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ContactStatus::ALL.len()))?;
        for (status, contacts) in self.columns() {
            map.serialize_entry(status.as_str(), contacts)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::StatusBoard;
    use crate::model::contact::{Contact, ContactStatus};

    fn contact(id: i64, status: &str) -> Contact {
        Contact {
            id,
            name: format!("c{id}"),
            email: format!("c{id}@example.com"),
            phone: None,
            company: "Acme".to_string(),
            status: status.to_string(),
            competitive_intel: None,
            created_at: 0,
        }
    }

    #[test]
    fn empty_board_has_four_empty_columns() {
        let board = StatusBoard::from_contacts(Vec::new());
        let columns: Vec<_> = board.columns().collect();
        assert_eq!(columns.len(), 4);
        assert!(columns.iter().all(|(_, contacts)| contacts.is_empty()));
    }

    #[test]
    fn unknown_status_is_silently_dropped() {
        let board = StatusBoard::from_contacts(vec![
            contact(1, "Lead"),
            contact(2, "Archived"),
            contact(3, "lead"),
            contact(4, "Closed"),
        ]);
        assert_eq!(board.total(), 2);
        assert_eq!(board.column(ContactStatus::Lead)[0].id, 1);
        assert_eq!(board.column(ContactStatus::Closed)[0].id, 4);
    }

    #[test]
    fn column_keeps_input_order() {
        let board = StatusBoard::from_contacts(vec![
            contact(5, "Proposal"),
            contact(2, "Proposal"),
            contact(9, "Proposal"),
        ]);
        let ids: Vec<_> = board
            .column(ContactStatus::Proposal)
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn serializes_as_ordered_status_map() {
        let board = StatusBoard::from_contacts(vec![contact(1, "Contacted")]);
        let json = serde_json::to_value(&board).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(json["Contacted"][0]["id"], 1);
        assert_eq!(json["Lead"].as_array().unwrap().len(), 0);
    }
}
