//! Domain model for the sales contact tracker.
//!
//! # Responsibility
//! - Define contact/activity records and the status board projection.
//!
//! # Invariants
//! - Contacts own their activities; activities never outlive a contact.
//! - Status text is stored verbatim; grouping recognizes only the canonical
//!   four stages.

pub mod activity;
pub mod board;
pub mod contact;
