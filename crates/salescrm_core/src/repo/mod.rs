//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for contacts and
//!   activities.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories borrow an explicitly opened connection; there is no global
//!   connection state.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Repositories never re-validate caller input.

pub mod activity_repo;
pub mod contact_repo;
