//! Fixture seeding for an empty store.
//!
//! # Responsibility
//! - Populate a fresh database with the demo pipeline exactly once.
//!
//! # Invariants
//! - A store holding at least one contact is never touched.
//! - The emptiness check and all inserts share one immediate transaction,
//!   so two processes racing on a fresh file cannot both seed it.
//! - Each seeded contact gets exactly one activity.
//! - Backdating depends only on the contact name.

use crate::model::contact::{ContactDraft, ContactStatus};
use crate::repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
use crate::repo::contact_repo::{
    now_epoch_ms, ContactRepository, RepoResult, SqliteContactRepository,
};
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use std::time::Instant;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const SEED_PHONE: &str = "555-0100";

/// One fixture row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedContact {
    pub name: &'static str,
    pub email: &'static str,
    pub company: &'static str,
    pub status: ContactStatus,
    pub intel: &'static str,
}

pub const SEED_CONTACTS: &[SeedContact] = &[
    SeedContact {
        name: "Alice Johnson",
        email: "alice@techcorp.com",
        company: "TechCorp",
        status: ContactStatus::Lead,
        intel: "Expanding to Europe next Q.",
    },
    SeedContact {
        name: "Bob Smith",
        email: "bob@startups.inc",
        company: "Startups Inc",
        status: ContactStatus::Contacted,
        intel: "Considering competitor X due to pricing.",
    },
    SeedContact {
        name: "Charlie Brown",
        email: "charlie@enterprise.global",
        company: "Enterprise Global",
        status: ContactStatus::Proposal,
        intel: "Budget approval pending board meeting.",
    },
    SeedContact {
        name: "Diana Prince",
        email: "diana@amazonia.net",
        company: "Amazonia",
        status: ContactStatus::Closed,
        intel: "Long-term contract signed.",
    },
    SeedContact {
        name: "Evan Wright",
        email: "evan@logistics.co",
        company: "Logistics Co",
        status: ContactStatus::Lead,
        intel: "Looking for fleet management solutions.",
    },
    SeedContact {
        name: "Fiona Green",
        email: "fiona@ecofriendly.org",
        company: "EcoFriendly",
        status: ContactStatus::Contacted,
        intel: "Grant funding secured recently.",
    },
    SeedContact {
        name: "George King",
        email: "george@royal.ltd",
        company: "Royal Ltd",
        status: ContactStatus::Proposal,
        intel: "Competitor Y offering 20% discount.",
    },
    SeedContact {
        name: "Hannah White",
        email: "hannah@medical.care",
        company: "Medical Care",
        status: ContactStatus::Closed,
        intel: "Needs HIPAA compliance features.",
    },
    SeedContact {
        name: "Ian Black",
        email: "ian@construction.works",
        company: "Construction Works",
        status: ContactStatus::Lead,
        intel: "New project starting in downtown.",
    },
    SeedContact {
        name: "Jane Doe",
        email: "jane@unknown.net",
        company: "Unknown Net",
        status: ContactStatus::Contacted,
        intel: "Skeptical about cloud deployment.",
    },
];

/// Result of one seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Store already had contacts; nothing written.
    AlreadySeeded,
    /// Fixture rows were inserted.
    Seeded { contacts: usize },
}

/// Seeds the fixture set when the store has no contacts.
pub fn seed_if_empty(conn: &mut Connection) -> RepoResult<SeedOutcome> {
    seed_if_empty_at(conn, now_epoch_ms())
}

/// Same as `seed_if_empty`, with an explicit "now" in epoch milliseconds.
pub fn seed_if_empty_at(conn: &mut Connection, now_ms: i64) -> RepoResult<SeedOutcome> {
    let started_at = Instant::now();
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let outcome = {
        let contacts = SqliteContactRepository::try_new(&tx)?;
        let activities = SqliteActivityRepository::try_new(&tx)?;

        if contacts.count_contacts()? > 0 {
            SeedOutcome::AlreadySeeded
        } else {
            info!("event=seed module=seed status=start");
            for seed in SEED_CONTACTS {
                let draft = ContactDraft::new(seed.name, seed.email, seed.company)
                    .with_phone(SEED_PHONE)
                    .with_status(seed.status.as_str())
                    .with_intel(seed.intel);
                let created_at = now_ms - backdate_days(seed.name) * DAY_MS;
                let contact = contacts.create_contact_at(&draft, created_at)?;
                activities.add_activity_at(
                    contact.id,
                    &initial_activity_description(seed.status.as_str()),
                    now_ms,
                )?;
            }
            SeedOutcome::Seeded {
                contacts: SEED_CONTACTS.len(),
            }
        }
    };

    tx.commit()?;

    match outcome {
        SeedOutcome::AlreadySeeded => {
            info!("event=seed module=seed status=skipped reason=not_empty");
        }
        SeedOutcome::Seeded { contacts } => info!(
            "event=seed module=seed status=ok contacts={} duration_ms={}",
            contacts,
            started_at.elapsed().as_millis()
        ),
    }

    Ok(outcome)
}

/// Days a fixture contact is backdated by, in `1..=10`.
pub fn backdate_days(name: &str) -> i64 {
    // FNV-1a keeps the spread stable across runs and platforms.
    let hash = name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |acc, byte| {
        (acc ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    });
    (hash % 10) as i64 + 1
}

/// Text of the activity logged alongside each seeded contact.
pub fn initial_activity_description(status: &str) -> String {
    format!("Initial contact created via {status} campaign.")
}
