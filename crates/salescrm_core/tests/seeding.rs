use std::sync::{Arc, Barrier};
use std::thread;

use salescrm_core::db::{open_db, open_db_in_memory};
use salescrm_core::service::seed_service::{
    backdate_days, initial_activity_description, seed_if_empty_at,
};
use salescrm_core::{
    initialize_and_seed, initialize_and_seed_in_memory, seed_if_empty, ActivityRepository,
    ContactDraft, ContactRepository, ContactService, ContactStatus, RepoError, SeedOutcome,
    SqliteActivityRepository, SqliteContactRepository, SEED_CONTACTS,
};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[test]
fn seeding_twice_yields_fixture_count() {
    let mut conn = open_db_in_memory().unwrap();

    let first = seed_if_empty(&mut conn).unwrap();
    let second = seed_if_empty(&mut conn).unwrap();

    assert_eq!(
        first,
        SeedOutcome::Seeded {
            contacts: SEED_CONTACTS.len()
        }
    );
    assert_eq!(second, SeedOutcome::AlreadySeeded);

    let contacts = SqliteContactRepository::try_new(&conn).unwrap();
    let activities = SqliteActivityRepository::try_new(&conn).unwrap();
    assert_eq!(contacts.count_contacts().unwrap(), 10);
    assert_eq!(activities.count_activities().unwrap(), 10);
}

#[test]
fn seeding_skips_store_with_existing_contact() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteContactRepository::try_new(&conn).unwrap();
        repo.create_contact(&ContactDraft::new("Solo", "solo@example.com", "Solo Co"))
            .unwrap();
    }

    assert_eq!(
        seed_if_empty(&mut conn).unwrap(),
        SeedOutcome::AlreadySeeded
    );
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count_contacts().unwrap(), 1);
}

#[test]
fn each_seeded_contact_has_one_status_activity() {
    let mut conn = open_db_in_memory().unwrap();
    seed_if_empty(&mut conn).unwrap();

    let contacts = SqliteContactRepository::try_new(&conn).unwrap();
    let activities = SqliteActivityRepository::try_new(&conn).unwrap();
    for contact in contacts.list_contacts_by_created_desc().unwrap() {
        let log = activities.list_activities(contact.id).unwrap();
        assert_eq!(log.len(), 1, "contact {}", contact.id);
        assert_eq!(
            log[0].description,
            initial_activity_description(&contact.status)
        );
        assert_eq!(contact.phone.as_deref(), Some("555-0100"));
        assert!(contact.competitive_intel.is_some());
    }
}

#[test]
fn seeded_timestamps_are_backdated_by_name() {
    let mut conn = open_db_in_memory().unwrap();
    let now_ms = 1_700_000_000_000;
    seed_if_empty_at(&mut conn, now_ms).unwrap();

    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let listed = repo.list_contacts_by_created_desc().unwrap();
    assert_eq!(listed.len(), SEED_CONTACTS.len());

    for contact in &listed {
        let expected = now_ms - backdate_days(&contact.name) * DAY_MS;
        assert_eq!(contact.created_at, expected, "{}", contact.name);
        assert!(contact.created_at <= now_ms - DAY_MS);
        assert!(contact.created_at >= now_ms - 10 * DAY_MS);
    }
    assert!(listed
        .windows(2)
        .all(|pair| pair[0].created_at > pair[1].created_at
            || (pair[0].created_at == pair[1].created_at && pair[0].id < pair[1].id)));
}

#[test]
fn seeded_board_matches_fixture_statuses() {
    let (conn, outcome) = initialize_and_seed_in_memory().unwrap();
    assert!(matches!(outcome, SeedOutcome::Seeded { contacts: 10 }));

    let service = ContactService::sqlite(&conn).unwrap();
    let board = service.status_board().unwrap();
    for status in ContactStatus::ALL {
        let expected = SEED_CONTACTS
            .iter()
            .filter(|seed| seed.status == status)
            .count();
        assert_eq!(board.column(status).len(), expected, "{status}");
    }
    assert_eq!(board.total(), 10);

    let companies: Vec<_> = service
        .intel_report()
        .unwrap()
        .into_iter()
        .map(|contact| contact.company)
        .collect();
    let mut sorted = companies.clone();
    sorted.sort();
    assert_eq!(companies, sorted);
    assert_eq!(companies[0], "Amazonia");
}

#[test]
fn initialize_and_seed_is_idempotent_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("crm.db");

    let (conn, first) = initialize_and_seed(&path).unwrap();
    assert!(matches!(first, SeedOutcome::Seeded { .. }));
    drop(conn);

    let (conn, second) = initialize_and_seed(&path).unwrap();
    assert_eq!(second, SeedOutcome::AlreadySeeded);
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count_contacts().unwrap(), 10);
}

#[test]
fn racing_first_runs_seed_only_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crm.db");

    // Both connections are migrated before the race starts.
    let connections = [open_db(&path).unwrap(), open_db(&path).unwrap()];
    let barrier = Arc::new(Barrier::new(connections.len()));

    let handles: Vec<_> = connections
        .into_iter()
        .map(|mut conn| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                seed_if_empty(&mut conn).unwrap()
            })
        })
        .collect();
    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(
        outcomes
            .iter()
            .filter(|outcome| matches!(outcome, SeedOutcome::Seeded { .. }))
            .count(),
        1
    );
    assert!(outcomes.contains(&SeedOutcome::AlreadySeeded));

    let conn = open_db(&path).unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    assert_eq!(repo.count_contacts().unwrap(), 10);
}

#[test]
fn failed_seed_leaves_store_empty() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER activities_stop_after_five BEFORE INSERT ON activities
         WHEN (SELECT COUNT(*) FROM activities) >= 5
         BEGIN
             SELECT RAISE(ABORT, 'activity insert blocked');
         END;",
    )
    .unwrap();

    let err = seed_if_empty(&mut conn).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));

    let contacts = SqliteContactRepository::try_new(&conn).unwrap();
    let activities = SqliteActivityRepository::try_new(&conn).unwrap();
    assert_eq!(contacts.count_contacts().unwrap(), 0);
    assert_eq!(activities.count_activities().unwrap(), 0);

    conn.execute_batch("DROP TRIGGER activities_stop_after_five;")
        .unwrap();
    assert_eq!(
        seed_if_empty(&mut conn).unwrap(),
        SeedOutcome::Seeded {
            contacts: SEED_CONTACTS.len()
        }
    );
}
