use salescrm_core::db::open_db_in_memory;
use salescrm_core::{
    ActivityRepository, ContactDraft, ContactRepository, ContactService, ContactServiceError,
    ContactStatus, RepoError, SqliteActivityRepository, SqliteContactRepository,
};

#[test]
fn create_add_activity_and_get_detail_scenario() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();

    let created = service
        .create_contact(&ContactDraft::new("Test User", "t@example.com", "Acme").with_status("Lead"))
        .unwrap();
    let activity = service
        .add_activity(created.id, "Called, left voicemail")
        .unwrap();
    assert_eq!(activity.contact_id, created.id);

    let detail = service.get_contact(created.id).unwrap();
    assert_eq!(detail.contact, created);
    assert_eq!(detail.activities.len(), 1);
    assert_eq!(detail.activities[0].description, "Called, left voicemail");
}

#[test]
fn add_activity_to_missing_contact_writes_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();
    let activities = SqliteActivityRepository::try_new(&conn).unwrap();

    let err = service.add_activity(404, "ghost call").unwrap_err();
    assert!(matches!(err, ContactServiceError::ContactNotFound(404)));
    assert_eq!(activities.count_activities().unwrap(), 0);
}

#[test]
fn activities_are_ordered_by_timestamp_then_insertion() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();
    let activities = SqliteActivityRepository::try_new(&conn).unwrap();

    let contact = service
        .create_contact(&ContactDraft::new("A", "a@example.com", "X"))
        .unwrap();
    let late = activities.add_activity_at(contact.id, "late", 3_000).unwrap();
    let tie_a = activities.add_activity_at(contact.id, "tie a", 2_000).unwrap();
    let early = activities.add_activity_at(contact.id, "early", 1_000).unwrap();
    let tie_b = activities.add_activity_at(contact.id, "tie b", 2_000).unwrap();

    let ordered: Vec<_> = service
        .get_contact(contact.id)
        .unwrap()
        .activities
        .into_iter()
        .map(|activity| activity.id)
        .collect();
    assert_eq!(ordered, vec![early.id, tie_a.id, tie_b.id, late.id]);
}

#[test]
fn get_missing_contact_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();

    assert!(matches!(
        service.get_contact(5),
        Err(ContactServiceError::ContactNotFound(5))
    ));
}

#[test]
fn required_fields_are_checked_before_writes() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();

    let err = service
        .create_contact(&ContactDraft::new("A", "  ", "X"))
        .unwrap_err();
    assert!(matches!(err, ContactServiceError::MissingField("email")));
    assert!(service.list_contacts().unwrap().is_empty());

    let created = service
        .create_contact(&ContactDraft::new("A", "a@example.com", "X"))
        .unwrap();
    let err = service
        .update_contact(created.id, &ContactDraft::new("A", "a@example.com", "X").with_status(""))
        .unwrap_err();
    assert!(matches!(err, ContactServiceError::MissingField("status")));

    let err = service.add_activity(created.id, "   ").unwrap_err();
    assert!(matches!(err, ContactServiceError::MissingField("description")));
}

#[test]
fn repository_writes_skip_required_field_check() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let blank = repo.create_contact(&ContactDraft::new("", "", "")).unwrap();

    let service = ContactService::new(repo, SqliteActivityRepository::try_new(&conn).unwrap());
    let listed = service.list_contacts().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, blank.id);
}

#[test]
fn update_moves_contact_between_board_columns() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();

    let created = service
        .create_contact(&ContactDraft::new("A", "a@example.com", "X"))
        .unwrap();
    assert_eq!(service.status_board().unwrap().column(ContactStatus::Lead).len(), 1);

    service
        .update_contact(created.id, &created.to_draft().with_status("Closed"))
        .unwrap();
    let board = service.status_board().unwrap();
    assert!(board.column(ContactStatus::Lead).is_empty());
    assert_eq!(board.column(ContactStatus::Closed)[0].id, created.id);
}

#[test]
fn delete_contact_removes_detail_and_activities() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();
    let activities = SqliteActivityRepository::try_new(&conn).unwrap();

    let created = service
        .create_contact(&ContactDraft::new("A", "a@example.com", "X"))
        .unwrap();
    service.add_activity(created.id, "note").unwrap();

    service.delete_contact(created.id).unwrap();

    assert!(matches!(
        service.get_contact(created.id),
        Err(ContactServiceError::ContactNotFound(_))
    ));
    assert_eq!(activities.count_activities().unwrap(), 0);
    assert!(matches!(
        service.delete_contact(created.id),
        Err(ContactServiceError::ContactNotFound(_))
    ));
}

#[test]
fn storage_failure_surfaces_as_repo_error() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();

    let created = service
        .create_contact(&ContactDraft::new("A", "a@example.com", "X"))
        .unwrap();
    conn.execute_batch(
        "CREATE TRIGGER activities_closed BEFORE INSERT ON activities
         BEGIN
             SELECT RAISE(ABORT, 'activity log closed');
         END;",
    )
    .unwrap();

    let err = service.add_activity(created.id, "Called").unwrap_err();
    assert!(matches!(err, ContactServiceError::Repo(RepoError::Db(_))));

    let detail = service.get_contact(created.id).unwrap();
    assert!(detail.activities.is_empty());
}

#[test]
fn detail_serializes_contact_and_activities() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::sqlite(&conn).unwrap();

    let created = service
        .create_contact(&ContactDraft::new("A", "a@example.com", "X").with_status("Proposal"))
        .unwrap();
    service.add_activity(created.id, "Sent proposal").unwrap();

    let json = serde_json::to_value(service.get_contact(created.id).unwrap()).unwrap();
    assert_eq!(json["contact"]["status"], "Proposal");
    assert_eq!(json["contact"]["phone"], serde_json::Value::Null);
    assert_eq!(json["activities"][0]["description"], "Sent proposal");
}
