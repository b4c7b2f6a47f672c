//! Lifecycle engine tests driven through the library API with an injected
//! clock.

mod common;
use common::{closed_entry, open_pool, seed_org_and_user, setup_test_db, ts};

use timecard::core::clock::ClockLogic;
use timecard::core::entry::{EntryLogic, EntryUpdate};
use timecard::db::directory;
use timecard::errors::AppError;
use timecard::models::entry::EntryState;
use timecard::utils::duration::decode;

#[test]
fn clock_in_creates_open_entry() {
    let db = setup_test_db("clock_in_open");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let entry =
        ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 1, 9, 0, 0))
            .unwrap();

    assert!(entry.id > 0);
    assert_eq!(entry.state(), EntryState::Open);
    assert!(entry.clock_out.is_none());
    assert!(entry.duration.is_none());
}

#[test]
fn clock_out_computes_duration() {
    let db = setup_test_db("clock_out_duration");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let entry =
        ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 1, 9, 0, 0))
            .unwrap();
    let closed =
        ClockLogic::clock_out_at(&mut pool, entry.id, ts(2025, 1, 1, 17, 30, 0)).unwrap();

    assert_eq!(closed.state(), EntryState::Closed);

    let duration = closed.duration.expect("closed entry has a duration");
    let parts = decode(&duration).unwrap();
    assert!((parts.total_hours() - 8.5).abs() < 1e-9);
}

#[test]
fn clock_out_twice_is_invalid_state() {
    let db = setup_test_db("clock_out_twice");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let entry =
        ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 1, 9, 0, 0))
            .unwrap();
    ClockLogic::clock_out_at(&mut pool, entry.id, ts(2025, 1, 1, 17, 0, 0)).unwrap();

    let err =
        ClockLogic::clock_out_at(&mut pool, entry.id, ts(2025, 1, 1, 18, 0, 0)).unwrap_err();
    assert!(matches!(err, AppError::AlreadyClockedOut(id) if id == entry.id));

    // The first clock-out must not be silently overwritten.
    let kept = EntryLogic::get(&mut pool, entry.id).unwrap();
    assert_eq!(kept.clock_out, Some(ts(2025, 1, 1, 17, 0, 0)));
}

#[test]
fn clock_out_of_unknown_entry_is_not_found() {
    let db = setup_test_db("clock_out_missing");
    let mut pool = open_pool(&db);

    let err = ClockLogic::clock_out_at(&mut pool, 999, ts(2025, 1, 1, 17, 0, 0)).unwrap_err();
    assert!(matches!(err, AppError::EntryNotFound(999)));
}

#[test]
fn second_clock_in_while_open_is_rejected() {
    let db = setup_test_db("double_clock_in");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 1, 9, 0, 0)).unwrap();

    let err = ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 1, 9, 5, 0))
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyClockedIn(u) if u == user));
}

#[test]
fn clock_in_validates_references() {
    let db = setup_test_db("clock_in_refs");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let err =
        ClockLogic::clock_in_at(&mut pool, "nobody", org, None, None, ts(2025, 1, 1, 9, 0, 0))
            .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound(_)));

    let err =
        ClockLogic::clock_in_at(&mut pool, &user, org + 7, None, None, ts(2025, 1, 1, 9, 0, 0))
            .unwrap_err();
    assert!(matches!(err, AppError::OrganizationNotFound(_)));

    let err =
        ClockLogic::clock_in_at(&mut pool, &user, org, Some(42), None, ts(2025, 1, 1, 9, 0, 0))
            .unwrap_err();
    assert!(matches!(err, AppError::ProjectNotFound(42)));

    let err =
        ClockLogic::clock_in_at(&mut pool, &user, org, None, Some(9), ts(2025, 1, 1, 9, 0, 0))
            .unwrap_err();
    assert!(matches!(err, AppError::LocationNotFound(9)));
}

#[test]
fn update_rejects_negative_duration() {
    let db = setup_test_db("update_negative");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let id = closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 1, 9, 0, 0),
        ts(2025, 1, 1, 17, 0, 0),
    );

    let changes = EntryUpdate {
        clock_out: Some(ts(2025, 1, 1, 8, 0, 0)),
        ..Default::default()
    };
    let err = EntryLogic::update(&mut pool, id, &changes).unwrap_err();
    assert!(matches!(err, AppError::NegativeDuration));

    // Nothing was persisted.
    let kept = EntryLogic::get(&mut pool, id).unwrap();
    assert_eq!(kept.clock_out, Some(ts(2025, 1, 1, 17, 0, 0)));
}

#[test]
fn update_recomputes_duration_on_time_change() {
    let db = setup_test_db("update_recompute");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let id = closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 1, 9, 0, 0),
        ts(2025, 1, 1, 17, 0, 0),
    );

    let changes = EntryUpdate {
        clock_out: Some(ts(2025, 1, 1, 13, 0, 0)),
        ..Default::default()
    };
    let updated = EntryLogic::update(&mut pool, id, &changes).unwrap();

    let parts = decode(updated.duration.as_deref().unwrap()).unwrap();
    assert!((parts.total_hours() - 4.0).abs() < 1e-9);
}

#[test]
fn update_validates_project_against_entry_org() {
    let db = setup_test_db("update_project_ref");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let project = directory::insert_project(&pool.conn, org, "Website", None).unwrap();
    let id = closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 1, 9, 0, 0),
        ts(2025, 1, 1, 17, 0, 0),
    );

    // Valid project attaches.
    let updated = EntryLogic::update(
        &mut pool,
        id,
        &EntryUpdate {
            project_id: Some(project.id),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(updated.project_id, Some(project.id));

    // A project from nowhere does not.
    let err = EntryLogic::update(
        &mut pool,
        id,
        &EntryUpdate {
            project_id: Some(project.id + 100),
            ..Default::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::ProjectNotFound(_)));
}

#[test]
fn delete_is_permanent_and_not_found_twice() {
    let db = setup_test_db("delete_entry");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let id = closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 1, 9, 0, 0),
        ts(2025, 1, 1, 17, 0, 0),
    );

    EntryLogic::delete(&mut pool, id).unwrap();

    let err = EntryLogic::get(&mut pool, id).unwrap_err();
    assert!(matches!(err, AppError::EntryNotFound(_)));

    let err = EntryLogic::delete(&mut pool, id).unwrap_err();
    assert!(matches!(err, AppError::EntryNotFound(_)));
}

#[test]
fn list_for_user_honors_optional_bounds() {
    let db = setup_test_db("list_bounds");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 10, 9, 0, 0),
        ts(2025, 1, 10, 17, 0, 0),
    );
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 2, 10, 9, 0, 0),
        ts(2025, 2, 10, 17, 0, 0),
    );
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 3, 10, 9, 0, 0),
        ts(2025, 3, 10, 17, 0, 0),
    );

    let all = EntryLogic::list_for_user(&mut pool, &user, None, None).unwrap();
    assert_eq!(all.len(), 3);

    let from_feb =
        EntryLogic::list_for_user(&mut pool, &user, Some(ts(2025, 2, 1, 0, 0, 0)), None).unwrap();
    assert_eq!(from_feb.len(), 2);

    let only_feb = EntryLogic::list_for_user(
        &mut pool,
        &user,
        Some(ts(2025, 2, 1, 0, 0, 0)),
        Some(ts(2025, 2, 28, 23, 59, 59)),
    )
    .unwrap();
    assert_eq!(only_feb.len(), 1);

    let none = EntryLogic::list_for_user(&mut pool, "ghost", None, None).unwrap();
    assert!(none.is_empty());
}

#[test]
fn most_recent_picks_latest_clock_in() {
    let db = setup_test_db("most_recent");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    assert!(ClockLogic::most_recent(&mut pool, &user).unwrap().is_none());

    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 1, 9, 0, 0),
        ts(2025, 1, 1, 17, 0, 0),
    );
    let latest_id = closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 2, 9, 0, 0),
        ts(2025, 1, 2, 17, 0, 0),
    );

    let recent = ClockLogic::most_recent(&mut pool, &user).unwrap().unwrap();
    assert_eq!(recent.id, latest_id);
}

#[test]
fn window_for_user_includes_open_entries() {
    let db = setup_test_db("window_open");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", None);

    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 1, 9, 0, 0),
        ts(2025, 1, 1, 17, 0, 0),
    );
    ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 2, 9, 0, 0)).unwrap();

    let window = EntryLogic::window_for_user(
        &mut pool,
        &user,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert_eq!(window.len(), 2);
    assert!(window.iter().any(|e| e.is_open()));
}
