//! Reporting aggregator tests: window filtering, grouping, and pay math.

mod common;
use common::{closed_entry, open_pool, seed_org_and_user, setup_test_db, ts};

use timecard::core::clock::ClockLogic;
use timecard::core::report::ReportLogic;
use timecard::db::directory;
use timecard::errors::AppError;
use timecard::models::user::User;

fn add_user(pool: &timecard::db::pool::DbPool, org: i64, email: &str, rate: f64) -> String {
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.to_string(),
        first_name: Some("Pat".to_string()),
        last_name: Some("Doe".to_string()),
        job_title: None,
        pay_rate: Some(rate),
        manages_organization: false,
        organization_id: Some(org),
    };
    directory::insert_user(&pool.conn, &user).expect("insert user");
    user.id
}

#[test]
fn payroll_sums_hours_per_user() {
    let db = setup_test_db("payroll_sums");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", Some(20.0));

    // 4.0 h and 3.5 h inside the window.
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 6, 9, 0, 0),
        ts(2025, 1, 6, 13, 0, 0),
    );
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 7, 9, 0, 0),
        ts(2025, 1, 7, 12, 30, 0),
    );

    let rows = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, user);
    assert!((rows[0].total_hours - 7.5).abs() < 1e-9);
    assert!((rows[0].pay_rate - 20.0).abs() < 1e-9);
    assert!((rows[0].gross_pay() - 150.0).abs() < 1e-9);
}

#[test]
fn payroll_excludes_entries_outside_window() {
    let db = setup_test_db("payroll_window");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", Some(10.0));

    // Clock-in before the window start.
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2024, 12, 31, 22, 0, 0),
        ts(2025, 1, 1, 6, 0, 0),
    );
    // Clock-out after the window end.
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 31, 20, 0, 0),
        ts(2025, 2, 1, 4, 0, 0),
    );
    // Fully inside.
    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 15, 9, 0, 0),
        ts(2025, 1, 15, 17, 0, 0),
    );

    let rows = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert!((rows[0].total_hours - 8.0).abs() < 1e-9);
}

#[test]
fn payroll_ignores_open_entries() {
    let db = setup_test_db("payroll_open");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", Some(10.0));

    ClockLogic::clock_in_at(&mut pool, &user, org, None, None, ts(2025, 1, 10, 9, 0, 0)).unwrap();

    let rows = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert!(rows.is_empty());
}

#[test]
fn payroll_groups_multiple_users() {
    let db = setup_test_db("payroll_groups");
    let mut pool = open_pool(&db);
    let (org, alice) = seed_org_and_user(&pool, "alice@acme.test", Some(20.0));
    let bob = add_user(&pool, org, "bob@acme.test", 15.0);

    closed_entry(
        &mut pool,
        &alice,
        org,
        None,
        ts(2025, 1, 6, 9, 0, 0),
        ts(2025, 1, 6, 17, 0, 0),
    );
    closed_entry(
        &mut pool,
        &bob,
        org,
        None,
        ts(2025, 1, 6, 10, 0, 0),
        ts(2025, 1, 6, 16, 0, 0),
    );

    let rows = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert_eq!(rows.len(), 2);

    let alice_row = rows.iter().find(|r| r.user_id == alice).unwrap();
    assert!((alice_row.total_hours - 8.0).abs() < 1e-9);
    // No first/last name on file: display name falls back to the email.
    assert_eq!(alice_row.user_name, "alice@acme.test");

    let bob_row = rows.iter().find(|r| r.user_id == bob).unwrap();
    assert!((bob_row.total_hours - 6.0).abs() < 1e-9);
    assert_eq!(bob_row.user_name, "Pat Doe");
}

#[test]
fn payroll_rejects_inverted_window() {
    let db = setup_test_db("payroll_inverted");
    let mut pool = open_pool(&db);
    let (org, _user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let err = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 2, 1, 0, 0, 0),
        ts(2025, 1, 1, 0, 0, 0),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidRange { .. }));
}

#[test]
fn payroll_with_no_entries_is_empty_not_error() {
    let db = setup_test_db("payroll_empty");
    let mut pool = open_pool(&db);
    let (org, _user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let rows = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();
    assert!(rows.is_empty());
}

#[test]
fn project_report_filters_by_project() {
    let db = setup_test_db("project_filter");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", Some(20.0));

    let website = directory::insert_project(&pool.conn, org, "Website", None).unwrap();
    let mobile = directory::insert_project(&pool.conn, org, "Mobile", None).unwrap();

    closed_entry(
        &mut pool,
        &user,
        org,
        Some(website.id),
        ts(2025, 1, 6, 9, 0, 0),
        ts(2025, 1, 6, 13, 0, 0),
    );
    closed_entry(
        &mut pool,
        &user,
        org,
        Some(mobile.id),
        ts(2025, 1, 7, 9, 0, 0),
        ts(2025, 1, 7, 17, 0, 0),
    );

    let rows = ReportLogic::project(
        &mut pool,
        website.id,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert_eq!(rows.len(), 1);
    assert!((rows[0].total_hours - 4.0).abs() < 1e-9);
}

#[test]
fn project_report_with_no_entries_is_an_error() {
    let db = setup_test_db("project_empty");
    let mut pool = open_pool(&db);
    let (org, _user) = seed_org_and_user(&pool, "alice@acme.test", None);

    let ghost = directory::insert_project(&pool.conn, org, "Ghost", None).unwrap();

    let err = ReportLogic::project(
        &mut pool,
        ghost.id,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NoProjectEntries(id) if id == ghost.id));
}

#[test]
fn pay_rate_is_a_current_snapshot() {
    let db = setup_test_db("rate_snapshot");
    let mut pool = open_pool(&db);
    let (org, user) = seed_org_and_user(&pool, "alice@acme.test", Some(20.0));

    closed_entry(
        &mut pool,
        &user,
        org,
        None,
        ts(2025, 1, 6, 9, 0, 0),
        ts(2025, 1, 6, 17, 0, 0),
    );

    // Raise the rate after the hours were worked: the report uses the
    // current rate, not a historical one.
    directory::set_pay_rate(&pool.conn, &user, 25.0).unwrap();

    let rows = ReportLogic::payroll(
        &mut pool,
        org,
        ts(2025, 1, 1, 0, 0, 0),
        ts(2025, 1, 31, 23, 59, 59),
    )
    .unwrap();

    assert!((rows[0].pay_rate - 25.0).abs() < 1e-9);
}
