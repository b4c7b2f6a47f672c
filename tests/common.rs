#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, TimeZone, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;

use timecard::core::clock::ClockLogic;
use timecard::db::directory;
use timecard::db::initialize::init_db;
use timecard::db::pool::DbPool;
use timecard::models::user::User;

pub fn tc() -> Command {
    cargo_bin_cmd!("timecard")
}

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file.
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timecard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Open a pool on an initialized schema.
pub fn open_pool(db_path: &str) -> DbPool {
    let pool = DbPool::new(db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

/// Seed one organization and one user; returns (org_id, user_id).
pub fn seed_org_and_user(pool: &DbPool, email: &str, pay_rate: Option<f64>) -> (i64, String) {
    let org = directory::insert_organization(&pool.conn, "Acme Corp", Utc::now())
        .expect("insert organization");

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        email: email.to_string(),
        first_name: None,
        last_name: None,
        job_title: None,
        pay_rate,
        manages_organization: false,
        organization_id: Some(org.id),
    };
    directory::insert_user(&pool.conn, &user).expect("insert user");

    (org.id, user.id)
}

pub fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

/// Clock a full closed entry through the lifecycle engine; returns its id.
pub fn closed_entry(
    pool: &mut DbPool,
    user_id: &str,
    org_id: i64,
    project_id: Option<i64>,
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
) -> i64 {
    let entry = ClockLogic::clock_in_at(pool, user_id, org_id, project_id, None, clock_in)
        .expect("clock in");
    ClockLogic::clock_out_at(pool, entry.id, clock_out).expect("clock out");
    entry.id
}
