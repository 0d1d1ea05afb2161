#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Token used for the admin account in every test database.
pub const TOKEN: &str = "test-admin-token";

pub fn hb() -> Command {
    cargo_bin_cmd!("hourbook")
}

/// hourbook invocation against the given DB with the admin token preset
pub fn hb_auth(db_path: &str) -> Command {
    let mut cmd = hb();
    cmd.env("HOURBOOK_ADMIN_TOKEN", TOKEN);
    cmd.args(["--db", db_path]);
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourbook.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize the schema and the test admin account (no config file writes)
pub fn init_db(db_path: &str) {
    hb()
        .args(["--db", db_path, "--test", "init", "--admin-token", TOKEN])
        .assert()
        .success();
}

pub fn add_employee(
    db_path: &str,
    first: &str,
    last: &str,
    phone: &str,
    role: &str,
    rate: Option<&str>,
) {
    let mut cmd = hb_auth(db_path);
    cmd.args(["employee", "add", first, last, "--phone", phone, "--role", role]);
    if let Some(r) = rate {
        cmd.args(["--rate", r]);
    }
    cmd.assert().success();
}

pub fn add_project(db_path: &str, name: &str, date: &str) {
    hb_auth(db_path)
        .args(["project", "add", name, "--date", date])
        .assert()
        .success();
}

pub fn record_hours(db_path: &str, employee: &str, project: &str, hours: &str) {
    hb_auth(db_path)
        .args([
            "hours", "record", "--employee", employee, "--project", project, "--hours", hours,
        ])
        .assert()
        .success();
}

/// Initialize DB and add a small dataset useful for many tests.
///
/// Employees: #1 Anna Schmidt (Electrician, €20/h), #2 Bruno Keller (Foreman, unrated).
/// Projects:  #1 "Rewiring Mueller" on 2025-09-01, #2 "Office fit-out" on 2025-09-15.
/// Hours:     Anna 8 on #1, Anna 5.5 on #2, Bruno 4 on #1 (17.5 total).
pub fn init_db_with_data(db_path: &str) {
    init_db(db_path);

    add_employee(
        db_path,
        "Anna",
        "Schmidt",
        "+49 151 1111111",
        "Electrician",
        Some("20"),
    );
    add_employee(db_path, "Bruno", "Keller", "+49 151 2222222", "Foreman", None);

    add_project(db_path, "Rewiring Mueller", "2025-09-01");
    add_project(db_path, "Office fit-out", "2025-09-15");

    record_hours(db_path, "1", "1", "8");
    record_hours(db_path, "1", "2", "5.5");
    record_hours(db_path, "2", "1", "4");
}
