use predicates::str::contains;
use std::fs;

mod common;
use common::{hb_auth, init_db_with_data, setup_test_db, temp_out};

fn has(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_export_csv_whole_archive() {
    let db_path = setup_test_db("export_csv_all");
    init_db_with_data(&db_path);
    let out = temp_out("export_csv_all", "csv");

    hb_auth(&db_path)
        .args(["export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed:"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("id,employee,phone_number,project,project_date,hours_worked"));
    assert!(content.contains("Anna Schmidt"));
    assert!(content.contains("Bruno Keller"));
    assert!(content.contains("2025-09-01"));
    assert!(content.contains("2025-09-15"));
}

#[test]
fn test_export_json_month_range() {
    let db_path = setup_test_db("export_json_month");
    init_db_with_data(&db_path);
    common::add_project(&db_path, "Spring cleanup", "2026-03-20");
    common::record_hours(&db_path, "2", "3", "6");
    let out = temp_out("export_json_month", "json");

    hb_auth(&db_path)
        .args([
            "export", "--format", "json", "--file", &out, "--range", "2025-09",
        ])
        .assert()
        .success()
        .stdout(contains("JSON export completed:"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("\"employee\": \"Anna Schmidt\""));
    assert!(content.contains("2025-09-01"));
    assert!(!content.contains("Spring cleanup"));
}

#[test]
fn test_export_json_day_span() {
    let db_path = setup_test_db("export_json_span");
    init_db_with_data(&db_path);
    let out = temp_out("export_json_span", "json");

    // Only the first project day falls inside the span.
    hb_auth(&db_path)
        .args([
            "export", "--format", "json", "--file", &out, "--range",
            "2025-08-25:2025-09-10",
        ])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("Rewiring Mueller"));
    assert!(!content.contains("Office fit-out"));
}

#[test]
fn test_export_xlsx_writes_workbook() {
    let db_path = setup_test_db("export_xlsx");
    init_db_with_data(&db_path);
    let out = temp_out("export_xlsx", "xlsx");

    hb_auth(&db_path)
        .args(["export", "--format", "xlsx", "--file", &out])
        .assert()
        .success()
        .stdout(contains("XLSX export completed:"));

    // xlsx files are zip containers
    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_export_pdf_carries_period_title() {
    let db_path = setup_test_db("export_pdf");
    init_db_with_data(&db_path);
    let out = temp_out("export_pdf", "pdf");

    hb_auth(&db_path)
        .args([
            "export", "--format", "pdf", "--file", &out, "--range", "2025-09",
        ])
        .assert()
        .success()
        .stdout(contains("PDF export completed:"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(has(&bytes, b"Logged hours for September 2025"));
    assert!(has(&bytes, b"Anna Schmidt"));
}

#[test]
fn test_export_empty_range_warns_and_writes_nothing() {
    let db_path = setup_test_db("export_empty_range");
    init_db_with_data(&db_path);
    let out = temp_out("export_empty_range", "csv");

    hb_auth(&db_path)
        .args([
            "export", "--format", "csv", "--file", &out, "--range", "2020-01",
        ])
        .assert()
        .success()
        .stdout(contains("No hour records found for selected range."));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_rejects_malformed_range() {
    let db_path = setup_test_db("export_bad_range");
    init_db_with_data(&db_path);
    let out = temp_out("export_bad_range", "csv");

    hb_auth(&db_path)
        .args([
            "export", "--format", "csv", "--file", &out, "--range", "09/2025",
        ])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}

#[test]
fn test_export_existing_file_requires_force() {
    let db_path = setup_test_db("export_force");
    init_db_with_data(&db_path);
    let out = temp_out("export_force", "csv");
    fs::write(&out, "placeholder").unwrap();

    hb_auth(&db_path)
        .args(["export", "--format", "csv", "--file", &out])
        .assert()
        .failure()
        .stdout(contains("already exists"))
        .stderr(contains("Cancelled: existing file not overwritten"));

    hb_auth(&db_path)
        .args(["export", "--format", "csv", "--file", &out, "-f"])
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.contains("Anna Schmidt"));
}
