use predicates::str::contains;
use std::fs;

mod common;
use common::{hb_auth, init_db_with_data, setup_test_db, temp_out};

/// Byte-level needle search; WinAnsi text inside the PDF stays ASCII for
/// plain latin strings, so table labels are findable in the raw file.
fn has(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn test_report_for_rated_employee() {
    let db_path = setup_test_db("report_rated");
    init_db_with_data(&db_path);
    let out = temp_out("report_rated", "pdf");

    hb_auth(&db_path)
        .args([
            "report", "--employee", "1", "--month", "9", "--year", "2025", "--out", &out,
        ])
        .assert()
        .success()
        .stdout(contains("Report for Anna Schmidt (September 2025) written to"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(has(&bytes, b"Mitarbeiter Arbeitsbericht"));
    assert!(has(&bytes, b"Rewiring Mueller"));
    assert!(has(&bytes, b"Office fit-out"));
    assert!(has(&bytes, b"GESAMTSTUNDEN"));
    assert!(has(&bytes, b"13.50"));
    // Rated employees get the money column and the rate line.
    assert!(has(&bytes, b"Betrag"));
    assert!(has(&bytes, b"Stundensatz:"));
}

#[test]
fn test_report_for_unrated_employee_has_no_money_column() {
    let db_path = setup_test_db("report_unrated");
    init_db_with_data(&db_path);
    let out = temp_out("report_unrated", "pdf");

    hb_auth(&db_path)
        .args([
            "report", "--employee", "2", "--month", "9", "--year", "2025", "--out", &out,
        ])
        .assert()
        .success()
        .stdout(contains("Report for Bruno Keller (September 2025) written to"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(has(&bytes, b"GESAMTSTUNDEN"));
    assert!(has(&bytes, b"4.00"));
    assert!(!has(&bytes, b"Betrag"));
    assert!(!has(&bytes, b"Stundensatz:"));
}

#[test]
fn test_report_empty_month_writes_notice_document() {
    let db_path = setup_test_db("report_empty_month");
    init_db_with_data(&db_path);
    let out = temp_out("report_empty_month", "pdf");

    hb_auth(&db_path)
        .args([
            "report", "--employee", "1", "--month", "1", "--year", "2026", "--out", &out,
        ])
        .assert()
        .success()
        .stdout(contains("No hours recorded in Januar 2026; wrote an empty report."));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
    assert!(has(&bytes, b"Mitarbeiter Arbeitsbericht"));
    assert!(!has(&bytes, b"GESAMTSTUNDEN"));
}

#[test]
fn test_report_month_out_of_range_fails() {
    let db_path = setup_test_db("report_bad_month");
    init_db_with_data(&db_path);
    let out = temp_out("report_bad_month", "pdf");

    hb_auth(&db_path)
        .args([
            "report", "--employee", "1", "--month", "13", "--year", "2025", "--out", &out,
        ])
        .assert()
        .failure()
        .stderr(contains("month must be between 1 and 12"));
}

#[test]
fn test_report_missing_employee_fails() {
    let db_path = setup_test_db("report_missing_employee");
    init_db_with_data(&db_path);

    hb_auth(&db_path)
        .args(["report", "--employee", "99", "--month", "9", "--year", "2025"])
        .assert()
        .failure()
        .stderr(contains("employee not found: id 99"));
}

#[test]
fn test_report_default_filename_lands_in_cwd() {
    let db_path = setup_test_db("report_default_name");
    init_db_with_data(&db_path);

    let dir = std::env::temp_dir().join("hourbook_report_cwd");
    fs::create_dir_all(&dir).unwrap();
    let expected = dir.join("employee_1_report_2025_09.pdf");
    fs::remove_file(&expected).ok();

    hb_auth(&db_path)
        .current_dir(&dir)
        .args(["report", "--employee", "1", "--month", "9", "--year", "2025"])
        .assert()
        .success()
        .stdout(contains("employee_1_report_2025_09.pdf"));

    assert!(expected.exists());
}

#[test]
fn test_report_existing_file_requires_force() {
    let db_path = setup_test_db("report_force");
    init_db_with_data(&db_path);
    let out = temp_out("report_force", "pdf");
    fs::write(&out, "placeholder").unwrap();

    // stdin is closed, so the overwrite prompt reads an empty answer.
    hb_auth(&db_path)
        .args([
            "report", "--employee", "1", "--month", "9", "--year", "2025", "--out", &out,
        ])
        .assert()
        .failure()
        .stdout(contains("already exists"))
        .stderr(contains("Cancelled: existing file not overwritten"));

    hb_auth(&db_path)
        .args([
            "report", "--employee", "1", "--month", "9", "--year", "2025", "--out", &out, "-f",
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}
