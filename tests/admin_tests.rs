use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

mod common;
use common::{TOKEN, hb, hb_auth, init_db, init_db_with_data, setup_test_db, temp_out};

#[test]
fn test_init_prints_generated_token_once() {
    let db_path = setup_test_db("init_generated_token");

    hb()
        .args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Admin user 'admin' created"))
        .stdout(contains("🔑 Admin token :"))
        .stdout(contains("Store this token safely"))
        .stdout(contains("hourbook initialization completed!"));
}

#[test]
fn test_init_twice_keeps_existing_admin() {
    let db_path = setup_test_db("init_twice");
    init_db(&db_path);

    hb()
        .args(["--db", &db_path, "--test", "init", "--admin-token", "other-token"])
        .assert()
        .success()
        .stdout(contains("Admin user 'admin' already exists, token unchanged."))
        .stdout(contains("🔑 Admin token :").not());

    // The original token still authenticates, the new one does not.
    hb_auth(&db_path)
        .args(["employee", "list"])
        .assert()
        .success();
    hb()
        .args(["--db", &db_path, "--token", "other-token", "employee", "list"])
        .assert()
        .failure()
        .stderr(contains("invalid administrator token"));
}

#[test]
fn test_init_with_custom_admin_user() {
    let db_path = setup_test_db("init_custom_user");

    hb()
        .args([
            "--db", &db_path, "--test", "init", "--admin-user", "chef", "--admin-token", TOKEN,
        ])
        .assert()
        .success()
        .stdout(contains("Admin user 'chef' created"));
}

#[test]
fn test_backup_plain_copy() {
    let db_path = setup_test_db("backup_plain");
    init_db_with_data(&db_path);
    let out = temp_out("backup_plain", "sqlite");

    hb_auth(&db_path)
        .args(["backup", "--file", &out])
        .assert()
        .success()
        .stdout(contains("Backup written to"));

    let bytes = fs::read(&out).unwrap();
    assert!(bytes.starts_with(b"SQLite format 3"));
}

#[test]
fn test_backup_compressed_leaves_only_the_zip() {
    let db_path = setup_test_db("backup_zip");
    init_db_with_data(&db_path);
    let out = temp_out("backup_zip", "sqlite");
    let zipped = std::path::Path::new(&out).with_extension("zip");
    fs::remove_file(&zipped).ok();

    hb_auth(&db_path)
        .args(["backup", "--file", &out, "--compress"])
        .assert()
        .success()
        .stdout(contains(".zip"));

    let bytes = fs::read(&zipped).unwrap();
    assert!(bytes.starts_with(b"PK"));
    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_log_print_shows_operations() {
    let db_path = setup_test_db("log_print");
    init_db_with_data(&db_path);

    hb_auth(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log:"))
        .stdout(contains("employee_create"))
        .stdout(contains("project_create"))
        .stdout(contains("hours_record"))
        .stdout(contains("migration_applied"));
}

#[test]
fn test_log_records_deletes_and_exports() {
    let db_path = setup_test_db("log_mutations");
    init_db_with_data(&db_path);
    let out = temp_out("log_mutations", "csv");

    hb_auth(&db_path)
        .args(["hours", "del", "3", "-y"])
        .assert()
        .success();
    hb_auth(&db_path)
        .args(["export", "--format", "csv", "--file", &out])
        .assert()
        .success();

    hb_auth(&db_path)
        .args(["log", "--print"])
        .assert()
        .success()
        .stdout(contains("hours_delete"))
        .stdout(contains("export"));
}

#[test]
fn test_db_maintenance_flags() {
    let db_path = setup_test_db("db_maintenance");
    init_db_with_data(&db_path);

    hb()
        .args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("Migration completed."));

    hb()
        .args(["--db", &db_path, "db", "--check"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed."));

    hb()
        .args(["--db", &db_path, "db", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Vacuum completed."));

    hb()
        .args(["--db", &db_path, "db", "--info"])
        .assert()
        .success()
        .stdout(contains("• Employees:"))
        .stdout(contains("• Hour records:"))
        .stdout(contains("• Project date range:"));
}

#[test]
fn test_config_check_without_file_points_to_init() {
    let db_path = setup_test_db("config_check_missing");
    let home = std::env::temp_dir().join("hourbook_home_missing");
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).unwrap();

    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("No configuration file at"))
        .stdout(contains("Run `hourbook init`."));
}

#[test]
fn test_config_print_shows_defaults() {
    let db_path = setup_test_db("config_print");
    let home = std::env::temp_dir().join("hourbook_home_print");
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).unwrap();

    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("Current configuration"))
        .stdout(contains("organization: ZeenAlZein"));
}

#[test]
fn test_config_migrate_fills_in_organization() {
    let db_path = setup_test_db("config_migrate");
    let home = std::env::temp_dir().join("hourbook_home_migrate");
    fs::remove_dir_all(&home).ok();
    let conf_dir = home.join(".hourbook");
    fs::create_dir_all(&conf_dir).unwrap();

    // Old-style config without the organization key.
    let conf = conf_dir.join("hourbook.conf");
    fs::write(&conf, format!("database: {}\n", db_path)).unwrap();

    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Missing configuration key: organization"))
        .stdout(contains("config --migrate"));

    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("added organization parameter to config"));

    let content = fs::read_to_string(&conf).unwrap();
    assert!(content.contains("organization: ZeenAlZein"));

    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "config", "--check"])
        .assert()
        .success()
        .stdout(contains("Configuration file is complete."));

    // Re-running the migration is a no-op.
    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "config", "--migrate"])
        .assert()
        .success()
        .stdout(contains("added organization parameter").not());
}

#[test]
fn test_init_writes_config_file_under_home() {
    let home = std::env::temp_dir().join("hourbook_home_init");
    fs::remove_dir_all(&home).ok();
    fs::create_dir_all(&home).unwrap();
    let db_path = setup_test_db("init_config_file");

    hb()
        .env("HOME", &home)
        .args(["--db", &db_path, "init", "--admin-token", TOKEN])
        .assert()
        .success()
        .stdout(contains("hourbook initialization completed!"));

    let conf = home.join(".hourbook").join("hourbook.conf");
    let content = fs::read_to_string(&conf).unwrap();
    assert!(content.contains("database:"));
    assert!(content.contains("organization: ZeenAlZein"));
}
