use crate::ui::messages::success;
use rusqlite::{Connection, Error, OptionalExtension};
use serde_yaml::Value;
use std::fs;

const VERSION: &str = "20250701_0003_add_organization";

fn sqlite_failure(msg: String) -> Error {
    Error::SqliteFailure(rusqlite::ffi::Error::new(1), Some(msg))
}

/// Migration that adds the `organization` parameter to the YAML config,
/// if missing, and marks the migration as applied in the `log` table.
///
/// Configuration files written before reports carried an organization
/// header lack the key; `Config::load` papers over that with the default,
/// this migration makes it explicit in the file.
pub fn migrate_add_organization(conn: &Connection) -> Result<(), Error> {
    // Ensure log table exists (the stamp lives there)
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date TEXT NOT NULL,
            operation TEXT NOT NULL,
            target TEXT DEFAULT '',
            message TEXT NOT NULL
        );",
    )?;

    // Check if already applied
    let mut chk = conn.prepare(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    if chk.query_row([VERSION], |_| Ok(())).optional()?.is_some() {
        return Ok(()); // already applied
    }

    let conf_file = super::Config::config_file();

    if conf_file.exists() {
        let content = fs::read_to_string(&conf_file)
            .map_err(|e| sqlite_failure(format!("Failed to read config {:?}: {}", conf_file, e)))?;

        if let Ok(mut yaml) = serde_yaml::from_str::<Value>(&content)
            && let Some(map) = yaml.as_mapping_mut()
        {
            let key = Value::String("organization".to_string());

            if !map.contains_key(&key) {
                map.insert(key.clone(), Value::String("ZeenAlZein".to_string()));

                // Serialize updated YAML
                let serialized = serde_yaml::to_string(&yaml).map_err(|e| {
                    sqlite_failure(format!(
                        "Failed to serialize updated config {:?}: {}",
                        conf_file, e
                    ))
                })?;

                // Inject documentation comment right after the `organization` line
                let mut new_content = String::new();

                for line in serialized.lines() {
                    new_content.push_str(line);
                    new_content.push('\n');

                    if line.starts_with("organization:") {
                        new_content
                            .push_str("# organization name printed on report headers\n");
                    }
                }

                fs::write(&conf_file, new_content).map_err(|e| {
                    sqlite_failure(format!(
                        "Failed to write updated config {:?}: {}",
                        conf_file, e
                    ))
                })?;
            }
        }
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [VERSION, "Added organization parameter to config"],
    )?;

    success(format!(
        "Migration applied: {} — added organization parameter to config.",
        VERSION
    ));

    Ok(())
}
