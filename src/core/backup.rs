//! Database backup: copy the SQLite file, optionally into a zip archive.

use crate::auth::Admin;
use crate::config::Config;
use crate::db::log::oplog;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    pub fn backup(
        conn: &Connection,
        admin: &Admin,
        cfg: &Config,
        dest: &Path,
        compress: bool,
    ) -> AppResult<PathBuf> {
        let src = Path::new(&cfg.database);
        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::copy(src, dest)?;

        let final_path = if compress {
            let compressed = compress_backup(dest)?;
            if compressed != dest.to_path_buf()
                && let Err(e) = fs::remove_file(dest)
            {
                eprintln!("⚠️ Failed to remove uncompressed backup: {}", e);
            }
            compressed
        } else {
            dest.to_path_buf()
        };

        oplog(
            conn,
            "backup",
            &final_path.to_string_lossy(),
            &format!(
                "Backup {}created by {}",
                if compress { "compressed and " } else { "" },
                admin.username
            ),
        )?;

        Ok(final_path)
    }
}

/// Compress a backup using .zip
fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");
    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let mut f = fs::File::open(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string());
    zip.start_file(name, options).map_err(std::io::Error::other)?;

    std::io::copy(&mut f, &mut zip)?;
    zip.finish().map_err(std::io::Error::other)?;

    Ok(zip_path)
}
