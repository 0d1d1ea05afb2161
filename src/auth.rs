//! Administrator authentication.
//!
//! There is no ambient "current user": every store operation takes an
//! explicit [`Admin`] value, and the CLI builds one by checking the caller's
//! secret against the SHA-256 hash stored in the `admins` table. The secret
//! comes from `--token` or from the `HOURBOOK_ADMIN_TOKEN` environment
//! variable.

use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};

pub const TOKEN_ENV: &str = "HOURBOOK_ADMIN_TOKEN";

/// Proof of an authenticated administrator.
#[derive(Debug, Clone)]
pub struct Admin {
    pub id: i64,
    pub username: String,
}

/// Lowercase hex SHA-256 of the token. Only hashes are persisted.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Random token handed out by `init` when the caller did not supply one.
pub fn generate_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Resolve the caller's secret: the explicit flag wins over the environment.
pub fn resolve_token(flag: Option<&str>) -> AppResult<String> {
    if let Some(token) = flag {
        return Ok(token.to_string());
    }
    std::env::var(TOKEN_ENV).map_err(|_| {
        AppError::Unauthorized(format!(
            "no administrator token given (use --token or set {})",
            TOKEN_ENV
        ))
    })
}

/// Look up the administrator matching the given secret.
pub fn authenticate(conn: &Connection, token: &str) -> AppResult<Admin> {
    let hash = hash_token(token);
    let found = conn
        .query_row(
            "SELECT id, username FROM admins WHERE token_hash = ?1",
            [&hash],
            |row| {
                Ok(Admin {
                    id: row.get(0)?,
                    username: row.get(1)?,
                })
            },
        )
        .optional()?;

    found.ok_or_else(|| AppError::Unauthorized("invalid administrator token".to_string()))
}

pub fn admin_exists(conn: &Connection) -> AppResult<bool> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM admins", [], |row| row.get(0))?;
    Ok(count > 0)
}

/// Create the administrator account unless one already exists.
/// Returns true when a new account was written.
pub fn create_admin(conn: &Connection, username: &str, token: &str) -> AppResult<bool> {
    if admin_exists(conn)? {
        return Ok(false);
    }
    conn.execute(
        "INSERT INTO admins (username, token_hash, created_at) VALUES (?1, ?2, ?3)",
        params![username, hash_token(token), Local::now().to_rfc3339()],
    )?;
    Ok(true)
}
