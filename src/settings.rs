// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

pub const CURRENCY_SYMBOL_KEY: &str = "currency_symbol";
pub const EXPORT_DIR_KEY: &str = "export_dir";
pub const SCHEMA_VERSION_KEY: &str = "schema_version";

/// Keys a user may set from the command line.
pub const USER_KEYS: &[&str] = &[CURRENCY_SYMBOL_KEY, EXPORT_DIR_KEY];

const DEFAULT_CURRENCY_SYMBOL: &str = "$";

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn unset(conn: &Connection, key: &str) -> Result<()> {
    conn.execute("DELETE FROM settings WHERE key=?1", params![key])?;
    Ok(())
}

pub fn list(conn: &Connection) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare("SELECT key, value FROM settings ORDER BY key")?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)))?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn ensure_user_key(key: &str) -> Result<()> {
    if USER_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(anyhow!(
            "Unknown setting '{}' (expected one of: {})",
            key,
            USER_KEYS.join(", ")
        ))
    }
}

pub fn currency_symbol(conn: &Connection) -> Result<String> {
    Ok(get(conn, CURRENCY_SYMBOL_KEY)?.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn export_dir(conn: &Connection) -> Result<Option<PathBuf>> {
    Ok(get(conn, EXPORT_DIR_KEY)?.map(PathBuf::from))
}

pub fn schema_version(conn: &Connection) -> Result<i64> {
    match get(conn, SCHEMA_VERSION_KEY)? {
        Some(v) => v
            .parse::<i64>()
            .with_context(|| format!("Invalid schema version '{}'", v)),
        None => Ok(0),
    }
}
