// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::settings;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.pocketbook", "Pocketbook", "pocketbook"));

pub const SCHEMA_VERSION: i64 = 2;

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

pub fn db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("pocketbook.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        amount TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT,
        tags TEXT NOT NULL DEFAULT '[]', -- JSON array
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        debt_id INTEGER, -- not a foreign key: debts may be deleted independently
        synced INTEGER NOT NULL DEFAULT 0,
        local_id TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
    CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);
    CREATE INDEX IF NOT EXISTS idx_transactions_debt ON transactions(debt_id);
    CREATE INDEX IF NOT EXISTS idx_transactions_synced ON transactions(synced);

    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        month TEXT NOT NULL,
        synced INTEGER NOT NULL DEFAULT 0,
        local_id TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_budgets_category ON budgets(category);
    CREATE INDEX IF NOT EXISTS idx_budgets_month ON budgets(month);
    CREATE INDEX IF NOT EXISTS idx_budgets_synced ON budgets(synced);

    CREATE TABLE IF NOT EXISTS debts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        principal TEXT NOT NULL,
        interest_rate TEXT NOT NULL,
        minimum_payment TEXT NOT NULL,
        current_balance TEXT NOT NULL,
        created_date TEXT,
        synced INTEGER NOT NULL DEFAULT 0,
        local_id TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_debts_name ON debts(name);
    CREATE INDEX IF NOT EXISTS idx_debts_created ON debts(created_date);
    CREATE INDEX IF NOT EXISTS idx_debts_synced ON debts(synced);
    "#,
    )?;
    migrate(conn)?;
    Ok(())
}

fn migrate(conn: &mut Connection) -> Result<()> {
    let current = settings::schema_version(conn)?;
    if current >= SCHEMA_VERSION {
        return Ok(());
    }
    let tx = conn.transaction()?;
    if current < 2 {
        // v1 debts carried no creation date; stamp them with the upgrade day.
        let stamped = tx.execute(
            "UPDATE debts SET created_date=?1 WHERE created_date IS NULL",
            [crate::utils::today().to_string()],
        )?;
        if stamped > 0 {
            tracing::info!(stamped, "backfilled debt creation dates");
        }
    }
    settings::set(&tx, settings::SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string())?;
    tx.commit()?;
    tracing::debug!(from = current, to = SCHEMA_VERSION, "schema migrated");
    Ok(())
}
