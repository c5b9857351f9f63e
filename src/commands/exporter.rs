// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::path::PathBuf;

use crate::export::{
    ExportFormat, ExportOutcome, RecordKind, Snapshot, prepare_all, prepare_one, write_files,
};
use crate::settings;
use crate::store::{budgets, debts, transactions};

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let what = sub.get_one::<String>("what").unwrap().as_str();
    let format: ExportFormat = sub.get_one::<String>("format").unwrap().parse()?;
    let out_dir = match sub.get_one::<String>("out_dir") {
        Some(d) => PathBuf::from(d.trim()),
        None => settings::export_dir(conn)?.unwrap_or_else(|| PathBuf::from(".")),
    };
    let now = chrono::Local::now().naive_local();

    match export(conn, what, format, &out_dir, now)? {
        ExportOutcome::Written(paths) => {
            for p in &paths {
                println!("Exported {} to {}", what, p.display());
            }
        }
        ExportOutcome::NothingToExport => {
            println!("No data to export: you don't have any {} to export.", what);
        }
    }
    Ok(())
}

/// Loads the requested collections and writes them under `out_dir`.
pub fn export(
    conn: &Connection,
    what: &str,
    format: ExportFormat,
    out_dir: &std::path::Path,
    at: NaiveDateTime,
) -> Result<ExportOutcome> {
    let txs = transactions::list_all(conn)?;
    let bs = budgets::list_all(conn)?;
    let ds = debts::list_all(conn)?;
    let snap = Snapshot {
        transactions: &txs,
        budgets: &bs,
        debts: &ds,
    };
    let files = match what {
        "all" => prepare_all(&snap, format, at)?,
        "transactions" => prepare_one(&snap, RecordKind::Transactions, format, at)?
            .into_iter()
            .collect(),
        "budgets" => prepare_one(&snap, RecordKind::Budgets, format, at)?
            .into_iter()
            .collect(),
        "debts" => prepare_one(&snap, RecordKind::Debts, format, at)?
            .into_iter()
            .collect(),
        other => anyhow::bail!("Unknown export target '{}'", other),
    };
    let outcome = write_files(out_dir, &files)?;
    if outcome == ExportOutcome::NothingToExport {
        tracing::info!(what, "nothing to export");
    }
    Ok(outcome)
}
