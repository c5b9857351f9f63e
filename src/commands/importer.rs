// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use rusqlite::Connection;
use std::path::Path;

use crate::export::TAG_DELIMITER;
use crate::models::{NewTransaction, TransactionType};
use crate::store::ledger;
use crate::utils::{parse_amount, parse_date};

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => {
            let path = sub.get_one::<String>("path").unwrap().trim();
            let n = import_transactions(conn, Path::new(path))?;
            println!("Imported {} transactions from {}", n, path);
            Ok(())
        }
        _ => Ok(()),
    }
}

fn required<'a>(rec: &'a csv::StringRecord, i: usize, name: &str, line: u64) -> Result<&'a str> {
    rec.get(i)
        .map(str::trim)
        .with_context(|| format!("line {}: {} missing", line, name))
}

fn parse_row(rec: &csv::StringRecord, line: u64) -> Result<NewTransaction> {
    let field = |i, name| required(rec, i, name, line);
    let date = parse_date(field(0, "date")?).with_context(|| format!("line {}", line))?;
    let amount = parse_amount(field(1, "amount")?).with_context(|| format!("line {}", line))?;
    let kind = field(2, "type")?
        .parse::<TransactionType>()
        .with_context(|| format!("line {}", line))?;
    let category = field(3, "category")?.to_string();
    let description = rec
        .get(4)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    let tags = rec
        .get(5)
        .unwrap_or("")
        .split(TAG_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect();
    Ok(NewTransaction {
        date,
        amount,
        category,
        description,
        tags,
        r#type: kind,
        debt_id: None,
    })
}

/// Reads a CSV in the transactions export layout. All rows land or none do.
pub fn import_transactions(conn: &mut Connection, path: &Path) -> Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path.display()))?;

    let tx = conn.transaction()?;
    let mut count = 0;
    for result in rdr.records() {
        let rec = result?;
        let line = rec.position().map(|p| p.line()).unwrap_or_default();
        let new = parse_row(&rec, line)?;
        ledger::record_in(&tx, &new)?;
        count += 1;
    }
    tx.commit()?;
    tracing::info!(count, path = %path.display(), "transactions imported");
    Ok(count)
}
