// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Flat (CSV) and structured (JSON) renderings of record collections, plus the
//! file naming and writing used by the `export` command.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::models::{Budget, Debt, Transaction};

pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";
pub const TAG_DELIMITER: &str = ";";

const TRANSACTIONS_HEADER: &str = "Date,Amount,Type,Category,Description,Tags";
const BUDGETS_HEADER: &str = "Month,Category,Amount";
const DEBTS_HEADER: &str = "Name,Principal,Interest Rate,Minimum Payment,Current Balance";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(anyhow::anyhow!("Unknown format: {} (use csv|json)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Transactions,
    Budgets,
    Debts,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Transactions => "transactions",
            RecordKind::Budgets => "budgets",
            RecordKind::Debts => "debts",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One file ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written(Vec<PathBuf>),
    NothingToExport,
}

// Quote-wrapped fields double embedded quotes so the output stays parseable.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

// Bare fields only get quoted when they would otherwise break the row.
fn bare(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        quoted(s)
    } else {
        s.to_string()
    }
}

fn num(d: &Decimal) -> String {
    d.normalize().to_string()
}

pub fn transactions_csv(txs: &[Transaction]) -> String {
    let mut out = String::new();
    out.push_str(TRANSACTIONS_HEADER);
    out.push('\n');
    for t in txs {
        let line = [
            t.date.to_string(),
            num(&t.amount),
            t.r#type.to_string(),
            bare(&t.category),
            quoted(t.description.as_deref().unwrap_or_default()),
            quoted(&t.tags.join(TAG_DELIMITER)),
        ]
        .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn budgets_csv(budgets: &[Budget]) -> String {
    let mut out = String::new();
    out.push_str(BUDGETS_HEADER);
    out.push('\n');
    for b in budgets {
        let line = [bare(&b.month), bare(&b.category), num(&b.amount)].join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

pub fn debts_csv(debts: &[Debt]) -> String {
    let mut out = String::new();
    out.push_str(DEBTS_HEADER);
    out.push('\n');
    for d in debts {
        let line = [
            quoted(&d.name),
            num(&d.principal),
            num(&d.interest_rate),
            num(&d.minimum_payment),
            num(&d.current_balance),
        ]
        .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T> {
    #[serde(rename = "type")]
    kind: &'a str,
    export_date: String,
    data: &'a [T],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullBackup<'a> {
    export_date: String,
    transactions: &'a [Transaction],
    budgets: &'a [Budget],
    debts: &'a [Debt],
}

pub fn to_json<T: Serialize>(kind: RecordKind, data: &[T], at: NaiveDateTime) -> Result<String> {
    let env = Envelope {
        kind: kind.as_str(),
        export_date: at.format(EXPORT_DATE_FORMAT).to_string(),
        data,
    };
    Ok(serde_json::to_string_pretty(&env)?)
}

pub fn all_to_json(
    txs: &[Transaction],
    budgets: &[Budget],
    debts: &[Debt],
    at: NaiveDateTime,
) -> Result<String> {
    let doc = FullBackup {
        export_date: at.format(EXPORT_DATE_FORMAT).to_string(),
        transactions: txs,
        budgets,
        debts,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn filename(stem: &str, format: ExportFormat, at: NaiveDateTime) -> String {
    format!(
        "{}-{}.{}",
        stem,
        at.format(FILE_TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// Snapshot of every collection, as loaded from the store.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub transactions: &'a [Transaction],
    pub budgets: &'a [Budget],
    pub debts: &'a [Debt],
}

impl Snapshot<'_> {
    fn len_of(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::Transactions => self.transactions.len(),
            RecordKind::Budgets => self.budgets.len(),
            RecordKind::Debts => self.debts.len(),
        }
    }

    fn render(&self, kind: RecordKind, format: ExportFormat, at: NaiveDateTime) -> Result<String> {
        match (kind, format) {
            (RecordKind::Transactions, ExportFormat::Csv) => Ok(transactions_csv(self.transactions)),
            (RecordKind::Budgets, ExportFormat::Csv) => Ok(budgets_csv(self.budgets)),
            (RecordKind::Debts, ExportFormat::Csv) => Ok(debts_csv(self.debts)),
            (RecordKind::Transactions, ExportFormat::Json) => to_json(kind, self.transactions, at),
            (RecordKind::Budgets, ExportFormat::Json) => to_json(kind, self.budgets, at),
            (RecordKind::Debts, ExportFormat::Json) => to_json(kind, self.debts, at),
        }
    }
}

/// Renders a single collection. Empty collections produce no file.
pub fn prepare_one(
    snap: &Snapshot<'_>,
    kind: RecordKind,
    format: ExportFormat,
    at: NaiveDateTime,
) -> Result<Option<ExportFile>> {
    if snap.len_of(kind) == 0 {
        return Ok(None);
    }
    Ok(Some(ExportFile {
        filename: filename(kind.as_str(), format, at),
        mime_type: format.mime_type(),
        content: snap.render(kind, format, at)?,
    }))
}

/// JSON: one combined document, written even when every collection is empty.
/// CSV: one file per non-empty collection, since the three schemas cannot
/// share a table.
pub fn prepare_all(
    snap: &Snapshot<'_>,
    format: ExportFormat,
    at: NaiveDateTime,
) -> Result<Vec<ExportFile>> {
    match format {
        ExportFormat::Json => Ok(vec![ExportFile {
            filename: filename("finance-data", format, at),
            mime_type: format.mime_type(),
            content: all_to_json(snap.transactions, snap.budgets, snap.debts, at)?,
        }]),
        ExportFormat::Csv => {
            let mut files = Vec::new();
            for kind in [
                RecordKind::Transactions,
                RecordKind::Budgets,
                RecordKind::Debts,
            ] {
                if let Some(f) = prepare_one(snap, kind, format, at)? {
                    files.push(f);
                }
            }
            Ok(files)
        }
    }
}

pub fn write_files(dir: &Path, files: &[ExportFile]) -> Result<ExportOutcome> {
    if files.is_empty() {
        return Ok(ExportOutcome::NothingToExport);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export dir {}", dir.display()))?;
    let mut written = Vec::with_capacity(files.len());
    for f in files {
        let path = dir.join(&f.filename);
        fs::write(&path, &f.content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), mime = f.mime_type, "export written");
        written.push(path);
    }
    Ok(ExportOutcome::Written(written))
}
