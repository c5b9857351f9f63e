// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, Params, Row, params};

use super::{date_col, decimal_col, new_local_id};
use crate::error::FinanceError;
use crate::filter::DateRange;
use crate::models::{NewTransaction, Transaction, TransactionPatch, TransactionType};

const COLUMNS: &str =
    "id, date, amount, category, description, tags, type, debt_id, synced, local_id";
const ORDER: &str = "ORDER BY date DESC, id DESC";

struct RawTransaction {
    id: i64,
    date: String,
    amount: String,
    category: String,
    description: Option<String>,
    tags: String,
    kind: String,
    debt_id: Option<i64>,
    synced: bool,
    local_id: Option<String>,
}

fn raw(r: &Row<'_>) -> rusqlite::Result<RawTransaction> {
    Ok(RawTransaction {
        id: r.get(0)?,
        date: r.get(1)?,
        amount: r.get(2)?,
        category: r.get(3)?,
        description: r.get(4)?,
        tags: r.get(5)?,
        kind: r.get(6)?,
        debt_id: r.get(7)?,
        synced: r.get(8)?,
        local_id: r.get(9)?,
    })
}

impl RawTransaction {
    fn into_model(self) -> Result<Transaction> {
        let tags: Vec<String> = serde_json::from_str(&self.tags)
            .with_context(|| format!("Invalid tags '{}' in transactions #{}", self.tags, self.id))?;
        Ok(Transaction {
            id: self.id,
            date: date_col(&self.date, "transactions", self.id)?,
            amount: decimal_col(&self.amount, "transactions", self.id)?,
            category: self.category,
            description: self.description,
            tags,
            r#type: self.kind.parse::<TransactionType>()?,
            debt_id: self.debt_id,
            synced: self.synced,
            local_id: self.local_id,
        })
    }
}

fn query<P: Params>(conn: &Connection, filter: &str, params: P) -> Result<Vec<Transaction>> {
    let sql = format!("SELECT {COLUMNS} FROM transactions {filter} {ORDER}");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, raw)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?.into_model()?);
    }
    Ok(out)
}

pub fn add(conn: &Connection, new: &NewTransaction) -> Result<i64> {
    conn.execute(
        "INSERT INTO transactions(date, amount, category, description, tags, type, debt_id, synced, local_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, ?8)",
        params![
            new.date.to_string(),
            new.amount.to_string(),
            new.category,
            new.description,
            serde_json::to_string(&new.tags)?,
            new.r#type.as_str(),
            new.debt_id,
            new_local_id(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, amount = %new.amount, kind = %new.r#type, "transaction stored");
    Ok(id)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Transaction>> {
    let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id=?1");
    let row = conn.query_row(&sql, params![id], raw).optional()?;
    row.map(RawTransaction::into_model).transpose()
}

pub fn require(conn: &Connection, id: i64) -> Result<Transaction> {
    get(conn, id)?.ok_or_else(|| FinanceError::not_found("Transaction", id).into())
}

/// Applies the fields present in `patch`. The debt link is not patchable; delete
/// and re-add instead so the debt balance stays consistent.
pub fn update(conn: &Connection, id: i64, patch: &TransactionPatch) -> Result<()> {
    let mut t = require(conn, id)?;
    if t.debt_id.is_some() && (patch.amount.is_some() || patch.r#type.is_some()) {
        anyhow::bail!(
            "Transaction #{} pays a debt; delete and re-add it to change amount or type",
            id
        );
    }
    if let Some(date) = patch.date {
        t.date = date;
    }
    if let Some(amount) = patch.amount {
        t.amount = amount;
    }
    if let Some(ref category) = patch.category {
        t.category = category.clone();
    }
    if let Some(ref description) = patch.description {
        t.description = description.clone();
    }
    if let Some(ref tags) = patch.tags {
        t.tags = tags.clone();
    }
    if let Some(kind) = patch.r#type {
        t.r#type = kind;
    }
    if let Some(synced) = patch.synced {
        t.synced = synced;
    }
    conn.execute(
        "UPDATE transactions SET date=?1, amount=?2, category=?3, description=?4, tags=?5, type=?6, synced=?7
         WHERE id=?8",
        params![
            t.date.to_string(),
            t.amount.to_string(),
            t.category,
            t.description,
            serde_json::to_string(&t.tags)?,
            t.r#type.as_str(),
            t.synced,
            id,
        ],
    )?;
    tracing::debug!(id, "transaction updated");
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM transactions WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(FinanceError::not_found("Transaction", id).into());
    }
    tracing::debug!(id, "transaction deleted");
    Ok(())
}

pub fn list_all(conn: &Connection) -> Result<Vec<Transaction>> {
    query(conn, "", [])
}

/// Inclusive on both ends; a missing bound leaves that side open.
pub fn in_range(conn: &Connection, range: &DateRange) -> Result<Vec<Transaction>> {
    match (range.start, range.end) {
        (None, None) => list_all(conn),
        (Some(s), None) => query(conn, "WHERE date >= ?1", params![s.to_string()]),
        (None, Some(e)) => query(conn, "WHERE date <= ?1", params![e.to_string()]),
        (Some(s), Some(e)) => query(
            conn,
            "WHERE date BETWEEN ?1 AND ?2",
            params![s.to_string(), e.to_string()],
        ),
    }
}

pub fn by_category(conn: &Connection, category: &str) -> Result<Vec<Transaction>> {
    query(conn, "WHERE category=?1", params![category])
}

pub fn by_type(conn: &Connection, kind: TransactionType) -> Result<Vec<Transaction>> {
    query(conn, "WHERE type=?1", params![kind.as_str()])
}

pub fn by_debt(conn: &Connection, debt_id: i64) -> Result<Vec<Transaction>> {
    query(conn, "WHERE debt_id=?1", params![debt_id])
}

pub fn unsynced(conn: &Connection) -> Result<Vec<Transaction>> {
    query(conn, "WHERE synced=0", [])
}

/// Transactions whose debt link points at a debt that no longer exists.
pub fn dangling_debt_links(conn: &Connection) -> Result<Vec<Transaction>> {
    query(
        conn,
        "WHERE debt_id IS NOT NULL AND debt_id NOT IN (SELECT id FROM debts)",
        [],
    )
}
