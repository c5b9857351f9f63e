// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, Params, Row, params};

use super::{decimal_col, new_local_id};
use crate::error::FinanceError;
use crate::models::{Budget, BudgetPatch, NewBudget};

const COLUMNS: &str = "id, category, amount, month, synced, local_id";

type RawBudget = (i64, String, String, String, bool, Option<String>);

fn raw(r: &Row<'_>) -> rusqlite::Result<RawBudget> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
    ))
}

fn into_model((id, category, amount, month, synced, local_id): RawBudget) -> Result<Budget> {
    Ok(Budget {
        id,
        category,
        amount: decimal_col(&amount, "budgets", id)?,
        month,
        synced,
        local_id,
    })
}

fn query<P: Params>(conn: &Connection, filter: &str, params: P) -> Result<Vec<Budget>> {
    let sql = format!("SELECT {COLUMNS} FROM budgets {filter} ORDER BY month DESC, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, raw)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(into_model(row?)?);
    }
    Ok(out)
}

/// Duplicate (category, month) pairs are allowed and kept as separate rows.
pub fn add(conn: &Connection, new: &NewBudget) -> Result<i64> {
    conn.execute(
        "INSERT INTO budgets(category, amount, month, synced, local_id) VALUES (?1, ?2, ?3, 0, ?4)",
        params![
            new.category,
            new.amount.to_string(),
            new.month,
            new_local_id()
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, month = %new.month, category = %new.category, "budget stored");
    Ok(id)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Budget>> {
    let sql = format!("SELECT {COLUMNS} FROM budgets WHERE id=?1");
    let row = conn.query_row(&sql, params![id], raw).optional()?;
    row.map(into_model).transpose()
}

pub fn update(conn: &Connection, id: i64, patch: &BudgetPatch) -> Result<()> {
    let mut b = get(conn, id)?.ok_or(FinanceError::not_found("Budget", id))?;
    if let Some(ref category) = patch.category {
        b.category = category.clone();
    }
    if let Some(amount) = patch.amount {
        b.amount = amount;
    }
    if let Some(ref month) = patch.month {
        b.month = month.clone();
    }
    if let Some(synced) = patch.synced {
        b.synced = synced;
    }
    conn.execute(
        "UPDATE budgets SET category=?1, amount=?2, month=?3, synced=?4 WHERE id=?5",
        params![b.category, b.amount.to_string(), b.month, b.synced, id],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM budgets WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(FinanceError::not_found("Budget", id).into());
    }
    tracing::debug!(id, "budget deleted");
    Ok(())
}

pub fn list_all(conn: &Connection) -> Result<Vec<Budget>> {
    query(conn, "", [])
}

pub fn by_month(conn: &Connection, month: &str) -> Result<Vec<Budget>> {
    query(conn, "WHERE month=?1", params![month])
}

pub fn by_category(conn: &Connection, category: &str) -> Result<Vec<Budget>> {
    query(conn, "WHERE category=?1", params![category])
}

pub fn unsynced(conn: &Connection) -> Result<Vec<Budget>> {
    query(conn, "WHERE synced=0", [])
}
