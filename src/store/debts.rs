// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::{Connection, OptionalExtension, Params, Row, params};

use super::{date_col, decimal_col, new_local_id};
use crate::error::FinanceError;
use crate::models::{Debt, DebtPatch, NewDebt};

const COLUMNS: &str = "id, name, principal, interest_rate, minimum_payment, current_balance, created_date, synced, local_id";

struct RawDebt {
    id: i64,
    name: String,
    principal: String,
    interest_rate: String,
    minimum_payment: String,
    current_balance: String,
    created_date: Option<String>,
    synced: bool,
    local_id: Option<String>,
}

fn raw(r: &Row<'_>) -> rusqlite::Result<RawDebt> {
    Ok(RawDebt {
        id: r.get(0)?,
        name: r.get(1)?,
        principal: r.get(2)?,
        interest_rate: r.get(3)?,
        minimum_payment: r.get(4)?,
        current_balance: r.get(5)?,
        created_date: r.get(6)?,
        synced: r.get(7)?,
        local_id: r.get(8)?,
    })
}

impl RawDebt {
    fn into_model(self) -> Result<Debt> {
        let id = self.id;
        Ok(Debt {
            id,
            name: self.name,
            principal: decimal_col(&self.principal, "debts", id)?,
            interest_rate: decimal_col(&self.interest_rate, "debts", id)?,
            minimum_payment: decimal_col(&self.minimum_payment, "debts", id)?,
            current_balance: decimal_col(&self.current_balance, "debts", id)?,
            created_date: self
                .created_date
                .as_deref()
                .map(|d| date_col(d, "debts", id))
                .transpose()?,
            synced: self.synced,
            local_id: self.local_id,
        })
    }
}

fn query<P: Params>(conn: &Connection, filter: &str, params: P) -> Result<Vec<Debt>> {
    let sql = format!("SELECT {COLUMNS} FROM debts {filter} ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, raw)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?.into_model()?);
    }
    Ok(out)
}

pub fn add(conn: &Connection, new: &NewDebt) -> Result<i64> {
    conn.execute(
        "INSERT INTO debts(name, principal, interest_rate, minimum_payment, current_balance, created_date, synced, local_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
        params![
            new.name,
            new.principal.to_string(),
            new.interest_rate.to_string(),
            new.minimum_payment.to_string(),
            new.current_balance.to_string(),
            new.created_date.map(|d| d.to_string()),
            new_local_id(),
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, name = %new.name, "debt stored");
    Ok(id)
}

pub fn get(conn: &Connection, id: i64) -> Result<Option<Debt>> {
    let sql = format!("SELECT {COLUMNS} FROM debts WHERE id=?1");
    let row = conn.query_row(&sql, params![id], raw).optional()?;
    row.map(RawDebt::into_model).transpose()
}

pub fn update(conn: &Connection, id: i64, patch: &DebtPatch) -> Result<()> {
    let mut d = get(conn, id)?.ok_or(FinanceError::not_found("Debt", id))?;
    if let Some(ref name) = patch.name {
        d.name = name.clone();
    }
    if let Some(principal) = patch.principal {
        d.principal = principal;
    }
    if let Some(rate) = patch.interest_rate {
        d.interest_rate = rate;
    }
    if let Some(payment) = patch.minimum_payment {
        d.minimum_payment = payment;
    }
    if let Some(balance) = patch.current_balance {
        d.current_balance = balance;
    }
    if let Some(created) = patch.created_date {
        d.created_date = Some(created);
    }
    if let Some(synced) = patch.synced {
        d.synced = synced;
    }
    conn.execute(
        "UPDATE debts SET name=?1, principal=?2, interest_rate=?3, minimum_payment=?4,
             current_balance=?5, created_date=?6, synced=?7
         WHERE id=?8",
        params![
            d.name,
            d.principal.to_string(),
            d.interest_rate.to_string(),
            d.minimum_payment.to_string(),
            d.current_balance.to_string(),
            d.created_date.map(|c| c.to_string()),
            d.synced,
            id,
        ],
    )?;
    Ok(())
}

pub fn set_balance(conn: &Connection, id: i64, balance: Decimal) -> Result<()> {
    let n = conn.execute(
        "UPDATE debts SET current_balance=?1 WHERE id=?2",
        params![balance.to_string(), id],
    )?;
    if n == 0 {
        return Err(FinanceError::not_found("Debt", id).into());
    }
    Ok(())
}

/// Linked transactions are left in place; `doctor` reports them.
pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    let n = conn.execute("DELETE FROM debts WHERE id=?1", params![id])?;
    if n == 0 {
        return Err(FinanceError::not_found("Debt", id).into());
    }
    tracing::debug!(id, "debt deleted");
    Ok(())
}

pub fn list_all(conn: &Connection) -> Result<Vec<Debt>> {
    query(conn, "", [])
}

pub fn by_name(conn: &Connection, name: &str) -> Result<Vec<Debt>> {
    query(conn, "WHERE name=?1", params![name])
}

pub fn unsynced(conn: &Connection) -> Result<Vec<Debt>> {
    query(conn, "WHERE synced=0", [])
}
