// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Writes that keep a debt's balance in step with the expense transactions
//! that pay it. Each operation commits as one SQLite transaction.

use anyhow::Result;
use rust_decimal::Decimal;
use rusqlite::Connection;

use super::{debts, transactions};
use crate::finance::{apply_payment, reverse_payment};
use crate::models::{NewTransaction, Transaction, TransactionType};

fn linked_debt(kind: TransactionType, debt_id: Option<i64>) -> Option<i64> {
    match (kind, debt_id) {
        (TransactionType::Expense, Some(id)) => Some(id),
        (TransactionType::Income, Some(id)) => {
            tracing::warn!(debt_id = id, "income transaction carries a debt link; ignored");
            None
        }
        _ => None,
    }
}

fn adjust_balance(
    conn: &Connection,
    debt_id: i64,
    adjust: impl FnOnce(Decimal) -> Decimal,
) -> Result<Option<Decimal>> {
    let Some(debt) = debts::get(conn, debt_id)? else {
        tracing::warn!(debt_id, "linked debt not found; balance left unchanged");
        return Ok(None);
    };
    let balance = adjust(debt.current_balance);
    debts::set_balance(conn, debt_id, balance)?;
    tracing::info!(
        debt_id,
        from = %debt.current_balance,
        to = %balance,
        "debt balance adjusted"
    );
    Ok(Some(balance))
}

/// Stores `new` and, for a debt payment, lowers the debt balance by the
/// amount (floored at zero).
pub fn record_transaction(conn: &mut Connection, new: &NewTransaction) -> Result<i64> {
    let tx = conn.transaction()?;
    let id = record_in(&tx, new)?;
    tx.commit()?;
    Ok(id)
}

/// Same as [`record_transaction`] for callers already inside a transaction.
pub fn record_in(conn: &Connection, new: &NewTransaction) -> Result<i64> {
    let id = transactions::add(conn, new)?;
    if let Some(debt_id) = linked_debt(new.r#type, new.debt_id) {
        adjust_balance(conn, debt_id, |b| apply_payment(b, new.amount))?;
    }
    Ok(id)
}

/// Deletes the transaction and, for a debt payment, adds the amount back to
/// the debt balance. Returns the removed record.
pub fn remove_transaction(conn: &mut Connection, id: i64) -> Result<Transaction> {
    let tx = conn.transaction()?;
    let removed = transactions::require(&tx, id)?;
    transactions::delete(&tx, id)?;
    if let Some(debt_id) = linked_debt(removed.r#type, removed.debt_id) {
        adjust_balance(&tx, debt_id, |b| reverse_payment(b, removed.amount))?;
    }
    tx.commit()?;
    Ok(removed)
}
