// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{budgets, debts, transactions};
use crate::utils::{parse_month, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Returns (issue, detail) pairs; empty when the data is consistent.
pub fn check(conn: &Connection) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Debt payments whose debt was deleted
    for t in transactions::dangling_debt_links(conn)? {
        rows.push(vec![
            "payment_without_debt".into(),
            format!("transaction #{} -> debt #{}", t.id, t.debt_id.unwrap_or_default()),
        ]);
    }

    // 2) Budgets with a month that does not parse
    for b in budgets::list_all(conn)? {
        if parse_month(&b.month).is_err() {
            rows.push(vec![
                "budget_bad_month".into(),
                format!("budget #{} month '{}'", b.id, b.month),
            ]);
        }
    }

    // 3) Debts with a negative balance or no creation date
    for d in debts::list_all(conn)? {
        if d.current_balance < Decimal::ZERO {
            rows.push(vec![
                "debt_negative_balance".into(),
                format!("debt #{} balance {}", d.id, d.current_balance),
            ]);
        }
        if d.created_date.is_none() {
            rows.push(vec![
                "debt_undated".into(),
                format!("debt #{} '{}' always passes date filters", d.id, d.name),
            ]);
        }
    }
    Ok(rows)
}

pub fn handle(conn: &Connection) -> Result<()> {
    let rows = check(conn)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
